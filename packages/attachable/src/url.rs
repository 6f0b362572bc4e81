//! Escaping of remote URLs before they are stored as `<attachment>_original_url`.

use tracing::debug;

/// Percent-encode bytes that are not legal anywhere in a URL.
///
/// Unreserved and reserved characters are kept, and so is a `%` that starts a
/// valid escape. A stray `%` becomes `%25`. This makes the transform
/// idempotent: `escape_url(escape_url(s)) == escape_url(s)`.
/// Surrounding whitespace is trimmed first.
pub fn escape_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if !looks_like_url(trimmed) {
        debug!(url = %trimmed, "Remote URL has no scheme, escaping best-effort");
    }

    let bytes = trimmed.as_bytes();
    let mut escaped = String::with_capacity(trimmed.len());
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'%' {
            if starts_escape(&bytes[i + 1..]) {
                escaped.push('%');
            } else {
                escaped.push_str("%25");
            }
        } else if is_url_safe(b) {
            escaped.push(b as char);
        } else {
            escaped.push_str(&format!("%{b:02X}"));
        }
    }
    escaped
}

/// Returns true if `raw` starts with an RFC 3986 scheme followed by `:`.
pub fn looks_like_url(raw: &str) -> bool {
    let Some((scheme, _)) = raw.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn starts_escape(rest: &[u8]) -> bool {
    matches!(rest, [hi, lo, ..] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit())
}

fn is_url_safe(b: u8) -> bool {
    matches!(
        b,
        b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            // unreserved
            | b'-'
            | b'.'
            | b'_'
            | b'~'
            // gen-delims
            | b':'
            | b'/'
            | b'?'
            | b'#'
            | b'['
            | b']'
            | b'@'
            // sub-delims
            | b'!'
            | b'$'
            | b'&'
            | b'\''
            | b'('
            | b')'
            | b'*'
            | b'+'
            | b','
            | b';'
            | b'='
    )
}
