//! Per-instance record of which attachments got a new remote URL since the
//! last save.

use std::collections::HashMap;

use tracing::debug;

use crate::url::escape_url;

/// Whether a save has downloads to enqueue.
///
/// `Armed` holds the pending attribute names in first-assignment order and is
/// never empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DownloadState {
    #[default]
    Idle,
    Armed(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct RemoteUrlAssignment {
    /// URL as the caller gave it.
    remote_url: String,
    /// Escaped URL the downloader fetches from.
    original_url: String,
}

/// Remote URL assignments of one record plus its pending download set.
#[derive(Clone, Debug, Default)]
pub struct PendingDownloads {
    assignments: HashMap<String, RemoteUrlAssignment>,
    state: DownloadState,
}

impl PendingDownloads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a remote URL for `attribute`.
    ///
    /// `None` or a blank URL leaves everything untouched. Otherwise the
    /// escaped URL replaces any earlier one and `attribute` is marked pending.
    /// Returns true if `attribute` was not pending before.
    pub fn assign(&mut self, attribute: &str, url: Option<&str>) -> bool {
        let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
            return false;
        };

        let original_url = escape_url(url);
        debug!(attribute, original_url = %original_url, "Remote URL assigned");
        self.assignments.insert(
            attribute.to_string(),
            RemoteUrlAssignment {
                remote_url: url.to_string(),
                original_url,
            },
        );

        match &mut self.state {
            DownloadState::Armed(names) if names.iter().any(|n| n == attribute) => false,
            DownloadState::Armed(names) => {
                names.push(attribute.to_string());
                true
            }
            DownloadState::Idle => {
                self.state = DownloadState::Armed(vec![attribute.to_string()]);
                true
            }
        }
    }

    /// Pending attribute names in assignment order.
    pub fn pending_names(&self) -> Vec<String> {
        match &self.state {
            DownloadState::Idle => Vec::new(),
            DownloadState::Armed(names) => names.clone(),
        }
    }

    /// Forget the pending set. Assigned URLs stay readable.
    pub fn clear(&mut self) {
        self.state = DownloadState::Idle;
    }

    pub fn state(&self) -> &DownloadState {
        &self.state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, DownloadState::Armed(_))
    }

    pub fn remote_url(&self, attribute: &str) -> Option<&str> {
        self.assignments
            .get(attribute)
            .map(|a| a.remote_url.as_str())
    }

    pub fn original_url(&self, attribute: &str) -> Option<&str> {
        self.assignments
            .get(attribute)
            .map(|a| a.original_url.as_str())
    }
}
