use common::RecordRef;

use crate::error::Result;
use crate::registry::AttachmentRegistry;
use crate::tracker::PendingDownloads;

/// A persisted record that a worker can load again later.
pub trait Findable {
    fn to_findable(&self) -> RecordRef;
}

/// A record type with declared attachable files.
///
/// Normally implemented through [`has_attachable_files!`](crate::has_attachable_files),
/// which also generates the per-attribute accessors.
pub trait Attachable: Findable {
    fn registry() -> &'static AttachmentRegistry;

    fn pending_downloads(&self) -> &PendingDownloads;

    fn pending_downloads_mut(&mut self) -> &mut PendingDownloads;

    fn set_remote_url(&mut self, attribute: &str, url: Option<&str>) -> Result<()> {
        Self::registry().configuration_of(attribute)?;
        self.pending_downloads_mut().assign(attribute, url);
        Ok(())
    }

    fn remote_url(&self, attribute: &str) -> Result<Option<&str>> {
        Self::registry().configuration_of(attribute)?;
        Ok(self.pending_downloads().remote_url(attribute))
    }

    fn original_url(&self, attribute: &str) -> Result<Option<&str>> {
        Self::registry().configuration_of(attribute)?;
        Ok(self.pending_downloads().original_url(attribute))
    }
}

/// Declare the attachable files of a record type.
///
/// The type keeps a [`PendingDownloads`] in the named field and implements
/// [`Findable`] itself. For every attribute this generates `<attr>()` (the
/// merged [`AttachmentConfig`](crate::AttachmentConfig)), `<attr>_remote_url()`,
/// `set_<attr>_remote_url(..)` and `<attr>_original_url()`.
///
/// ```ignore
/// has_attachable_files! {
///     Poster, state = downloads;
///     image => AttachmentOptions::new().path("/posters/:id"),
///     trailer,
/// }
/// ```
#[macro_export]
macro_rules! has_attachable_files {
    (@options) => {
        $crate::AttachmentOptions::new()
    };
    (@options $options:expr) => {
        $options
    };
    (
        $ty:ident, state = $field:ident;
        $( $attr:ident $( => $options:expr )? ),+ $(,)?
    ) => {
        impl $crate::Attachable for $ty {
            fn registry() -> &'static $crate::AttachmentRegistry {
                static REGISTRY: ::std::sync::LazyLock<$crate::AttachmentRegistry> =
                    ::std::sync::LazyLock::new(|| {
                        let mut registry = $crate::AttachmentRegistry::new(stringify!($ty));
                        $(
                            registry.declare(
                                stringify!($attr),
                                $crate::has_attachable_files!(@options $($options)?),
                            );
                        )+
                        registry
                    });
                &REGISTRY
            }

            fn pending_downloads(&self) -> &$crate::PendingDownloads {
                &self.$field
            }

            fn pending_downloads_mut(&mut self) -> &mut $crate::PendingDownloads {
                &mut self.$field
            }
        }

        $crate::__paste! {
            impl $ty {
                $(
                    pub fn $attr(&self) -> &'static $crate::AttachmentConfig {
                        match <Self as $crate::Attachable>::registry()
                            .configuration_of(stringify!($attr))
                        {
                            Ok(config) => config,
                            Err(_) => unreachable!(concat!(
                                stringify!($attr),
                                " is declared by has_attachable_files!"
                            )),
                        }
                    }

                    pub fn [<$attr _remote_url>](&self) -> Option<&str> {
                        self.$field.remote_url(stringify!($attr))
                    }

                    pub fn [<set_ $attr _remote_url>](&mut self, url: Option<&str>) {
                        self.$field.assign(stringify!($attr), url);
                    }

                    pub fn [<$attr _original_url>](&self) -> Option<&str> {
                        self.$field.original_url(stringify!($attr))
                    }
                )+
            }
        }
    };
}
