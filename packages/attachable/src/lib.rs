//! Remote-URL attachments for persisted records, downloaded in the
//! background.
//!
//! A record type declares its attachable files with [`has_attachable_files!`].
//! Assigning a remote URL marks the attachment pending; after the record is
//! saved, [`DownloadCoordinator::after_save`] batches every pending attachment
//! into one [`DownloadJob`] on the downloader queue.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod record;
pub mod registry;
pub mod tracker;
pub mod url;

pub use common::{DownloadJob, RecordRef};
pub use config::AttachableConfig;
pub use coordinator::DownloadCoordinator;
pub use error::{AttachableError, Result};
pub use record::{Attachable, Findable};
pub use registry::{
    AttachmentConfig, AttachmentOptions, AttachmentRegistry, StorageDefaults, StorageTarget,
};
pub use tracker::{DownloadState, PendingDownloads};
pub use url::escape_url;

#[doc(hidden)]
pub use paste::paste as __paste;
