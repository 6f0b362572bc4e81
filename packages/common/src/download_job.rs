use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::mq::Message;

/// Reference a worker can use to reload a record: the model name plus its id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    /// Record type, e.g. "Poster".
    pub model: String,
    /// Primary key rendered as a string.
    pub id: String,
}

impl RecordRef {
    pub fn new(model: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.model, self.id)
    }
}

/// One batched download request, sent to the downloader queue once per save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DownloadJob {
    /// Job identifier (UUID)
    pub job_id: String,
    /// Record owning the attachments
    pub record: RecordRef,
    /// Attribute names to download, in assignment order
    pub attachments: Vec<String>,
    /// When the job was built
    pub enqueued_at: DateTime<Utc>,
}

impl DownloadJob {
    /// Create a new download job with a generated UUID.
    pub fn new(record: RecordRef, attachments: Vec<String>) -> Self {
        Self {
            job_id: Uuid::new_v4().to_string(),
            record,
            attachments,
            enqueued_at: Utc::now(),
        }
    }
}

impl Message for DownloadJob {
    fn message_type() -> &'static str {
        "download_attachments"
    }

    fn message_id(&self) -> &str {
        &self.job_id
    }
}
