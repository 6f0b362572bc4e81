use std::sync::Arc;

use common::config::MqAppConfig;
use common::worker::Task;
use common::{DownloadJob, RecordRef};
use mq::JobQueue;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::record::Attachable;

/// Turns the pending downloads of a saved record into one queued job.
#[derive(Clone)]
pub struct DownloadCoordinator {
    queue: Arc<dyn JobQueue>,
    queue_name: String,
}

impl DownloadCoordinator {
    pub fn new(queue: Arc<dyn JobQueue>, queue_name: impl Into<String>) -> Self {
        Self {
            queue,
            queue_name: queue_name.into(),
        }
    }

    pub fn from_config(queue: Arc<dyn JobQueue>, config: &MqAppConfig) -> Self {
        Self::new(queue, config.queue_name.clone())
    }

    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    /// Post-save hook. Call once after every successful save of `record`.
    ///
    /// Enqueues a single job naming every attachment assigned since the last
    /// save and returns it. Returns `None` when nothing was assigned. If the
    /// queue rejects the job the pending set is left intact so a later save
    /// retries it.
    pub async fn after_save<R: Attachable>(&self, record: &mut R) -> Result<Option<DownloadJob>> {
        let attachments = record.pending_downloads().pending_names();
        if attachments.is_empty() {
            debug!(model = R::registry().model(), "Save without pending downloads");
            return Ok(None);
        }

        let job = self.enqueue(record.to_findable(), attachments).await?;
        record.pending_downloads_mut().clear();
        Ok(job)
    }

    /// Enqueue a download job for an explicit record and attachment list.
    pub async fn enqueue(
        &self,
        record: RecordRef,
        attachments: Vec<String>,
    ) -> Result<Option<DownloadJob>> {
        if attachments.is_empty() {
            return Ok(None);
        }

        let job = DownloadJob::new(record, attachments);
        let task = Task::from_message(&job)?;

        if let Err(e) = self.queue.submit(&self.queue_name, &task).await {
            warn!(
                job_id = %job.job_id,
                record = %job.record,
                queue = %self.queue_name,
                error = %e,
                "Failed to enqueue download job, keeping downloads pending"
            );
            return Err(e.into());
        }

        info!(
            job_id = %job.job_id,
            record = %job.record,
            attachments = job.attachments.len(),
            queue = %self.queue_name,
            "Download job enqueued"
        );
        Ok(Some(job))
    }
}
