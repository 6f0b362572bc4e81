use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use common::worker::Task;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::MqError;
use crate::models::MqQueue;

/// Publishing side of a worker queue.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Submit one task to the named queue.
    async fn submit(&self, queue: &str, task: &Task) -> Result<(), MqError>;
}

#[async_trait]
impl JobQueue for MqQueue {
    async fn submit(&self, queue: &str, task: &Task) -> Result<(), MqError> {
        self.publish(queue, None, task, None)
            .await
            .map(|_| ())
            .map_err(|e| MqError::Publish {
                queue: queue.to_string(),
                reason: e.to_string(),
            })
    }
}

/// In-process queue that records submitted tasks per queue name.
///
/// Stands in for Redis in tests and in embedded setups where a worker drains
/// the queue in the same process.
#[derive(Debug, Default)]
pub struct MemoryQueue {
    queues: Mutex<HashMap<String, Vec<Task>>>,
    failing: AtomicBool,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting in `queue`.
    pub async fn size(&self, queue: &str) -> usize {
        self.queues.lock().await.get(queue).map_or(0, Vec::len)
    }

    /// Copy of the tasks in `queue`, oldest first.
    pub async fn peek(&self, queue: &str) -> Vec<Task> {
        self.queues
            .lock()
            .await
            .get(queue)
            .cloned()
            .unwrap_or_default()
    }

    /// Remove and return every task in `queue`.
    pub async fn drain(&self, queue: &str) -> Vec<Task> {
        self.queues.lock().await.remove(queue).unwrap_or_default()
    }

    /// Make every following `submit` fail until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl JobQueue for MemoryQueue {
    async fn submit(&self, queue: &str, task: &Task) -> Result<(), MqError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MqError::Publish {
                queue: queue.to_string(),
                reason: "queue unavailable".into(),
            });
        }

        let mut queues = self.queues.lock().await;
        let pending = queues.entry(queue.to_string()).or_default();
        pending.push(task.clone());
        debug!(queue, task_id = %task.id, size = pending.len(), "Task queued in memory");
        Ok(())
    }
}
