use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::mq::Message;

/// Envelope for every payload published to a worker queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub task_type: String,
    pub payload: serde_json::Value,
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Task {
    /// Wrap a typed message into a task envelope.
    pub fn from_message<M: Message>(message: &M) -> Result<Self, TaskError> {
        debug!(
            task_type = M::message_type(),
            task_id = %message.message_id(),
            "Creating task envelope"
        );

        Ok(Self {
            id: message.message_id().to_string(),
            task_type: M::message_type().to_string(),
            payload: serde_json::to_value(message)?,
        })
    }

    /// Decode the payload back into a typed message.
    pub fn into_message<M: Message>(self) -> Result<M, TaskError> {
        if self.task_type != M::message_type() {
            error!(
                expected = M::message_type(),
                actual = %self.task_type,
                task_id = %self.id,
                "Task type mismatch"
            );
            return Err(TaskError::TypeMismatch {
                expected: M::message_type().to_string(),
                actual: self.task_type,
            });
        }

        serde_json::from_value(self.payload).map_err(|e| {
            error!(error = %e, task_id = %self.id, "Deserialization failed");
            TaskError::Serialization(e)
        })
    }
}
