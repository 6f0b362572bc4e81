use thiserror::Error;

#[derive(Debug, Error)]
pub enum MqError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Publish to {queue} failed: {reason}")]
    Publish { queue: String, reason: String },
}

impl From<broccoli_queue::error::BroccoliError> for MqError {
    fn from(e: broccoli_queue::error::BroccoliError) -> Self {
        MqError::Connection(e.to_string())
    }
}
