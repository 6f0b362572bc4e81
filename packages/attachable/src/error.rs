use common::worker::TaskError;
use mq::MqError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttachableError {
    #[error("{model} has no attachable file named '{attribute}'")]
    NotDeclared { model: String, attribute: String },

    #[error("Failed to encode download job: {0}")]
    Encode(#[from] TaskError),

    #[error("MQ error: {0}")]
    Queue(#[from] MqError),
}

pub type Result<T> = std::result::Result<T, AttachableError>;
