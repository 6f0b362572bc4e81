pub mod error;
pub mod models;
pub mod queue;

pub use error::MqError;
pub use models::{MqConfig, MqQueue, init_mq};
pub use queue::{JobQueue, MemoryQueue};
