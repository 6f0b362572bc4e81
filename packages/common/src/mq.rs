use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;

/// Core trait for all MQ messages
pub trait Message: Serialize + DeserializeOwned + Debug + Send + Sync + Clone {
    /// Task type the message travels under (e.g. "download_attachments").
    fn message_type() -> &'static str
    where
        Self: Sized;

    fn message_id(&self) -> &str;
}
