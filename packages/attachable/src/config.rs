use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::sync::Arc;

pub use common::config::MqAppConfig;
use mq::JobQueue;

use crate::coordinator::DownloadCoordinator;
use crate::registry::{AttachmentRegistry, StorageDefaults};

/// Application configuration for attachable files.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AttachableConfig {
    #[serde(default)]
    pub mq: MqAppConfig,
    #[serde(default)]
    pub storage: StorageDefaults,
}

impl AttachableConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("ATTACHABLE_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        Self::from_builder(
            Config::builder()
                .add_source(File::with_name(&config_path).required(false))
                // Override from environment (e.g., ATTACHABLE__STORAGE__BUCKET)
                .add_source(Environment::with_prefix("ATTACHABLE").separator("__")),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let s = builder
            .set_default("mq.url", "redis://localhost:6379")?
            .set_default("mq.pool_size", 5_i64)?
            .set_default("mq.queue_name", "downloader")?
            .set_default("storage.storage", "s3")?
            .set_default("storage.bucket", "attachments")?
            .set_default("storage.path", ":model/:attachment/:id/:filename")?
            .build()?;

        s.try_deserialize()
    }

    /// Empty registry for `model` using the configured storage defaults.
    pub fn registry(&self, model: impl Into<String>) -> AttachmentRegistry {
        AttachmentRegistry::with_defaults(model, self.storage.clone())
    }

    /// Coordinator publishing to the configured queue.
    pub fn coordinator(&self, queue: Arc<dyn JobQueue>) -> DownloadCoordinator {
        DownloadCoordinator::from_config(queue, &self.mq)
    }
}
