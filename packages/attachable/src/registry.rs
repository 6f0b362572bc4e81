//! Per-record-type declarations of attachable files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AttachableError, Result};

/// Where a downloaded attachment ends up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageTarget {
    #[default]
    S3,
    Filesystem,
}

/// Defaults every declaration is merged over.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StorageDefaults {
    /// Storage backend. Default: s3.
    #[serde(default)]
    pub storage: StorageTarget,
    /// Bucket name used by the S3 backend. Default: "attachments".
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Path template. Default: ":model/:attachment/:id/:filename".
    #[serde(default = "default_path")]
    pub path: String,
    /// Options passed through untouched to the attachment backend.
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

pub(crate) fn default_bucket() -> String {
    "attachments".into()
}
pub(crate) fn default_path() -> String {
    ":model/:attachment/:id/:filename".into()
}

impl Default for StorageDefaults {
    fn default() -> Self {
        Self {
            storage: StorageTarget::default(),
            bucket: default_bucket(),
            path: default_path(),
            extra: BTreeMap::new(),
        }
    }
}

/// Options given when declaring an attachment. Unset fields fall back to
/// the registry's [`StorageDefaults`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttachmentOptions {
    storage: Option<StorageTarget>,
    bucket: Option<String>,
    path: Option<String>,
    default_url: Option<String>,
    extra: BTreeMap<String, serde_json::Value>,
}

impl AttachmentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn storage(mut self, storage: StorageTarget) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// URL served while no file has been downloaded yet.
    pub fn default_url(mut self, url: impl Into<String>) -> Self {
        self.default_url = Some(url.into());
        self
    }

    /// Backend-specific option, passed through as-is.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    fn merge_over(self, defaults: &StorageDefaults) -> AttachmentConfig {
        let mut extra = defaults.extra.clone();
        extra.extend(self.extra);

        AttachmentConfig {
            storage: self.storage.unwrap_or(defaults.storage),
            bucket: self.bucket.unwrap_or_else(|| defaults.bucket.clone()),
            path: self.path.unwrap_or_else(|| defaults.path.clone()),
            default_url: self.default_url,
            extra,
        }
    }
}

/// Effective configuration of one declared attachment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttachmentConfig {
    pub storage: StorageTarget,
    pub bucket: String,
    pub path: String,
    pub default_url: Option<String>,
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl AttachmentConfig {
    pub fn option(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

/// Attachments declared by one record type, in declaration order.
#[derive(Clone, Debug)]
pub struct AttachmentRegistry {
    model: String,
    defaults: StorageDefaults,
    declarations: Vec<(String, AttachmentConfig)>,
}

impl AttachmentRegistry {
    /// Registry using the built-in defaults (S3 storage).
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_defaults(model, StorageDefaults::default())
    }

    pub fn with_defaults(model: impl Into<String>, defaults: StorageDefaults) -> Self {
        Self {
            model: model.into(),
            defaults,
            declarations: Vec::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Declare `attribute` as an attachable file.
    ///
    /// Declaring the same attribute again replaces its configuration but
    /// keeps its original position.
    pub fn declare(&mut self, attribute: impl Into<String>, options: AttachmentOptions) -> &mut Self {
        let attribute = attribute.into();
        let config = options.merge_over(&self.defaults);
        debug!(
            model = %self.model,
            attribute = %attribute,
            storage = ?config.storage,
            path = %config.path,
            "Declared attachable file"
        );

        match self.declarations.iter_mut().find(|(name, _)| *name == attribute) {
            Some((_, existing)) => *existing = config,
            None => self.declarations.push((attribute, config)),
        }
        self
    }

    pub fn configuration_of(&self, attribute: &str) -> Result<&AttachmentConfig> {
        self.declarations
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, config)| config)
            .ok_or_else(|| AttachableError::NotDeclared {
                model: self.model.clone(),
                attribute: attribute.to_string(),
            })
    }

    pub fn is_declared(&self, attribute: &str) -> bool {
        self.declarations.iter().any(|(name, _)| name == attribute)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
