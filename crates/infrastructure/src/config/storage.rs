//! Alert store backend selection.

use serde::{Deserialize, Serialize};

use super::common::{ConfigError, check_non_empty};
use crate::constants::DEFAULT_STORAGE_PATH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-local map; records are lost on restart.
    #[default]
    Memory,
    /// Persistent redb database at `storage.path`.
    Redb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database file, used by the `redb` backend.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    DEFAULT_STORAGE_PATH.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
        }
    }
}

impl StorageConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == StorageBackend::Redb {
            check_non_empty("storage.path", &self.path)?;
        }
        Ok(())
    }
}
