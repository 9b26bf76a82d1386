//! Persistence port and its implementations.
//!
//! Components never talk to a concrete backend. They are handed a
//! [`KeyValueStore`] at construction, usually an `Arc` shared between the
//! completion tracker, the difficulty levels and the preferences.

mod config;
mod memory;
mod sqlite;

pub use config::{Config, FeedbackConfig, LoggingConfig, SessionSettings, StorageConfig};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ConfigError, StorageError};

/// Storage keys owned by the core. Each key has exactly one writer.
pub mod keys {
    /// Last local date the daily activity was finished (`YYYY-MM-DD`).
    pub const COMPLETED_DATE: &str = "solimo_completedDate";
    /// JSON object mapping activity id to difficulty level.
    pub const ACTIVITY_LEVELS: &str = "solimo_activityLevels";
    pub const AGE_BAND: &str = "solimo_ageBand";
    pub const SOUND_ENABLED: &str = "solimo_soundEnabled";
}

/// Opaque async key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when the key has never been set or was removed.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key).await
    }
}

/// Returns the data directory, creating it if needed.
///
/// `SOLIMO_DATA_DIR` wins when set. Otherwise `~/.config/solimo`, or
/// `~/.config/solimo-dev` when `SOLIMO_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("SOLIMO_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("SOLIMO_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("solimo-dev")
            } else {
                base_dir.join("solimo")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
