//! Parent-panel preferences: age band and sound.

use tracing::warn;

use crate::activity::AgeBand;
use crate::error::StorageError;
use crate::storage::{keys, KeyValueStore};

pub struct Preferences<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Saved age band, `3-4` when unset or unrecognised.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn age_band(&self) -> Result<AgeBand, StorageError> {
        let Some(raw) = self.store.get(keys::AGE_BAND).await? else {
            return Ok(AgeBand::default());
        };
        Ok(raw.parse().unwrap_or_else(|_| {
            warn!(value = %raw, "unrecognised stored age band; using default");
            AgeBand::default()
        }))
    }

    /// # Errors
    /// Propagates store failures.
    pub async fn set_age_band(&self, band: AgeBand) -> Result<(), StorageError> {
        self.store.set(keys::AGE_BAND, band.as_str()).await
    }

    /// Sound is on until explicitly switched off.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn sound_enabled(&self) -> Result<bool, StorageError> {
        Ok(match self.store.get(keys::SOUND_ENABLED).await? {
            None => true,
            Some(raw) => raw == "true",
        })
    }

    /// # Errors
    /// Propagates store failures.
    pub async fn set_sound_enabled(&self, enabled: bool) -> Result<(), StorageError> {
        self.store
            .set(keys::SOUND_ENABLED, if enabled { "true" } else { "false" })
            .await
    }
}
