//! Persisted difficulty level per activity.
//!
//! Stored under a single key as a flat JSON object, e.g.
//! `{"colors":2,"logic":3}`. Activities without an entry are at level 1.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::warn;

use crate::activity::{ActivityId, Difficulty};
use crate::error::StorageError;
use crate::storage::{keys, KeyValueStore};

pub struct DifficultyLevels<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> DifficultyLevels<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Raw stored object. Unparseable or non-object content reads as empty.
    async fn load_map(&self) -> Result<Map<String, Value>, StorageError> {
        let Some(raw) = self.store.get(keys::ACTIVITY_LEVELS).await? else {
            return Ok(Map::new());
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => {
                warn!(value = %other, "stored difficulty levels are not an object; using defaults");
                Ok(Map::new())
            }
            Err(e) => {
                warn!(error = %e, "stored difficulty levels are malformed; using defaults");
                Ok(Map::new())
            }
        }
    }

    fn entry_level(activity: ActivityId, value: Option<&Value>) -> Difficulty {
        let Some(value) = value else {
            return Difficulty::default();
        };
        match value.as_i64().map(Difficulty::try_from) {
            Some(Ok(level)) => level,
            _ => {
                warn!(%activity, %value, "ignoring invalid stored difficulty level");
                Difficulty::default()
            }
        }
    }

    /// # Errors
    /// Propagates store failures.
    pub async fn level_for(&self, activity: ActivityId) -> Result<Difficulty, StorageError> {
        let map = self.load_map().await?;
        Ok(Self::entry_level(activity, map.get(activity.as_str())))
    }

    /// Levels for every activity, defaults included.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn all_levels(&self) -> Result<BTreeMap<ActivityId, Difficulty>, StorageError> {
        let map = self.load_map().await?;
        Ok(ActivityId::ALL
            .into_iter()
            .map(|id| (id, Self::entry_level(id, map.get(id.as_str()))))
            .collect())
    }

    /// Read-modify-write of the level map. Unrelated keys already in the
    /// stored object are kept.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn set_level(
        &self,
        activity: ActivityId,
        level: Difficulty,
    ) -> Result<(), StorageError> {
        let mut map = self.load_map().await?;
        map.insert(activity.as_str().to_string(), Value::from(level.get()));
        let encoded = Value::Object(map).to_string();
        self.store.set(keys::ACTIVITY_LEVELS, &encoded).await
    }

    /// Forget every stored level.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(keys::ACTIVITY_LEVELS).await
    }
}
