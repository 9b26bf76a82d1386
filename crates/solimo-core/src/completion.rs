//! "Completed today" gate for the daily activity.
//!
//! A single local date string is stored. Reading it on any other day
//! deletes it, so the record expires on its own at the next local
//! midnight and the gate opens again.

use tracing::{debug, info};

use crate::clock::{local_date_string, Clock};
use crate::error::StorageError;
use crate::storage::{keys, KeyValueStore};

pub struct CompletionTracker<S: KeyValueStore, C: Clock> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> CompletionTracker<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    fn today(&self) -> String {
        local_date_string(self.clock.today())
    }

    /// Whether today's activity has been finished.
    ///
    /// A stored date from any other day is removed before returning `false`.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn is_completed_today(&self) -> Result<bool, StorageError> {
        let Some(completed) = self.store.get(keys::COMPLETED_DATE).await? else {
            return Ok(false);
        };

        let today = self.today();
        if completed != today {
            debug!(stored = %completed, today = %today, "clearing stale completion date");
            self.clear_todays_completion().await?;
            return Ok(false);
        }

        Ok(true)
    }

    /// # Errors
    /// Propagates store failures.
    pub async fn mark_completed_today(&self) -> Result<(), StorageError> {
        let today = self.today();
        self.store.set(keys::COMPLETED_DATE, &today).await?;
        info!(date = %today, "daily activity completed");
        Ok(())
    }

    /// Manual reset, used by the parent panel.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn clear_todays_completion(&self) -> Result<(), StorageError> {
        self.store.remove(keys::COMPLETED_DATE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn friday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn tracker() -> (
        Arc<MemoryStore>,
        Arc<FixedClock>,
        CompletionTracker<Arc<MemoryStore>, Arc<FixedClock>>,
    ) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(friday()));
        let tracker = CompletionTracker::new(Arc::clone(&store), Arc::clone(&clock));
        (store, clock, tracker)
    }

    #[tokio::test]
    async fn absent_record_is_not_completed() {
        let (_, _, tracker) = tracker();
        assert!(!tracker.is_completed_today().await.unwrap());
    }

    #[tokio::test]
    async fn mark_then_clear() {
        let (store, _, tracker) = tracker();
        tracker.mark_completed_today().await.unwrap();
        assert!(tracker.is_completed_today().await.unwrap());
        assert_eq!(
            store.get(keys::COMPLETED_DATE).await.unwrap().as_deref(),
            Some("2026-10-16")
        );

        tracker.clear_todays_completion().await.unwrap();
        assert!(!tracker.is_completed_today().await.unwrap());
    }

    #[tokio::test]
    async fn stale_date_is_deleted_on_read() {
        let (store, _, tracker) = tracker();
        store.set(keys::COMPLETED_DATE, "2026-10-15").await.unwrap();

        assert!(!tracker.is_completed_today().await.unwrap());
        assert!(store.get(keys::COMPLETED_DATE).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn completion_expires_at_next_local_day() {
        let (store, clock, tracker) = tracker();
        tracker.mark_completed_today().await.unwrap();
        clock.advance_days(1);

        assert!(!tracker.is_completed_today().await.unwrap());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn future_date_is_also_treated_as_stale() {
        let (store, _, tracker) = tracker();
        store.set(keys::COMPLETED_DATE, "2026-10-17").await.unwrap();
        assert!(!tracker.is_completed_today().await.unwrap());
        assert!(store.get(keys::COMPLETED_DATE).await.unwrap().is_none());
    }

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Locked)
        }
        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Locked)
        }
        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Locked)
        }
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let tracker = CompletionTracker::new(BrokenStore, FixedClock::new(friday()));
        assert!(matches!(
            tracker.is_completed_today().await,
            Err(StorageError::Locked)
        ));
        assert!(tracker.mark_completed_today().await.is_err());
        assert!(tracker.clear_todays_completion().await.is_err());
    }
}
