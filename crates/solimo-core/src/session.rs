//! One play-through of the daily activity.
//!
//! The session owns a [`DifficultyController`] seeded from the persisted
//! level. Every answer runs the adjustment rule; level changes are written
//! back immediately, and the day is marked complete once the correct-answer
//! target is reached, after the answer that reached it has been fully
//! recorded.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::activity::{ActivityId, AgeBand, Difficulty};
use crate::clock::Clock;
use crate::completion::CompletionTracker;
use crate::difficulty::{DifficultyController, DifficultyLevels, ProgressSnapshot};
use crate::error::{CoreError, ValidationError};
use crate::storage::{KeyValueStore, SessionSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelChange {
    pub from: Difficulty,
    pub to: Difficulty,
}

/// What happened after a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerReport {
    pub outcome: Outcome,
    pub level: Difficulty,
    pub level_change: Option<LevelChange>,
    pub progress: ProgressSnapshot,
    pub correct_count: u32,
    /// True only on the answer that finished the day.
    pub completed_now: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub activity: ActivityId,
    pub age_band: AgeBand,
    pub correct: u32,
    pub attempts: u32,
    pub level: Difficulty,
    pub completed: bool,
}

pub struct ActivitySession<'a, S: KeyValueStore, C: Clock> {
    activity: ActivityId,
    age_band: AgeBand,
    controller: DifficultyController,
    levels: &'a DifficultyLevels<S>,
    tracker: &'a CompletionTracker<S, C>,
    target: u32,
    correct_count: u32,
    attempts: u32,
    completed: bool,
}

impl<'a, S: KeyValueStore, C: Clock> ActivitySession<'a, S, C> {
    /// Start a session at the activity's persisted level.
    ///
    /// # Errors
    /// Propagates store failures while loading the level.
    pub async fn begin(
        activity: ActivityId,
        age_band: AgeBand,
        levels: &'a DifficultyLevels<S>,
        tracker: &'a CompletionTracker<S, C>,
        settings: &SessionSettings,
    ) -> Result<Self, CoreError> {
        let level = levels.level_for(activity).await?;
        debug!(%activity, %age_band, %level, "session started");
        Ok(Self {
            activity,
            age_band,
            controller: DifficultyController::new(level),
            levels,
            tracker,
            target: settings.correct_answers_to_complete.max(1),
            correct_count: 0,
            attempts: 0,
            completed: false,
        })
    }

    pub fn activity(&self) -> ActivityId {
        self.activity
    }

    pub fn age_band(&self) -> AgeBand {
        self.age_band
    }

    pub fn level(&self) -> Difficulty {
        self.controller.current_level()
    }

    pub fn progress(&self) -> ProgressSnapshot {
        self.controller.progress_snapshot()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Correct answers still needed to finish the day.
    pub fn remaining(&self) -> u32 {
        self.target.saturating_sub(self.correct_count)
    }

    /// Record one answer.
    ///
    /// Persistence happens before any in-memory state moves, so a failed
    /// answer leaves the session untouched and can be retried. Rewriting
    /// the same level on retry is harmless.
    ///
    /// # Errors
    /// Fails with [`ValidationError::SessionComplete`] once the target was
    /// reached, or with the store error if persisting fails.
    pub async fn answer(&mut self, outcome: Outcome) -> Result<AnswerReport, CoreError> {
        if self.completed {
            return Err(ValidationError::SessionComplete {
                activity: self.activity.to_string(),
            }
            .into());
        }

        let mut controller = self.controller.clone();
        let from = controller.current_level();
        let mut correct_count = self.correct_count;
        match outcome {
            Outcome::Correct => {
                correct_count += 1;
                controller.record_correct();
            }
            Outcome::Wrong => controller.record_wrong(),
        }

        let level_change = match controller.evaluate_adjustment() {
            Some(to) => {
                self.levels.set_level(self.activity, to).await?;
                info!(activity = %self.activity, %from, %to, "difficulty level changed");
                Some(LevelChange { from, to })
            }
            None => None,
        };

        let completed_now = outcome == Outcome::Correct && correct_count >= self.target;
        if completed_now {
            self.tracker.mark_completed_today().await?;
        }

        self.controller = controller;
        self.correct_count = correct_count;
        self.attempts += 1;
        self.completed = completed_now;
        debug!(activity = %self.activity, ?outcome, correct = correct_count, "answer recorded");

        Ok(AnswerReport {
            outcome,
            level: self.controller.current_level(),
            level_change,
            progress: self.controller.progress_snapshot(),
            correct_count,
            completed_now,
        })
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            activity: self.activity,
            age_band: self.age_band,
            correct: self.correct_count,
            attempts: self.attempts,
            level: self.controller.current_level(),
            completed: self.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::StorageError;
    use crate::storage::{keys, MemoryStore};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct Fixture {
        store: Arc<MemoryStore>,
        levels: DifficultyLevels<Arc<MemoryStore>>,
        tracker: CompletionTracker<Arc<MemoryStore>, FixedClock>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        Fixture {
            levels: DifficultyLevels::new(Arc::clone(&store)),
            tracker: CompletionTracker::new(
                Arc::clone(&store),
                FixedClock::new(NaiveDate::from_ymd_opt(2026, 10, 12).unwrap()),
            ),
            store,
        }
    }

    #[tokio::test]
    async fn fifth_correct_answer_completes_the_day() {
        let f = fixture();
        let mut session = ActivitySession::begin(
            ActivityId::Colors,
            AgeBand::ThreeToFour,
            &f.levels,
            &f.tracker,
            &SessionSettings::default(),
        )
        .await
        .unwrap();

        for n in 1..=4 {
            let report = session.answer(Outcome::Correct).await.unwrap();
            assert!(!report.completed_now, "completed early at answer {n}");
            assert!(!f.tracker.is_completed_today().await.unwrap());
        }
        session.answer(Outcome::Wrong).await.unwrap();
        let report = session.answer(Outcome::Correct).await.unwrap();
        assert!(report.completed_now);
        assert!(f.tracker.is_completed_today().await.unwrap());

        let summary = session.summary();
        assert_eq!(summary.correct, 5);
        assert_eq!(summary.attempts, 6);
        assert!(summary.completed);
    }

    #[tokio::test]
    async fn level_changes_are_persisted() {
        let f = fixture();
        let mut session = ActivitySession::begin(
            ActivityId::Shapes,
            AgeBand::FiveToSix,
            &f.levels,
            &f.tracker,
            &SessionSettings::default(),
        )
        .await
        .unwrap();

        session.answer(Outcome::Correct).await.unwrap();
        session.answer(Outcome::Correct).await.unwrap();
        let report = session.answer(Outcome::Correct).await.unwrap();
        assert_eq!(
            report.level_change,
            Some(LevelChange {
                from: Difficulty::MIN,
                to: Difficulty::MID
            })
        );
        assert_eq!(f.levels.level_for(ActivityId::Shapes).await.unwrap(), Difficulty::MID);

        session.answer(Outcome::Wrong).await.unwrap();
        let report = session.answer(Outcome::Wrong).await.unwrap();
        assert_eq!(report.level, Difficulty::MIN);
        assert_eq!(f.levels.level_for(ActivityId::Shapes).await.unwrap(), Difficulty::MIN);
    }

    #[tokio::test]
    async fn session_starts_from_persisted_level() {
        let f = fixture();
        f.levels.set_level(ActivityId::Logic, Difficulty::MAX).await.unwrap();
        let session = ActivitySession::begin(
            ActivityId::Logic,
            AgeBand::SevenToEight,
            &f.levels,
            &f.tracker,
            &SessionSettings::default(),
        )
        .await
        .unwrap();
        assert_eq!(session.level(), Difficulty::MAX);
        assert_eq!(session.progress().target, 2);
        assert_eq!(session.remaining(), 5);
    }

    #[tokio::test]
    async fn answers_after_completion_are_rejected() {
        let f = fixture();
        let settings = SessionSettings {
            correct_answers_to_complete: 1,
        };
        let mut session = ActivitySession::begin(
            ActivityId::Memory,
            AgeBand::ThreeToFour,
            &f.levels,
            &f.tracker,
            &settings,
        )
        .await
        .unwrap();

        assert!(session.answer(Outcome::Correct).await.unwrap().completed_now);
        let err = session.answer(Outcome::Correct).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::SessionComplete { .. })
        ));
        assert_eq!(session.summary().attempts, 1);
    }

    /// Memory store whose writes can be switched to fail.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: AtomicBool,
    }

    #[async_trait]
    impl KeyValueStore for FlakyStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::Locked);
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn failed_level_write_leaves_session_unchanged() {
        let store = Arc::new(FlakyStore::default());
        let levels = DifficultyLevels::new(Arc::clone(&store));
        let tracker = CompletionTracker::new(
            Arc::clone(&store),
            FixedClock::new(NaiveDate::from_ymd_opt(2026, 10, 12).unwrap()),
        );
        let mut session = ActivitySession::begin(
            ActivityId::Colors,
            AgeBand::ThreeToFour,
            &levels,
            &tracker,
            &SessionSettings::default(),
        )
        .await
        .unwrap();

        session.answer(Outcome::Correct).await.unwrap();
        session.answer(Outcome::Correct).await.unwrap();

        store.fail_writes.store(true, Ordering::SeqCst);
        let err = session.answer(Outcome::Correct).await.unwrap_err();
        assert!(matches!(err, CoreError::Storage(StorageError::Locked)));

        let summary = session.summary();
        assert_eq!(summary.attempts, 2);
        assert_eq!(summary.correct, 2);
        assert_eq!(session.level(), Difficulty::MIN);
        assert_eq!(session.progress().count, 2);

        store.fail_writes.store(false, Ordering::SeqCst);
        let report = session.answer(Outcome::Correct).await.unwrap();
        assert_eq!(report.level, Difficulty::MID);
        assert_eq!(levels.level_for(ActivityId::Colors).await.unwrap(), Difficulty::MID);
        assert_eq!(session.summary().attempts, 3);
    }

    #[tokio::test]
    async fn failed_completion_write_can_be_retried() {
        let store = Arc::new(FlakyStore::default());
        let levels = DifficultyLevels::new(Arc::clone(&store));
        let tracker = CompletionTracker::new(
            Arc::clone(&store),
            FixedClock::new(NaiveDate::from_ymd_opt(2026, 10, 12).unwrap()),
        );
        let settings = SessionSettings {
            correct_answers_to_complete: 1,
        };
        let mut session = ActivitySession::begin(
            ActivityId::Sorting,
            AgeBand::FiveToSix,
            &levels,
            &tracker,
            &settings,
        )
        .await
        .unwrap();

        store.fail_writes.store(true, Ordering::SeqCst);
        assert!(session.answer(Outcome::Correct).await.is_err());
        assert!(!session.is_complete());
        assert_eq!(session.remaining(), 1);

        store.fail_writes.store(false, Ordering::SeqCst);
        assert!(session.answer(Outcome::Correct).await.unwrap().completed_now);
        assert!(tracker.is_completed_today().await.unwrap());
    }

    #[tokio::test]
    async fn wrong_answers_never_complete() {
        let f = fixture();
        let mut session = ActivitySession::begin(
            ActivityId::Numbers,
            AgeBand::ThreeToFour,
            &f.levels,
            &f.tracker,
            &SessionSettings::default(),
        )
        .await
        .unwrap();
        for _ in 0..10 {
            assert!(!session.answer(Outcome::Wrong).await.unwrap().completed_now);
        }
        assert!(f.store.get(keys::COMPLETED_DATE).await.unwrap().is_none());
        assert!(f.store.get(keys::ACTIVITY_LEVELS).await.unwrap().is_none());
    }
}
