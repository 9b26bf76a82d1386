//! Application facade: every core component over one shared store and
//! clock, the way the home screen and parent panel use them.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::activity::{ActivityId, AgeBand, Difficulty};
use crate::clock::Clock;
use crate::completion::CompletionTracker;
use crate::difficulty::DifficultyLevels;
use crate::error::{CoreError, StorageError};
use crate::preferences::Preferences;
use crate::schedule::{day_name_for_activity, ActivityScheduler};
use crate::session::ActivitySession;
use crate::storage::{KeyValueStore, SessionSettings};

/// Everything the home screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodayOverview {
    pub date: NaiveDate,
    pub activity: ActivityId,
    pub activity_name: &'static str,
    pub day_name: &'static str,
    pub completed: bool,
    pub age_band: AgeBand,
    pub level: Difficulty,
    pub sound_enabled: bool,
}

pub struct Solimo<S, C>
where
    S: KeyValueStore + Clone,
    C: Clock + Clone,
{
    clock: C,
    scheduler: ActivityScheduler<C>,
    tracker: CompletionTracker<S, C>,
    levels: DifficultyLevels<S>,
    preferences: Preferences<S>,
    settings: SessionSettings,
}

impl<S, C> Solimo<S, C>
where
    S: KeyValueStore + Clone,
    C: Clock + Clone,
{
    pub fn new(store: S, clock: C, settings: SessionSettings) -> Self {
        Self {
            scheduler: ActivityScheduler::new(clock.clone()),
            tracker: CompletionTracker::new(store.clone(), clock.clone()),
            levels: DifficultyLevels::new(store.clone()),
            preferences: Preferences::new(store),
            clock,
            settings,
        }
    }

    pub fn scheduler(&self) -> &ActivityScheduler<C> {
        &self.scheduler
    }

    pub fn tracker(&self) -> &CompletionTracker<S, C> {
        &self.tracker
    }

    pub fn levels(&self) -> &DifficultyLevels<S> {
        &self.levels
    }

    pub fn preferences(&self) -> &Preferences<S> {
        &self.preferences
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// # Errors
    /// Propagates store failures.
    pub async fn today(&self) -> Result<TodayOverview, StorageError> {
        let activity = self.scheduler.todays_activity_id();
        Ok(TodayOverview {
            date: self.clock.today(),
            activity,
            activity_name: activity.display_name(),
            day_name: day_name_for_activity(activity),
            completed: self.tracker.is_completed_today().await?,
            age_band: self.preferences.age_band().await?,
            level: self.levels.level_for(activity).await?,
            sound_enabled: self.preferences.sound_enabled().await?,
        })
    }

    /// Start a session for `activity` with the saved age band.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn start_session(
        &self,
        activity: ActivityId,
    ) -> Result<ActivitySession<'_, S, C>, CoreError> {
        let age_band = self.preferences.age_band().await?;
        ActivitySession::begin(activity, age_band, &self.levels, &self.tracker, &self.settings)
            .await
    }

    /// # Errors
    /// Propagates store failures.
    pub async fn start_todays_session(&self) -> Result<ActivitySession<'_, S, C>, CoreError> {
        self.start_session(self.scheduler.todays_activity_id()).await
    }

    /// Parent-panel reset: clears today's completion and every level.
    /// Age band and sound are kept.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn reset_progress(&self) -> Result<(), StorageError> {
        self.tracker.clear_todays_completion().await?;
        self.levels.clear().await?;
        info!("progress reset");
        Ok(())
    }
}
