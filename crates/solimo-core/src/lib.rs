//! # Solimo Core Library
//!
//! Business logic for Solimo, a daily learning game for young children.
//! One activity per day is picked by weekday; the child answers questions
//! until the day's target is met, while the difficulty adapts to how they
//! are doing. The CLI and any graphical front end are thin layers over
//! this crate.
//!
//! ## Architecture
//!
//! - **Scheduler**: pure weekday → activity table
//! - **Completion tracker**: "done today" gate on the local calendar day
//! - **Difficulty controller**: streak state machine over levels 1–3
//! - **Storage**: async key-value port with SQLite and in-memory backends,
//!   plus TOML configuration
//!
//! ## Key Components
//!
//! - [`Solimo`]: facade wiring everything over one store and clock
//! - [`DifficultyController`]: adaptive difficulty state machine
//! - [`CompletionTracker`]: daily completion gate
//! - [`KeyValueStore`]: persistence port

pub mod activity;
pub mod app;
pub mod clock;
pub mod completion;
pub mod content;
pub mod difficulty;
pub mod error;
pub mod feedback;
pub mod preferences;
pub mod schedule;
pub mod session;
pub mod storage;

pub use activity::{ActivityId, AgeBand, Difficulty};
pub use app::{Solimo, TodayOverview};
pub use clock::{local_date_string, Clock, FixedClock, SystemClock};
pub use completion::CompletionTracker;
pub use content::{ContentCatalog, Prompt, PromptOption};
pub use difficulty::{DifficultyController, DifficultyLevels, ProgressSnapshot, ProgressTarget};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use feedback::{
    FeedbackKind, FeedbackPicker, GatedNarrator, Narrator, SilentNarrator, VoiceSettings,
};
pub use preferences::Preferences;
pub use schedule::{
    activity_for_date, activity_for_day_index, activity_for_day_of_week, activity_name_for,
    day_name_for_activity, ActivityScheduler, PlannedDay,
};
pub use session::{ActivitySession, AnswerReport, LevelChange, Outcome, SessionSummary};
pub use storage::{Config, KeyValueStore, MemoryStore, SqliteStore};
