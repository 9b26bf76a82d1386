//! Streak-based adaptive difficulty.
//!
//! Three correct answers in a row move the level up, two wrong answers in
//! a row move it down. Streaks are mutually exclusive: an answer of one
//! kind always zeroes the other streak.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::activity::Difficulty;

/// Consecutive correct answers needed to promote.
pub const PROMOTE_AFTER_CORRECT: u32 = 3;
/// Consecutive wrong answers needed to demote.
pub const DEMOTE_AFTER_WRONG: u32 = 2;

/// What the current streak is counting towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTarget {
    /// Correct streak against [`PROMOTE_AFTER_CORRECT`].
    Promotion,
    /// At the ceiling: wrong streak against [`DEMOTE_AFTER_WRONG`].
    Demotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub count: u32,
    pub target: u32,
    pub toward: ProgressTarget,
}

/// Per-session controller state. Not persisted; callers write back level
/// changes themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyController {
    correct_streak: u32,
    wrong_streak: u32,
    current_level: Difficulty,
}

impl DifficultyController {
    pub fn new(start_level: Difficulty) -> Self {
        Self {
            correct_streak: 0,
            wrong_streak: 0,
            current_level: start_level,
        }
    }

    pub fn current_level(&self) -> Difficulty {
        self.current_level
    }

    pub fn correct_streak(&self) -> u32 {
        self.correct_streak
    }

    pub fn wrong_streak(&self) -> u32 {
        self.wrong_streak
    }

    pub fn record_correct(&mut self) {
        self.correct_streak += 1;
        self.wrong_streak = 0;
    }

    pub fn record_wrong(&mut self) {
        self.wrong_streak += 1;
        self.correct_streak = 0;
    }

    /// Apply the adjustment rule. Returns the new level when it changed.
    ///
    /// Promotion is checked before demotion.
    pub fn evaluate_adjustment(&mut self) -> Option<Difficulty> {
        if self.correct_streak >= PROMOTE_AFTER_CORRECT {
            if let Some(next) = self.current_level.raised() {
                return Some(self.move_to(next));
            }
        }

        if self.wrong_streak >= DEMOTE_AFTER_WRONG {
            if let Some(next) = self.current_level.lowered() {
                return Some(self.move_to(next));
            }
        }

        None
    }

    fn move_to(&mut self, level: Difficulty) -> Difficulty {
        debug!(from = %self.current_level, to = %level, "difficulty adjusted");
        self.current_level = level;
        self.reset_streaks();
        level
    }

    fn reset_streaks(&mut self) {
        self.correct_streak = 0;
        self.wrong_streak = 0;
    }

    pub fn progress_snapshot(&self) -> ProgressSnapshot {
        if self.current_level < Difficulty::MAX {
            ProgressSnapshot {
                count: self.correct_streak,
                target: PROMOTE_AFTER_CORRECT,
                toward: ProgressTarget::Promotion,
            }
        } else {
            ProgressSnapshot {
                count: self.wrong_streak,
                target: DEMOTE_AFTER_WRONG,
                toward: ProgressTarget::Demotion,
            }
        }
    }
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}
