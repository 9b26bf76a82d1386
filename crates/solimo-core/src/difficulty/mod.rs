mod controller;
mod levels;

pub use controller::{
    DifficultyController, ProgressSnapshot, ProgressTarget, DEMOTE_AFTER_WRONG,
    PROMOTE_AFTER_CORRECT,
};
pub use levels::DifficultyLevels;
