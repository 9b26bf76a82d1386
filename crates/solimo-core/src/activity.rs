//! Activity identifiers, age bands and difficulty levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One of the seven daily mini-game categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityId {
    Colors,
    Shapes,
    Numbers,
    Patterns,
    Memory,
    Sorting,
    Logic,
}

impl ActivityId {
    /// Every activity, in weekday order starting Monday.
    pub const ALL: [ActivityId; 7] = [
        ActivityId::Colors,
        ActivityId::Shapes,
        ActivityId::Numbers,
        ActivityId::Patterns,
        ActivityId::Memory,
        ActivityId::Sorting,
        ActivityId::Logic,
    ];

    /// Stable identifier used as a storage key and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityId::Colors => "colors",
            ActivityId::Shapes => "shapes",
            ActivityId::Numbers => "numbers",
            ActivityId::Patterns => "patterns",
            ActivityId::Memory => "memory",
            ActivityId::Sorting => "sorting",
            ActivityId::Logic => "logic",
        }
    }

    /// Human-readable name shown to the child.
    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityId::Colors => "Colors",
            ActivityId::Shapes => "Shapes",
            ActivityId::Numbers => "Numbers",
            ActivityId::Patterns => "Patterns",
            ActivityId::Memory => "Memory",
            ActivityId::Sorting => "Sorting",
            ActivityId::Logic => "Logic",
        }
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ActivityId::ALL
            .into_iter()
            .find(|id| id.as_str() == needle)
            .ok_or_else(|| ValidationError::UnknownActivity(s.to_string()))
    }
}

/// Coarse age grouping that selects question content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum AgeBand {
    #[default]
    #[serde(rename = "3-4")]
    ThreeToFour,
    #[serde(rename = "5-6")]
    FiveToSix,
    #[serde(rename = "7-8")]
    SevenToEight,
}

impl AgeBand {
    pub const ALL: [AgeBand; 3] = [AgeBand::ThreeToFour, AgeBand::FiveToSix, AgeBand::SevenToEight];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBand::ThreeToFour => "3-4",
            AgeBand::FiveToSix => "5-6",
            AgeBand::SevenToEight => "7-8",
        }
    }

    /// Number of items shown by memory-style games for this band.
    pub fn memory_item_count(&self) -> usize {
        match self {
            AgeBand::ThreeToFour => 3,
            AgeBand::FiveToSix => 4,
            AgeBand::SevenToEight => 6,
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeBand {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgeBand::ALL
            .into_iter()
            .find(|band| band.as_str() == s.trim())
            .ok_or_else(|| ValidationError::UnknownAgeBand(s.to_string()))
    }
}

/// Difficulty level, always within 1..=3.
///
/// Values outside that range are rejected at construction, so transitions
/// never need to clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: Difficulty = Difficulty(1);
    pub const MID: Difficulty = Difficulty(2);
    pub const MAX: Difficulty = Difficulty(3);

    /// # Errors
    /// Returns [`ValidationError::DifficultyOutOfRange`] unless `1 <= level <= 3`.
    pub fn new(level: u8) -> Result<Self, ValidationError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&level) {
            Ok(Self(level))
        } else {
            Err(ValidationError::DifficultyOutOfRange {
                value: i64::from(level),
            })
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Next level up, or `None` at the ceiling.
    pub fn raised(&self) -> Option<Self> {
        (*self < Self::MAX).then(|| Self(self.0 + 1))
    }

    /// Next level down, or `None` at the floor.
    pub fn lowered(&self) -> Option<Self> {
        (*self > Self::MIN).then(|| Self(self.0 - 1))
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| ValidationError::DifficultyOutOfRange { value })
            .and_then(Self::new)
    }
}

impl From<Difficulty> for u8 {
    fn from(level: Difficulty) -> Self {
        level.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidDifficulty(s.to_string()))?;
        Self::try_from(value)
    }
}
