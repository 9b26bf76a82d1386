//! Static prompt tables keyed by activity, age band and level.
//!
//! Lookup falls back to the level-1 list when the requested level has no
//! prompts, so a child promoted past the authored content still gets
//! questions.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activity::{ActivityId, AgeBand, Difficulty};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptOption {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub correct: bool,
}

/// A single tap-to-answer question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub instruction: String,
    pub options: Vec<PromptOption>,
}

impl Prompt {
    pub fn is_correct(&self, option_id: &str) -> bool {
        self.options
            .iter()
            .any(|opt| opt.id == option_id && opt.correct)
    }

    pub fn correct_ids(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|opt| opt.correct)
            .map(|opt| opt.id.as_str())
            .collect()
    }
}

type ContentKey = (ActivityId, AgeBand, Difficulty);

#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    prompts: HashMap<ContentKey, Vec<Prompt>>,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append prompts to a (activity, band, level) slot.
    pub fn insert(
        &mut self,
        activity: ActivityId,
        band: AgeBand,
        level: Difficulty,
        prompts: impl IntoIterator<Item = Prompt>,
    ) {
        self.prompts
            .entry((activity, band, level))
            .or_default()
            .extend(prompts);
    }

    pub fn prompts(&self, activity: ActivityId, band: AgeBand, level: Difficulty) -> &[Prompt] {
        let exact = self.slot(activity, band, level);
        if !exact.is_empty() {
            return exact;
        }
        self.slot(activity, band, Difficulty::MIN)
    }

    fn slot(&self, activity: ActivityId, band: AgeBand, level: Difficulty) -> &[Prompt] {
        self.prompts
            .get(&(activity, band, level))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn random_prompt<R: Rng + ?Sized>(
        &self,
        activity: ActivityId,
        band: AgeBand,
        level: Difficulty,
        rng: &mut R,
    ) -> Option<&Prompt> {
        self.prompts(activity, band, level).choose(rng)
    }

    /// The colors tables. Other activities build their rounds in-session.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        let l1 = Difficulty::MIN;
        let l2 = Difficulty::MID;
        let l3 = Difficulty::MAX;

        use ActivityId::Colors;
        use AgeBand::{FiveToSix, SevenToEight, ThreeToFour};

        catalog.insert(
            Colors,
            ThreeToFour,
            l1,
            [
                pick("colors-3-4-l1-1", "Find the RED color", &["🔴", "🟡", "🟢"], 0),
                pick("colors-3-4-l1-2", "Find the BLUE color", &["🟡", "🔵", "🔴"], 1),
                pick("colors-3-4-l1-3", "Find the YELLOW color", &["🟡", "🟢", "🔵"], 0),
            ],
        );
        catalog.insert(
            Colors,
            ThreeToFour,
            l2,
            [
                pick("colors-3-4-l2-1", "Which one is GREEN?", &["🟡", "🟢", "🔴"], 1),
                pick("colors-3-4-l2-2", "Find the PURPLE color", &["🔴", "🟣", "🟡"], 1),
            ],
        );
        catalog.insert(
            Colors,
            ThreeToFour,
            l3,
            [pick("colors-3-4-l3-1", "Find the ORANGE color", &["🟠", "🟣", "🟢"], 0)],
        );

        catalog.insert(
            Colors,
            FiveToSix,
            l1,
            [
                pick("colors-5-6-l1-1", "Match the colors: Red", &["🎨", "🟡", "🟢"], 0),
                pick("colors-5-6-l1-2", "What color is the apple?", &["🟡", "🔴", "🟢"], 1),
            ],
        );
        catalog.insert(
            Colors,
            FiveToSix,
            l2,
            [pick("colors-5-6-l2-1", "What color is the banana?", &["🟡", "🔴", "🟢"], 0)],
        );
        catalog.insert(
            Colors,
            FiveToSix,
            l3,
            [pick("colors-5-6-l3-1", "Mix red and blue - what color?", &["🟣", "🟡", "🟢"], 0)],
        );

        catalog.insert(
            Colors,
            SevenToEight,
            l1,
            [pick("colors-7-8-l1-1", "Name this primary color", &["Red", "Orange", "Pink"], 0)],
        );
        catalog.insert(
            Colors,
            SevenToEight,
            l2,
            [pick("colors-7-8-l2-1", "Red + Yellow = ?", &["Orange", "Purple", "Green"], 0)],
        );
        catalog.insert(
            Colors,
            SevenToEight,
            l3,
            [pick("colors-7-8-l3-1", "What is a warm color?", &["Red", "Blue", "Green"], 0)],
        );

        catalog
    }
}

/// Single-answer prompt with options `opt1..optN`.
fn pick(id: &str, instruction: &str, labels: &[&str], correct: usize) -> Prompt {
    Prompt {
        id: id.to_string(),
        instruction: instruction.to_string(),
        options: labels
            .iter()
            .enumerate()
            .map(|(idx, label)| PromptOption {
                id: format!("opt{}", idx + 1),
                label: (*label).to_string(),
                correct: idx == correct,
            })
            .collect(),
    }
}
