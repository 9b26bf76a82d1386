//! Spoken feedback: message selection, voice presets and the narrator port.
//!
//! Message choice is a pure function of the outcome kind, the item label
//! and a seedable RNG, so runs can be replayed exactly.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::activity::ActivityId;

/// Spoken once the day's activity is finished.
pub const COMPLETION_MESSAGE: &str = "Wonderful! Great job! See you tomorrow!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    /// Child picked the right answer
    Success,
    /// Child picked a wrong answer; the label is what they picked
    Retry,
}

/// `{label}` is replaced with the item the child tapped.
const SUCCESS_TEMPLATES: [&str; 6] = [
    "{label}! Yay!",
    "{label}! Yes!",
    "{label}! Nice!",
    "{label}! Awesome!",
    "{label}! Cool!",
    "{label}! Wow!",
];

const RETRY_TEMPLATES: [&str; 5] = [
    "That's {label}. Try again!",
    "Nope! That's {label}. Go!",
    "That's {label}. Keep trying!",
    "Oops! That's {label}. Once more!",
    "That is {label}. You can do it!",
];

impl FeedbackKind {
    fn templates(&self) -> &'static [&'static str] {
        match self {
            FeedbackKind::Success => &SUCCESS_TEMPLATES,
            FeedbackKind::Retry => &RETRY_TEMPLATES,
        }
    }

    /// Voice preset that goes with this kind of message.
    pub fn voice(&self) -> VoiceSettings {
        match self {
            FeedbackKind::Success => VoiceSettings::SUCCESS,
            FeedbackKind::Retry => VoiceSettings::ERROR,
        }
    }

    /// Number of distinct templates for this kind.
    pub fn template_count(&self) -> usize {
        self.templates().len()
    }
}

/// Picks encouragement messages.
pub struct FeedbackPicker {
    rng: Mcg128Xsl64,
}

impl FeedbackPicker {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    pub fn message(&mut self, kind: FeedbackKind, label: &str) -> String {
        let templates = kind.templates();
        let idx = self.rng.gen_range(0..templates.len());
        templates[idx].replace("{label}", label)
    }

    /// Underlying RNG, shared with prompt selection so one seed drives a run.
    pub fn rng(&mut self) -> &mut Mcg128Xsl64 {
        &mut self.rng
    }
}

/// Text-to-speech pitch and rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub pitch: f32,
    pub rate: f32,
}

impl VoiceSettings {
    pub const QUESTION: VoiceSettings = VoiceSettings { pitch: 1.5, rate: 0.95 };
    pub const SUCCESS: VoiceSettings = VoiceSettings { pitch: 1.65, rate: 0.95 };
    pub const ERROR: VoiceSettings = VoiceSettings { pitch: 1.45, rate: 0.9 };
    pub const WELCOME: VoiceSettings = VoiceSettings { pitch: 1.4, rate: 0.85 };
}

/// Greeting for the home screen.
pub fn welcome_message(activity: ActivityId) -> String {
    format!(
        "Hi there! Today's adventure is {}. Ready to play?",
        activity.display_name()
    )
}

/// Text-to-speech backend.
pub trait Narrator: Send + Sync {
    fn speak(
        &self,
        text: &str,
        voice: VoiceSettings,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(()) // default no-op
    }
}

/// Narrator that says nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn speak(
        &self,
        _text: &str,
        _voice: VoiceSettings,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}

/// Wraps a narrator with the sound preference. Speech failures never reach
/// the caller.
pub struct GatedNarrator<N: Narrator> {
    inner: N,
    enabled: bool,
}

impl<N: Narrator> GatedNarrator<N> {
    pub fn new(inner: N, enabled: bool) -> Self {
        Self { inner, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn say(&self, text: &str, voice: VoiceSettings) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.inner.speak(text, voice) {
            warn!(error = %e, "speech failed");
        }
    }

    pub fn stop(&self) {
        if let Err(e) = self.inner.stop() {
            warn!(error = %e, "stopping speech failed");
        }
    }
}
