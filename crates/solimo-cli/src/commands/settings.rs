use clap::{Subcommand, ValueEnum};
use solimo_core::{AgeBand, Config};

use super::open_app;

#[derive(Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show or change the age band (3-4, 5-6, 7-8)
    AgeBand {
        /// New age band; omit to print the current one
        band: Option<AgeBand>,
    },
    /// Show or change voice narration
    Sound {
        /// on or off; omit to print the current state
        state: Option<Toggle>,
    },
}

pub async fn run(
    action: SettingsAction,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app(config)?;
    let prefs = app.preferences();

    match action {
        SettingsAction::AgeBand { band: Some(band) } => {
            prefs.set_age_band(band).await?;
            println!("ok");
        }
        SettingsAction::AgeBand { band: None } => {
            println!("{}", prefs.age_band().await?);
        }
        SettingsAction::Sound { state: Some(state) } => {
            prefs.set_sound_enabled(matches!(state, Toggle::On)).await?;
            println!("ok");
        }
        SettingsAction::Sound { state: None } => {
            let enabled = prefs.sound_enabled().await?;
            println!("{}", if enabled { "on" } else { "off" });
        }
    }
    Ok(())
}

pub async fn reset(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    open_app(config)?.reset_progress().await?;
    println!("progress reset");
    Ok(())
}
