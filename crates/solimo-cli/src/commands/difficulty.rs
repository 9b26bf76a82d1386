use clap::Subcommand;
use solimo_core::{ActivityId, Config, Difficulty};

use super::open_app;

#[derive(Subcommand)]
pub enum DifficultyAction {
    /// Current level for an activity
    Get {
        /// Activity id (colors, shapes, numbers, patterns, memory, sorting, logic)
        activity: ActivityId,
    },
    /// Set the level for an activity
    Set {
        activity: ActivityId,
        /// Level 1-3
        level: Difficulty,
    },
    /// Levels for every activity
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(
    action: DifficultyAction,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app(config)?;
    let levels = app.levels();

    match action {
        DifficultyAction::Get { activity } => {
            println!("{}", levels.level_for(activity).await?);
        }
        DifficultyAction::Set { activity, level } => {
            levels.set_level(activity, level).await?;
            println!("ok");
        }
        DifficultyAction::List { json } => {
            let all = levels.all_levels().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&all)?);
            } else {
                for (activity, level) in all {
                    println!("{:<9} {}", activity.as_str(), level);
                }
            }
        }
    }
    Ok(())
}
