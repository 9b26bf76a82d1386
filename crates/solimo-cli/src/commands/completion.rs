use clap::Subcommand;
use solimo_core::Config;

use super::open_app;

#[derive(Subcommand)]
pub enum CompletionAction {
    /// Whether today's activity is done
    Status,
    /// Mark today's activity as done
    Mark,
    /// Clear today's completion
    Clear,
}

pub async fn run(
    action: CompletionAction,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app(config)?;
    let tracker = app.tracker();

    match action {
        CompletionAction::Status => {
            if tracker.is_completed_today().await? {
                println!("completed");
            } else {
                println!("not completed");
            }
        }
        CompletionAction::Mark => {
            tracker.mark_completed_today().await?;
            println!("ok");
        }
        CompletionAction::Clear => {
            tracker.clear_todays_completion().await?;
            println!("ok");
        }
    }
    Ok(())
}
