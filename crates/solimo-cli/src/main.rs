use clap::{Parser, Subcommand};
use solimo_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "solimo", version, about = "Solimo daily learning game CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's activity and progress
    Today {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Upcoming activities
    Week {
        /// Number of days to show (1-366)
        #[arg(long, default_value = "7", value_parser = clap::value_parser!(u64).range(1..=366))]
        days: u64,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Daily completion gate
    Completion {
        #[command(subcommand)]
        action: commands::completion::CompletionAction,
    },
    /// Per-activity difficulty levels
    Difficulty {
        #[command(subcommand)]
        action: commands::difficulty::DifficultyAction,
    },
    /// Parent settings (age band, sound)
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Clear today's completion and all difficulty levels
    Reset,
    /// Play a session
    Play(commands::play::PlayArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(command: Commands, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Today { json } => commands::today::run_today(&config, json).await,
        Commands::Week { days, json } => commands::today::run_week(days, json),
        Commands::Completion { action } => commands::completion::run(action, &config).await,
        Commands::Difficulty { action } => commands::difficulty::run(action, &config).await,
        Commands::Settings { action } => commands::settings::run(action, &config).await,
        Commands::Reset => commands::settings::reset(&config).await,
        Commands::Play(args) => commands::play::run(args, &config).await,
        Commands::Config { action } => commands::config::run(action),
    }
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_tracing(&config);

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Box::<dyn std::error::Error>::from)
        .and_then(|runtime| runtime.block_on(dispatch(cli.command, config)));

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
