pub mod completion;
pub mod config;
pub mod difficulty;
pub mod play;
pub mod settings;
pub mod today;

use std::sync::Arc;

use solimo_core::{Config, Solimo, SqliteStore, SystemClock};
use tracing::debug;

pub type App = Solimo<Arc<SqliteStore>, SystemClock>;

/// Open the configured database with the local system clock.
pub fn open_app(config: &Config) -> Result<App, Box<dyn std::error::Error>> {
    let path = config.database_path()?;
    debug!(path = %path.display(), "opening database");
    let store = SqliteStore::open(&path)?;
    Ok(Solimo::new(
        Arc::new(store),
        SystemClock,
        config.session.clone(),
    ))
}
