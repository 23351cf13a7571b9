//! JSON listing of the current schedule.
//!
//! Shape of the document, for consumers that want the schedule without
//! parsing iCalendar:
//!
//! ```json
//! { "count": 2, "games": [ ... ] }
//! ```

use crate::models::Game;
use serde_json::json;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write the games listing to `path`, creating parent directories.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_games(games: &[Game], path: &Path) -> Result<(), Box<dyn Error>> {
    let listing = json!({
        "count": games.len(),
        "games": games,
    });
    let json = serde_json::to_string_pretty(&listing)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create listing dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!(count = games.len(), "Wrote games listing");
    Ok(())
}
