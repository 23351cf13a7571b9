//! On-disk snapshot of the last aggregated schedule.
//!
//! The snapshot is pretty-printed JSON:
//!
//! ```json
//! { "timestamp": 1760868000, "games": [ { "competition": "ABA League", ... } ] }
//! ```
//!
//! A snapshot older than the configured TTL is ignored on load.

use crate::models::{CachedSchedule, Game};
use chrono::Utc;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, instrument};

impl CachedSchedule {
    /// Whether the snapshot was generated less than `ttl` before `now` (unix seconds).
    pub fn is_fresh(&self, ttl: Duration, now: i64) -> bool {
        self.timestamp > 0 && now.saturating_sub(self.timestamp) < ttl.as_secs() as i64
    }
}

/// Load the cached games if a fresh snapshot exists.
///
/// Returns `Ok(None)` for a missing or stale snapshot.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load(path: &Path, ttl: Duration) -> Result<Option<Vec<Game>>, Box<dyn Error>> {
    if !fs::try_exists(path).await? {
        debug!("No cached schedule");
        return Ok(None);
    }

    let raw = fs::read_to_string(path).await?;
    let snapshot: CachedSchedule = serde_json::from_str(&raw)?;

    if snapshot.is_fresh(ttl, Utc::now().timestamp()) {
        info!(count = snapshot.games.len(), generated_at = snapshot.timestamp, "Using cached schedule");
        Ok(Some(snapshot.games))
    } else {
        info!(generated_at = snapshot.timestamp, "Cached schedule is stale");
        Ok(None)
    }
}

/// Store games with the current time as generation timestamp.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = games.len()))]
pub async fn save(path: &Path, games: &[Game]) -> Result<(), Box<dyn Error>> {
    let snapshot = CachedSchedule {
        timestamp: Utc::now().timestamp(),
        games: games.to_vec(),
    };
    let json = serde_json::to_string_pretty(&snapshot)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, json).await?;

    info!("Saved schedule cache");
    Ok(())
}
