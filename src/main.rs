//! # partizan_ics
//!
//! Aggregates KK Partizan's upcoming games from FlashScore (ABA League) and
//! the Euroleague games API into one deduplicated, chronologically sorted
//! schedule and publishes it as a subscribable iCalendar feed.
//!
//! ## Usage
//!
//! ```sh
//! partizan_ics -o ./public/calendar.ics
//! ```
//!
//! ## Architecture
//!
//! One invocation is one refresh cycle:
//! 1. **Cache**: Reuse the last snapshot if it is younger than the TTL
//! 2. **Aggregation**: Fetch all sources concurrently, normalize, dedupe,
//!    drop past games, sort
//! 3. **Fallback**: Substitute a clearly labeled synthetic schedule when no
//!    source produced anything
//! 4. **Output**: Save the snapshot, write the `.ics` feed and optionally a
//!    JSON listing

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod fallback;
mod models;
mod normalize;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;
mod venues;

use cli::Cli;
use config::Config;
use models::Game;
use outputs::{cache, calendar, json};
use scrapers::HttpFetcher;
use utils::ensure_writable_dir;

/// Aggregate live sources, substitute the fallback when empty, and save the
/// snapshot. Cache write failures are logged, not fatal.
#[instrument(level = "info", skip_all)]
async fn refresh_schedule(config: &Config, cache_path: &Path) -> Result<Vec<Game>, Box<dyn Error>> {
    let fetcher = HttpFetcher::new(config)?;
    let mut games = pipeline::aggregate(&fetcher, config).await;

    if games.is_empty() {
        warn!("No games fetched from live sources; using fallback schedule");
        games = fallback::mock_schedule(Local::now().naive_local(), config);
    }

    if let Err(e) = cache::save(cache_path, &games).await {
        error!(error = %e, "Failed to save schedule cache");
    }

    info!(count = games.len(), "Schedule refreshed");
    Ok(games)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("partizan_ics starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(team) = args.team.clone() {
        info!(%team, "Tracked team overridden from command line");
        config.team = team;
    }

    // Early check: fail on a bad output path before any network traffic
    for path in [Some(&args.cache), Some(&args.calendar), args.games_json.as_ref()]
        .into_iter()
        .flatten()
    {
        let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            continue;
        };
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir.display(),
                error = %e,
                "Output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Cached snapshot or fresh aggregation ----
    let cached = if args.refresh {
        info!("Refresh requested; skipping cache");
        None
    } else {
        match cache::load(&args.cache, config.cache_ttl()).await {
            Ok(games) => games,
            Err(e) => {
                warn!(error = %e, "Could not read schedule cache; refreshing");
                None
            }
        }
    };

    let games = match cached {
        Some(games) => games,
        None => refresh_schedule(&config, &args.cache).await?,
    };

    // ---- Calendar output ----
    if let Err(e) = calendar::write_calendar(&games, &config, &args.calendar).await {
        error!(path = %args.calendar.display(), error = %e, "Failed to write calendar");
        return Err(e);
    }

    // ---- Optional JSON listing ----
    if let Some(ref games_json) = args.games_json {
        if let Err(e) = json::write_games(&games, games_json).await {
            error!(path = %games_json.display(), error = %e, "Failed to write games listing");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        games = games.len(),
        calendar = %args.calendar.display(),
        "Execution complete"
    );

    Ok(())
}
