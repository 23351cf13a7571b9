//! Command-line interface definitions for partizan_ics.
//!
//! Each invocation runs one refresh cycle. Schedule it with cron or a systemd
//! timer and serve the resulting `.ics` file with any static file server.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the schedule refresher.
///
/// # Examples
///
/// ```sh
/// # Use defaults: data/cache.json and data/calendar.ics
/// partizan_ics
///
/// # Force a re-fetch and also write a JSON listing
/// partizan_ics --refresh --games-json ./public/games.json
///
/// # Custom config file
/// partizan_ics -c ./config.yaml -o ./public/partizan.ics
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path of the cached schedule snapshot
    #[arg(long, default_value = "data/cache.json")]
    pub cache: PathBuf,

    /// Output path for the iCalendar feed
    #[arg(short = 'o', long, default_value = "data/calendar.ics")]
    pub calendar: PathBuf,

    /// Also write the schedule as a JSON listing to this path
    #[arg(short, long)]
    pub games_json: Option<PathBuf>,

    /// Ignore a fresh cache and fetch every source again
    #[arg(short, long)]
    pub refresh: bool,

    /// Override the tracked team's display name
    #[arg(long, env = "TEAM")]
    pub team: Option<String>,
}
