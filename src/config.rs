//! Runtime configuration for the schedule pipeline.
//!
//! Every field has a built-in default, so running without a config file
//! tracks KK Partizan across the ABA League (FlashScore) and the Euroleague
//! (games API). A YAML file passed with `--config` overrides any subset.
//!
//! ```yaml
//! team: Partizan
//! team_short_code: PTZ
//! cache_ttl_hours: 24
//! ```

use serde::Deserialize;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display name of the tracked team; matched by substring.
    pub team: String,
    /// FlashScore participant code used by the coarse block pre-filter.
    pub team_short_code: String,
    /// Team code passed to the Euroleague API as `teamCode`.
    pub team_code_api: String,
    pub flashscore_fixtures_url: String,
    pub flashscore_results_url: String,
    pub euroleague_api_url: String,
    /// Competition label for FlashScore records that don't carry one.
    pub flashscore_competition: String,
    /// Competition label for every Euroleague API record.
    pub euroleague_competition: String,
    pub cache_ttl_hours: u64,
    pub game_duration_hours: i64,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub calendar_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            team: "Partizan".to_string(),
            team_short_code: "PTZ".to_string(),
            team_code_api: "PAR".to_string(),
            flashscore_fixtures_url:
                "https://www.flashscore.com/basketball/europe/aba-league/fixtures/".to_string(),
            flashscore_results_url:
                "https://www.flashscore.com/basketball/europe/aba-league/results/".to_string(),
            euroleague_api_url: "https://feeds.incrowdsports.com/provider/euroleague-feeds/v2/competitions/E/seasons/E2025/games".to_string(),
            flashscore_competition: "ABA League".to_string(),
            euroleague_competition: "Euroleague".to_string(),
            cache_ttl_hours: 48,
            game_duration_hours: 2,
            http_timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            calendar_name: "KK Partizan Schedule".to_string(),
        }
    }
}

impl Config {
    /// Load from a YAML file, or fall back to defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            info!("No config file given; using built-in defaults");
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&raw)?;
        info!(path = %path.display(), team = %config.team, "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, Box<dyn Error>> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours * 60 * 60)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
