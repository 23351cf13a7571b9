//! Data models for scheduled games and their cached representation.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Game`]: The canonical, source-agnostic record of one scheduled game
//! - [`Source`]: Provenance tag naming the upstream that produced a record
//! - [`CachedSchedule`]: The on-disk snapshot of the last aggregated schedule
//!
//! Field names serialize as camelCase so the cache file and the games listing
//! keep the shape calendar and JSON consumers already expect.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// `date` field format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// `time` field format.
pub const TIME_FORMAT: &str = "%H:%M";

/// Which upstream produced a [`Game`].
///
/// Used only for traceability; never part of deduplication or ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Source {
    /// Decoded from the FlashScore micro-format blob.
    #[serde(rename = "flashscore")]
    Flashscore,
    /// Normalized from the Euroleague games API.
    #[serde(rename = "euroleague-api")]
    EuroleagueApi,
    /// Synthetic schedule produced when no live data is available.
    #[serde(rename = "mock")]
    Mock,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Source::Flashscore => "flashscore",
            Source::EuroleagueApi => "euroleague-api",
            Source::Mock => "mock",
        };
        f.write_str(tag)
    }
}

/// One scheduled game, normalized from any upstream.
///
/// Records are built once through [`Game::new`] and never mutated afterwards;
/// the pipeline only selects, drops or reorders whole records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Competition display name, e.g. "ABA League".
    pub competition: String,
    pub home_team: String,
    pub away_team: String,
    /// Local calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Local wall-clock time, `HH:MM`.
    pub time: String,
    pub venue: String,
    /// Always equal to `venue`.
    pub location: String,
    /// Round label, empty when unknown.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub round: String,
    pub source: Source,
}

impl Game {
    /// Build a record from a parsed local start time.
    ///
    /// `venue` populates both `venue` and `location`.
    pub fn new(
        competition: impl Into<String>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        start: NaiveDateTime,
        venue: impl Into<String>,
        round: impl Into<String>,
        source: Source,
    ) -> Self {
        let venue = venue.into();
        Self {
            competition: competition.into(),
            home_team: home_team.into(),
            away_team: away_team.into(),
            date: start.format(DATE_FORMAT).to_string(),
            time: start.format(TIME_FORMAT).to_string(),
            location: venue.clone(),
            venue,
            round: round.into(),
            source,
        }
    }

    /// Combined local start time, or `None` if `date`/`time` don't parse.
    pub fn start(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(
            &format!("{} {}", self.date, self.time),
            &format!("{DATE_FORMAT} {TIME_FORMAT}"),
        )
        .ok()
    }

    /// Calendar title: `"<competition> - <home> vs <away>"`.
    pub fn title(&self) -> String {
        format!("{} - {} vs {}", self.competition, self.home_team, self.away_team)
    }
}

/// Snapshot persisted between runs.
#[derive(Debug, Deserialize, Serialize)]
pub struct CachedSchedule {
    /// Generation time in unix seconds.
    pub timestamp: i64,
    pub games: Vec<Game>,
}
