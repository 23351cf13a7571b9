//! Conversion of per-source raw records into canonical [`Game`]s.
//!
//! Each upstream shape is one variant of [`RawGame`]; all variants share the
//! same output contract: `Some(game)` for a usable record, `None` when the
//! record has to be dropped. Dropping one record never affects its siblings.

use crate::models::{Game, Source};
use crate::scrapers::euroleague::{ApiGame, ApiTeam, parse_api_date};
use crate::scrapers::flashscore::{
    AWAY_TEAM_KEY, COMPETITION_KEY, DecodedBlock, HOME_TEAM_KEY, ROUND_KEY, TIMESTAMP_KEY,
};
use crate::venues::resolve_venue;
use chrono::{DateTime, Local};
use tracing::debug;

/// FlashScore's placeholder for a venue that hasn't been announced.
const VENUE_PLACEHOLDER: &str = "TBD";
const UNKNOWN_TEAM: &str = "Unknown";

/// Per-source settings a normalizer needs.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeContext<'a> {
    /// Tracked team display name.
    pub team: &'a str,
    /// Competition label for this source (default or fixed, depending on the source).
    pub competition: &'a str,
}

/// A record as delivered by one upstream, before normalization.
#[derive(Debug, Clone)]
pub enum RawGame {
    /// A decoded FlashScore micro-format block.
    MicroFormat(DecodedBlock),
    /// One game object from the Euroleague API.
    RestApi(ApiGame),
}

impl RawGame {
    pub fn normalize(self, ctx: &NormalizeContext<'_>) -> Option<Game> {
        match self {
            RawGame::MicroFormat(block) => normalize_block(block, ctx),
            RawGame::RestApi(game) => normalize_api_game(game, ctx),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn normalize_block(block: DecodedBlock, ctx: &NormalizeContext<'_>) -> Option<Game> {
    let home = block.field(HOME_TEAM_KEY).unwrap_or_default();
    let away = block.field(AWAY_TEAM_KEY).unwrap_or_default();

    if !home.contains(ctx.team) && !away.contains(ctx.team) {
        debug!(home, away, "Block does not involve tracked team");
        return None;
    }

    let Some(start) = block
        .field(TIMESTAMP_KEY)
        .and_then(|ts| ts.trim().parse::<i64>().ok())
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|utc| utc.with_timezone(&Local).naive_local())
    else {
        debug!(home, away, timestamp = ?block.field(TIMESTAMP_KEY), "Block has no usable timestamp");
        return None;
    };

    let venue = if block.venue.is_empty() || block.venue.contains(VENUE_PLACEHOLDER) {
        resolve_venue(Some(home))
    } else {
        block.venue.clone()
    };

    Some(Game::new(
        non_empty(block.field(COMPETITION_KEY)).unwrap_or(ctx.competition),
        non_empty(Some(home)).unwrap_or(UNKNOWN_TEAM),
        non_empty(Some(away)).unwrap_or(UNKNOWN_TEAM),
        start,
        venue,
        block.field(ROUND_KEY).unwrap_or_default(),
        Source::Flashscore,
    ))
}

fn display_name(team: &ApiTeam) -> &str {
    non_empty(team.abbreviated_name.as_deref())
        .or_else(|| non_empty(team.name.as_deref()))
        .unwrap_or(UNKNOWN_TEAM)
}

fn normalize_api_game(game: ApiGame, ctx: &NormalizeContext<'_>) -> Option<Game> {
    let Some(start) = parse_api_date(&game.date) else {
        debug!(date = %game.date, "API game has unparseable date");
        return None;
    };
    let (Some(home), Some(away)) = (game.home.as_ref(), game.away.as_ref()) else {
        debug!(date = %game.date, "API game is missing a team");
        return None;
    };

    let venue_name = game.venue.as_ref().and_then(|v| non_empty(v.name.as_deref()));
    let venue_address = game.venue.as_ref().and_then(|v| non_empty(v.address.as_deref()));
    let venue = match (venue_name, venue_address) {
        (Some(name), Some(address)) => format!("{name}, {address}"),
        (Some(name), None) => name.to_string(),
        _ => resolve_venue(home.name.as_deref()),
    };

    let round = game
        .round
        .as_ref()
        .and_then(|r| r.name.clone())
        .unwrap_or_default();

    Some(Game::new(
        ctx.competition,
        display_name(home),
        display_name(away),
        start,
        venue,
        round,
        Source::EuroleagueApi,
    ))
}
