//! Euroleague games API client.
//!
//! The feed answers `GET <games url>?teamCode=PAR` with an envelope:
//!
//! ```json
//! { "status": "success", "data": [ { "date": "2025-11-06T20:30:00+01:00", "home": {...}, ... } ] }
//! ```
//!
//! Anything other than `status == "success"` with a `data` array counts as an
//! empty schedule. Individual games that don't deserialize are skipped without
//! affecting the rest of the batch.

use crate::config::Config;
use crate::models::{DATE_FORMAT, Game};
use crate::normalize::{NormalizeContext, RawGame};
use crate::scrapers::Fetcher;
use crate::utils::truncate_for_log;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::Deserialize;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Option<Vec<serde_json::Value>>,
}

/// One game object from the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiGame {
    pub date: String,
    #[serde(default)]
    pub home: Option<ApiTeam>,
    #[serde(default)]
    pub away: Option<ApiTeam>,
    #[serde(default)]
    pub venue: Option<ApiVenue>,
    #[serde(default)]
    pub round: Option<ApiRound>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTeam {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub abbreviated_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiVenue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiRound {
    #[serde(default)]
    pub name: Option<String>,
}

/// Parse an API date into a local wall-clock start.
///
/// Accepts RFC 3339 with an offset (converted to local time), a naive
/// `YYYY-MM-DDTHH:MM[:SS]` taken as local time, or a bare `YYYY-MM-DD`
/// meaning local midnight.
pub fn parse_api_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Resolve a wall-clock time in `tz` to an instant.
///
/// Ambiguous times take the earlier instant. A time skipped by a
/// daylight-saving jump resolves to the same wall-clock time one hour later.
pub fn local_instant<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&local).earliest().or_else(|| {
        let shifted = local.checked_add_signed(Duration::hours(1))?;
        tz.from_local_datetime(&shifted).earliest()
    })
}

/// Parse an API response body into games starting at or after `now`.
///
/// Fails only when the body isn't a JSON envelope at all.
pub fn parse_response(
    body: &str,
    config: &Config,
    now: DateTime<Local>,
) -> Result<Vec<Game>, Box<dyn Error>> {
    let envelope: ApiEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, body_preview = %truncate_for_log(body, 200), "Euroleague response is not JSON");
            return Err(e.into());
        }
    };

    let data = match (envelope.status.as_deref(), envelope.data) {
        (Some("success"), Some(data)) => data,
        (status, _) => {
            warn!(?status, "Euroleague API returned no data");
            return Ok(Vec::new());
        }
    };

    let ctx = NormalizeContext {
        team: &config.team,
        competition: &config.euroleague_competition,
    };
    let total = data.len();

    let games: Vec<Game> = data
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<ApiGame>(value) {
            Ok(game) => Some(game),
            Err(e) => {
                debug!(error = %e, "Skipping malformed Euroleague game");
                None
            }
        })
        .filter(|game| {
            parse_api_date(&game.date)
                .and_then(|start| local_instant(&Local, start))
                .is_some_and(|start| start >= now)
        })
        .filter_map(|game| RawGame::RestApi(game).normalize(&ctx))
        .collect();

    debug!(total, upcoming = games.len(), "Parsed Euroleague games");
    Ok(games)
}

/// Fetch the tracked team's upcoming Euroleague games.
#[instrument(level = "info", skip_all, fields(team_code = %config.team_code_api))]
pub async fn fetch_schedule<F: Fetcher>(
    fetcher: &F,
    config: &Config,
) -> Result<Vec<Game>, Box<dyn Error>> {
    let url = Url::parse_with_params(
        &config.euroleague_api_url,
        &[("teamCode", config.team_code_api.as_str())],
    )?;

    let body = fetcher.get_text(url.as_str()).await?;
    let games = parse_response(&body, config, Local::now())?;

    info!(count = games.len(), source = %url, "Fetched Euroleague games");
    Ok(games)
}
