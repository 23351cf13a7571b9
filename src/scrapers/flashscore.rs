//! FlashScore fixtures/results scraper.
//!
//! FlashScore pages don't render fixtures as HTML. Instead a script embeds a
//! back-quoted blob after a `data:` marker, written in a delimited
//! micro-format:
//!
//! ```text
//! SA÷3¬~AA÷g_3_abc¬AD÷1700000000¬AE÷Partizan¬AF÷Cedevita¬~AA÷g_3_def¬AM÷Stark Arena.¬
//! ```
//!
//! - `~AA÷` separates blocks (games, venues, broadcasters, headers, ...)
//! - `¬` separates fields inside a block
//! - `÷` separates a field's key from its value
//!
//! Decoding runs in two passes: every block is first parsed into an indexed
//! field map, then blocks mentioning the tracked team are picked out. A game's
//! venue usually lives in the block *after* it, which is why the whole block
//! sequence is materialized before selection.

use crate::config::Config;
use crate::models::Game;
use crate::normalize::{NormalizeContext, RawGame};
use crate::scrapers::Fetcher;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::error::Error;
use tracing::{debug, info, instrument};

const BLOCK_SEPARATOR: &str = "~AA÷";
const FIELD_SEPARATOR: &str = "¬";
const KEY_VALUE_SEPARATOR: &str = "÷";
const NEUTRAL_VENUE_PREFIX: &str = "Neutral location - ";

/// Kick-off time in unix seconds.
pub const TIMESTAMP_KEY: &str = "AD";
pub const HOME_TEAM_KEY: &str = "AE";
pub const AWAY_TEAM_KEY: &str = "AF";
pub const ROUND_KEY: &str = "ER";
pub const COMPETITION_KEY: &str = "ZA";
const VENUE_KEY: &str = "AM";

static DATA_BLOB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"data:\s*`([^`]+)`").expect("data blob pattern is valid"));

/// A block that mentions the tracked team, with its venue resolved from the
/// following block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedBlock {
    pub fields: HashMap<String, String>,
    /// Cleaned venue text, empty when the next block has none.
    pub venue: String,
}

impl DecodedBlock {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Pass-one output: one entry per block, qualifying or not.
struct Block<'a> {
    raw: &'a str,
    fields: HashMap<String, String>,
}

/// Find the micro-format payload in a page.
///
/// Script bodies are searched first; the raw page text is the fallback so a
/// bare blob (or a page the HTML parser mangles) still decodes.
fn find_blob(page: &str) -> Option<String> {
    let document = Html::parse_document(page);
    let scripts = Selector::parse("script").unwrap();

    document
        .select(&scripts)
        .find_map(|script| {
            let text = script.text().collect::<String>();
            DATA_BLOB.captures(&text).map(|c| c[1].to_string())
        })
        .or_else(|| DATA_BLOB.captures(page).map(|c| c[1].to_string()))
}

/// Parse `key÷value¬key÷value¬...` into a map, skipping malformed pairs.
fn parse_fields(block: &str) -> HashMap<String, String> {
    block
        .split(FIELD_SEPARATOR)
        .filter_map(|pair| {
            let mut parts = pair.split(KEY_VALUE_SEPARATOR);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) if !key.is_empty() && !value.is_empty() => {
                    Some((key.to_string(), value.to_string()))
                }
                _ => None,
            }
        })
        .collect()
}

fn clean_venue(raw: &str) -> String {
    let venue = raw.replacen(NEUTRAL_VENUE_PREFIX, "", 1);
    venue.strip_suffix('.').unwrap_or(&venue).to_string()
}

fn mentions_team(raw: &str, team: &str, short_code: &str) -> bool {
    (!short_code.is_empty() && raw.contains(short_code)) || (!team.is_empty() && raw.contains(team))
}

/// Decode every block of the page that mentions `team` or `short_code`.
///
/// Returns an empty list when the page carries no data blob.
pub fn decode(page: &str, team: &str, short_code: &str) -> Vec<DecodedBlock> {
    let Some(blob) = find_blob(page) else {
        debug!("No data blob marker in page");
        return Vec::new();
    };

    let blocks: Vec<Block<'_>> = blob
        .split(BLOCK_SEPARATOR)
        .map(|raw| Block {
            raw,
            fields: parse_fields(raw),
        })
        .collect();

    let decoded: Vec<DecodedBlock> = blocks
        .iter()
        .enumerate()
        .filter(|(_, block)| mentions_team(block.raw, team, short_code))
        .map(|(i, block)| DecodedBlock {
            fields: block.fields.clone(),
            venue: blocks
                .get(i + 1)
                .and_then(|next| next.fields.get(VENUE_KEY))
                .map(|venue| clean_venue(venue))
                .unwrap_or_default(),
        })
        .collect();

    debug!(blocks = blocks.len(), matched = decoded.len(), "Decoded data blob");
    decoded
}

/// Decode a page and normalize the matching blocks into games.
pub fn parse_page(page: &str, config: &Config) -> Vec<Game> {
    let ctx = NormalizeContext {
        team: &config.team,
        competition: &config.flashscore_competition,
    };

    decode(page, &config.team, &config.team_short_code)
        .into_iter()
        .filter_map(|block| RawGame::MicroFormat(block).normalize(&ctx))
        .collect()
}

/// Fetch one FlashScore page (fixtures or results) and parse it.
#[instrument(level = "info", skip(fetcher, config))]
pub async fn fetch_page<F: Fetcher>(
    fetcher: &F,
    url: &str,
    config: &Config,
) -> Result<Vec<Game>, Box<dyn Error>> {
    let html = fetcher.get_text(url).await?;
    let games = parse_page(&html, config);

    info!(count = games.len(), source = url, "Parsed FlashScore games");
    Ok(games)
}
