//! Upstream schedule sources.
//!
//! Each source module turns raw upstream responses into canonical
//! [`Game`](crate::models::Game) records:
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | FlashScore | [`flashscore`] | Micro-format blob in HTML | Fixtures and results pages |
//! | Euroleague | [`euroleague`] | JSON games API | Filtered by `teamCode` |
//!
//! # Common Patterns
//!
//! Each source module exports:
//! - A pure parsing step that works on text already in memory (testable offline)
//! - `fetch_schedule(fetcher, config)`: fetches and parses, returns
//!   `Result<Vec<Game>, _>`; the aggregator decides how failures are handled
//!
//! Network access goes through the [`Fetcher`] trait so the aggregation
//! pipeline can run against canned pages in tests.

pub mod euroleague;
pub mod flashscore;

use crate::config::Config;
use reqwest::Client;
use std::error::Error;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Something that can GET a URL and return the body as text.
pub trait Fetcher {
    async fn get_text(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// [`Fetcher`] backed by a shared `reqwest` client.
///
/// The client carries the configured user agent and a transport timeout, so
/// a hung upstream can't stall an aggregation run indefinitely.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, Box<dyn Error>> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.http_timeout())
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(level = "info", skip(self))]
    async fn get_text(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let res = self.client.get(url).send().await?.error_for_status();
        let dt = t0.elapsed();

        let response = match res {
            Ok(response) => response,
            Err(e) => {
                warn!(elapsed_ms = dt.as_millis() as u64, error = %e, "GET returned error status");
                return Err(e.into());
            }
        };
        let body = response.text().await?;
        debug!(bytes = body.len(), elapsed_ms = dt.as_millis() as u64, "GET complete");
        Ok(body)
    }
}
