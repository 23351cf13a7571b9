//! Schedule aggregation: fan out to every source, fan in, then merge,
//! deduplicate, drop past games and sort.
//!
//! # Flow
//!
//! ```text
//! FlashScore fixtures ─┐
//!                      ├─ concat ─ dedupe ─ retain_future ─┐
//! FlashScore results ──┘                                    ├─ merge ─ sort
//! Euroleague API ───────────────────────── retain_future ──┘
//! ```
//!
//! All three fetches start together on the current task and are awaited as a
//! group. A failed fetch is logged with its source and contributes nothing;
//! [`aggregate`] itself never fails. An empty result is returned as-is and the
//! caller decides whether to substitute [`fallback::mock_schedule`](crate::fallback::mock_schedule).

use crate::config::Config;
use crate::models::Game;
use crate::scrapers::{Fetcher, euroleague, flashscore};
use chrono::{Local, NaiveDateTime};
use futures::future;
use itertools::Itertools;
use std::error::Error;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Remove records sharing (`date`, `time`, `home_team`, `away_team`).
///
/// The first record seen for a key wins and relative order is preserved.
pub fn dedupe(games: Vec<Game>) -> Vec<Game> {
    games
        .into_iter()
        .unique_by(|g| {
            (
                g.date.clone(),
                g.time.clone(),
                g.home_team.clone(),
                g.away_team.clone(),
            )
        })
        .collect()
}

/// Keep records whose local start is at or after `now`.
///
/// Records whose `date`/`time` don't parse are dropped too.
pub fn retain_future(games: Vec<Game>, now: NaiveDateTime) -> Vec<Game> {
    games
        .into_iter()
        .filter(|g| g.start().is_some_and(|start| start >= now))
        .collect()
}

/// Stable ascending sort by local start; ties keep their input order.
pub fn sort_chronologically(games: &mut [Game]) {
    games.sort_by_key(Game::start);
}

fn or_empty(result: Result<Vec<Game>, Box<dyn Error>>, source: &str) -> Vec<Game> {
    result.unwrap_or_else(|e| {
        warn!(source, error = %e, "Source fetch failed; contributing no games");
        Vec::new()
    })
}

/// Fetch every source concurrently and build the merged schedule.
#[instrument(level = "info", skip_all, fields(team = %config.team))]
pub async fn aggregate<F: Fetcher>(fetcher: &F, config: &Config) -> Vec<Game> {
    let t0 = Instant::now();

    let flashscore_pages = future::join(
        flashscore::fetch_page(fetcher, &config.flashscore_fixtures_url, config),
        flashscore::fetch_page(fetcher, &config.flashscore_results_url, config),
    );
    let ((fixtures, results), euroleague) = tokio::join!(
        flashscore_pages,
        euroleague::fetch_schedule(fetcher, config)
    );
    debug!(elapsed_ms = t0.elapsed().as_millis() as u64, "All sources settled");

    let mut flashscore_games = or_empty(fixtures, "flashscore-fixtures");
    flashscore_games.extend(or_empty(results, "flashscore-results"));
    let flashscore_games = retain_future(dedupe(flashscore_games), Local::now().naive_local());

    let euroleague_games = retain_future(
        or_empty(euroleague, "euroleague-api"),
        Local::now().naive_local(),
    );

    info!(
        flashscore = flashscore_games.len(),
        euroleague = euroleague_games.len(),
        "Upcoming games per source"
    );

    let mut games = euroleague_games;
    games.extend(flashscore_games);
    sort_chronologically(&mut games);

    info!(
        count = games.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Aggregated schedule"
    );
    games
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;
    use chrono::{Duration, NaiveDate};
    use std::collections::HashMap;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2099, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn game(home: &str, away: &str, start: NaiveDateTime, venue: &str, source: Source) -> Game {
        Game::new("ABA League", home, away, start, venue, "", source)
    }

    #[test]
    fn test_dedupe_first_wins() {
        let games = vec![
            game("Partizan", "Mega", at(3, 20), "Stark Arena", Source::Flashscore),
            game("Partizan", "Igokea", at(4, 20), "Stark Arena", Source::Flashscore),
            game("Partizan", "Mega", at(3, 20), "Pionir", Source::EuroleagueApi),
        ];

        let deduped = dedupe(games);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].venue, "Stark Arena");
        assert_eq!(deduped[0].source, Source::Flashscore);
        assert_eq!(deduped[1].away_team, "Igokea");
    }

    #[test]
    fn test_dedupe_is_exact_and_idempotent() {
        let games = vec![
            game("Partizan", "Mega", at(3, 20), "A", Source::Flashscore),
            game("partizan", "Mega", at(3, 20), "A", Source::Flashscore),
            game("Partizan", "Mega", at(3, 21), "A", Source::Flashscore),
            game("Mega", "Partizan", at(3, 20), "A", Source::Flashscore),
        ];

        let once = dedupe(games.clone());
        assert_eq!(once, games);
        assert_eq!(dedupe(once.clone()), once);
    }

    #[test]
    fn test_retain_future() {
        let now = at(10, 12);
        let mut garbled = game("Partizan", "Mega", at(20, 20), "A", Source::Flashscore);
        garbled.date = "someday".to_string();
        let games = vec![
            game("Partizan", "Past", at(9, 20), "A", Source::Flashscore),
            game("Partizan", "Now", now, "A", Source::Flashscore),
            game("Partizan", "Later", at(11, 20), "A", Source::Flashscore),
            garbled,
        ];

        let kept = retain_future(games, now);
        let opponents: Vec<&str> = kept.iter().map(|g| g.away_team.as_str()).collect();
        assert_eq!(opponents, ["Now", "Later"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut games = vec![
            game("Partizan", "C", at(5, 20), "A", Source::Flashscore),
            game("Partizan", "A", at(2, 20), "A", Source::EuroleagueApi),
            game("Partizan", "B1", at(3, 19), "A", Source::EuroleagueApi),
            game("Partizan", "B2", at(3, 19), "A", Source::Flashscore),
        ];

        sort_chronologically(&mut games);
        let opponents: Vec<&str> = games.iter().map(|g| g.away_team.as_str()).collect();
        assert_eq!(opponents, ["A", "B1", "B2", "C"]);
    }

    /// Serves canned bodies by URL prefix; unknown URLs fail.
    struct FakeFetcher {
        pages: HashMap<&'static str, String>,
    }

    impl Fetcher for FakeFetcher {
        async fn get_text(&self, url: &str) -> Result<String, Box<dyn Error>> {
            self.pages
                .iter()
                .find(|(prefix, _)| url.starts_with(**prefix))
                .map(|(_, body)| body.clone())
                .ok_or_else(|| format!("connection refused: {url}").into())
        }
    }

    fn test_config() -> Config {
        Config {
            flashscore_fixtures_url: "http://flashscore.test/fixtures/".to_string(),
            flashscore_results_url: "http://flashscore.test/results/".to_string(),
            euroleague_api_url: "http://euroleague.test/games".to_string(),
            ..Config::default()
        }
    }

    fn api_body(dates: &[NaiveDateTime]) -> String {
        let data = dates
            .iter()
            .enumerate()
            .map(|(i, d)| {
                format!(
                    r#"{{"date":"{}","home":{{"name":"Partizan","abbreviatedName":"PAR"}},"away":{{"name":"Rival {i}"}},"venue":{{"name":"Stark Arena"}}}}"#,
                    d.format("%Y-%m-%dT%H:%M:%S")
                )
            })
            .join(",");
        format!(r#"{{"status":"success","data":[{data}]}}"#)
    }

    #[tokio::test]
    async fn test_one_source_down_keeps_the_other() {
        let base = Local::now().naive_local() + Duration::days(30);
        let dates = [base + Duration::days(14), base, base + Duration::days(7)];
        let fetcher = FakeFetcher {
            pages: HashMap::from([("http://euroleague.test/", api_body(&dates))]),
        };

        let games = aggregate(&fetcher, &test_config()).await;

        assert_eq!(games.len(), 3);
        let opponents: Vec<&str> = games.iter().map(|g| g.away_team.as_str()).collect();
        assert_eq!(opponents, ["Rival 1", "Rival 2", "Rival 0"]);
        assert!(games.iter().all(|g| g.source == Source::EuroleagueApi));
    }

    #[tokio::test]
    async fn test_all_sources_down_is_empty() {
        let fetcher = FakeFetcher {
            pages: HashMap::new(),
        };
        assert!(aggregate(&fetcher, &test_config()).await.is_empty());
    }

    #[tokio::test]
    async fn test_flashscore_pages_merge_and_dedupe() {
        let ts = (Local::now() + Duration::days(10)).timestamp();
        let past = (Local::now() - Duration::days(10)).timestamp();
        let fixtures = format!(
            "data: `g1¬AD÷{ts}¬AE÷Partizan¬AF÷Mega¬~AA÷v¬AM÷Stark Arena.¬~AA÷g2¬AD÷{past}¬AE÷Partizan¬AF÷Igokea`"
        );
        // Results page repeats the upcoming game with a different venue.
        let results = format!("data: `g1¬AD÷{ts}¬AE÷Partizan¬AF÷Mega¬~AA÷v¬AM÷Pionir.`");
        let fetcher = FakeFetcher {
            pages: HashMap::from([
                ("http://flashscore.test/fixtures/", fixtures),
                ("http://flashscore.test/results/", results),
                ("http://euroleague.test/", r#"{"status":"error"}"#.to_string()),
            ]),
        };

        let games = aggregate(&fetcher, &test_config()).await;

        assert_eq!(games.len(), 1);
        assert_eq!(games[0].venue, "Stark Arena");
        assert_eq!(games[0].source, Source::Flashscore);
    }

    #[tokio::test]
    async fn test_output_is_future_and_sorted_across_sources() {
        let now = Local::now();
        let ts = (now + Duration::days(2)).timestamp();
        let fixtures = format!("data: `g1¬AD÷{ts}¬AE÷Mega¬AF÷Partizan`");
        let api_dates = [
            (now + Duration::days(5)).naive_local(),
            (now + Duration::days(1)).naive_local(),
        ];
        let fetcher = FakeFetcher {
            pages: HashMap::from([
                ("http://flashscore.test/fixtures/", fixtures),
                ("http://euroleague.test/", api_body(&api_dates)),
            ]),
        };

        let games = aggregate(&fetcher, &test_config()).await;

        assert_eq!(games.len(), 3);
        let starts: Vec<NaiveDateTime> = games.iter().filter_map(Game::start).collect();
        assert_eq!(starts.len(), 3);
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
        assert!(starts.iter().all(|s| *s > now.naive_local() - Duration::minutes(1)));
        assert_eq!(games[1].home_team, "Mega");
    }
}
