//! iCalendar feed generation.
//!
//! One `VEVENT` per game, titled `<competition> - <home> vs <away>`, lasting
//! the configured game duration, marked confirmed and busy, with display
//! reminders 30 and 5 minutes before tip-off. Start times are floating local
//! times, matching how the pipeline interprets them.

use crate::config::Config;
use crate::models::Game;
use chrono::Duration;
use icalendar::{Alarm, Calendar, Component, Event, EventLike, EventStatus};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

const REMINDERS_MINUTES: [i64; 2] = [30, 5];

fn description(game: &Game) -> String {
    let mut text = format!("{}\n{} vs {}", game.competition, game.home_team, game.away_team);
    if !game.round.is_empty() {
        text.push('\n');
        text.push_str(&game.round);
    }
    text.push_str("\nVenue: ");
    text.push_str(&game.location);
    text
}

fn event(game: &Game, config: &Config) -> Result<Event, Box<dyn Error>> {
    let Some(start) = game.start() else {
        return Err(format!(
            "game {} vs {} has unparseable start {:?} {:?}",
            game.home_team, game.away_team, game.date, game.time
        )
        .into());
    };
    let title = game.title();

    let mut event = Event::new();
    event
        .uid(&format!(
            "{}-{}-{}@partizan-ics",
            game.date, game.home_team, game.away_team
        ))
        .summary(&title)
        .description(&description(game))
        .location(&game.location)
        .starts(start)
        .ends(start + Duration::hours(config.game_duration_hours))
        .status(EventStatus::Confirmed)
        .add_property("X-MICROSOFT-CDO-BUSYSTATUS", "BUSY");

    for minutes in REMINDERS_MINUTES {
        event.alarm(Alarm::display(
            &format!("{title} starts in {minutes} minutes"),
            -Duration::minutes(minutes),
        ));
    }

    Ok(event.done())
}

/// Encode games as an iCalendar document.
///
/// Fails on the first game whose start can't be parsed; no partial calendar
/// is produced.
pub fn generate_calendar(games: &[Game], config: &Config) -> Result<String, Box<dyn Error>> {
    let mut calendar = Calendar::new();
    calendar.name(&config.calendar_name);

    for game in games {
        calendar.push(event(game, config)?);
    }

    Ok(calendar.done().to_string())
}

/// Encode games and write the calendar file, creating parent directories.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_calendar(
    games: &[Game],
    config: &Config,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let ics = generate_calendar(games, config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, ics).await?;

    info!(events = games.len(), "Wrote calendar");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;
    use chrono::NaiveDate;

    fn game(day: u32, away: &str, round: &str) -> Game {
        let start = NaiveDate::from_ymd_opt(2099, 1, day)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        Game::new("ABA League", "Partizan", away, start, "Stark Arena", round, Source::Flashscore)
    }

    #[test]
    fn test_one_event_per_game() {
        let games = vec![game(3, "Mega", "Round 4"), game(10, "Igokea", "")];
        let ics = generate_calendar(&games, &Config::default()).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert_eq!(ics.matches("BEGIN:VALARM").count(), 4);
        assert!(ics.contains("SUMMARY:ABA League - Partizan vs Mega"));
        assert!(ics.contains("LOCATION:Stark Arena"));
        assert!(ics.contains("STATUS:CONFIRMED"));
        assert!(ics.contains("DTSTART:20990103T200000"));
        assert!(ics.contains("DTEND:20990103T220000"));
    }

    #[test]
    fn test_empty_schedule_is_valid_calendar() {
        let ics = generate_calendar(&[], &Config::default()).unwrap();
        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn test_description_includes_round_when_known() {
        assert_eq!(
            description(&game(3, "Mega", "Round 4")),
            "ABA League\nPartizan vs Mega\nRound 4\nVenue: Stark Arena"
        );
        assert_eq!(
            description(&game(3, "Mega", "")),
            "ABA League\nPartizan vs Mega\nVenue: Stark Arena"
        );
    }

    #[test]
    fn test_unparseable_game_fails_whole_calendar() {
        let mut broken = game(4, "Mega", "");
        broken.time = "TBD".to_string();
        let games = vec![game(3, "Igokea", ""), broken];

        assert!(generate_calendar(&games, &Config::default()).is_err());
    }

    #[tokio::test]
    async fn test_write_calendar_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feeds").join("calendar.ics");

        write_calendar(&[game(3, "Mega", "")], &Config::default(), &path)
            .await
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("BEGIN:VEVENT"));
    }
}
