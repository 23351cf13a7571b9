//! Output collaborators for the aggregated schedule.
//!
//! # Submodules
//!
//! - [`calendar`]: Encodes games as an iCalendar feed
//! - [`cache`]: Stores and reloads the last schedule snapshot
//! - [`json`]: Writes a `{ count, games }` listing
//!
//! # Output Structure
//!
//! ```text
//! data/
//! ├── cache.json      # snapshot with generation timestamp
//! ├── calendar.ics    # subscribable feed
//! └── games.json      # optional listing (--games-json)
//! ```

pub mod cache;
pub mod calendar;
pub mod json;
