//! # openhours-core
//!
//! Turns calendar busy time into day-grouped, human-readable free-time windows.
//!
//! Raw provider events from one or more calendars are normalized into a sorted
//! busy list, then resolved against working hours, excluded weekdays and a
//! minimum slot length into free intervals, grouped by date for printing.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use openhours_core::{compute_availability, RawEvent, ReportConfig};
//!
//! let config = ReportConfig::new("America/New_York", 10, 17).unwrap();
//! let day = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
//! let window = config.window(day, day).unwrap();
//! let events = vec![RawEvent::timed(
//!     "primary",
//!     "2026-03-16T12:00:00-04:00",
//!     "2026-03-16T13:00:00-04:00",
//! )];
//!
//! let report = compute_availability(&events, &config, &window).unwrap();
//! assert_eq!(report.lines(), vec!["Mon, March 16: 10:00-12:00 or 1:00-5:00"]);
//! ```
//!
//! ## Modules
//!
//! - [`normalizer`] — raw provider events → sorted busy intervals
//! - [`resolver`] — candidate generation, busy filtering, adjacency merge
//! - [`report`] — per-day grouping and text/JSON rendering
//! - [`config`] — per-run configuration and reporting window
//! - [`source`] — event source trait and JSON export reader
//! - [`interval`] — the `Interval` type shared by busy and free time
//! - [`dst`] — local-time resolution across DST transitions
//! - [`error`] — Error types

pub mod config;
pub mod dst;
pub mod error;
pub mod interval;
pub mod normalizer;
pub mod report;
pub mod resolver;
pub mod source;

pub use config::{ReportConfig, ReportWindow};
pub use error::{OpenHoursError, Result};
pub use interval::Interval;
pub use normalizer::{normalize, RawEvent, RawEventTime};
pub use report::{Report, NO_AVAILABILITY};
pub use resolver::resolve;
pub use source::{collect_events, EventSource, JsonEventSource};

/// Normalize `events`, resolve free time in `window`, and group it by day.
///
/// # Errors
/// Fails on malformed event timestamps or internal-consistency violations.
/// Having no free time is not an error; the report is simply empty.
pub fn compute_availability(
    events: &[RawEvent],
    config: &ReportConfig,
    window: &ReportWindow,
) -> Result<Report> {
    let busy = normalize(events, config.timezone())?;
    let free = resolve(&busy, config, window)?;
    Ok(Report::from_intervals(&free))
}
