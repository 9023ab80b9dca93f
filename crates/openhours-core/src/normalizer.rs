//! Turn raw provider events into one sorted busy list.
//!
//! Events may come from several calendars in any order. Only timed events
//! block time; whole-day events (start without a `dateTime`) are skipped.
//! Multi-day timed events are kept. Overlaps are left alone here because the
//! resolver tests candidates against each busy interval directly.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OpenHoursError, Result};
use crate::interval::Interval;

/// One side (start or end) of a provider event.
///
/// Timed events carry `dateTime` (RFC 3339 with offset); whole-day events
/// carry only `date`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl RawEventTime {
    pub fn timed(date_time: impl Into<String>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            ..Self::default()
        }
    }

    pub fn all_day(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Self::default()
        }
    }

    pub fn is_timed(&self) -> bool {
        self.date_time.is_some()
    }
}

/// A calendar event as received from a provider, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    /// The calendar this event was read from. Filled in by the event source.
    #[serde(default)]
    pub calendar_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: RawEventTime,
    #[serde(default)]
    pub end: RawEventTime,
}

impl RawEvent {
    pub fn timed(calendar_id: &str, start: &str, end: &str) -> Self {
        Self {
            calendar_id: calendar_id.to_string(),
            summary: None,
            start: RawEventTime::timed(start),
            end: RawEventTime::timed(end),
        }
    }

    pub fn all_day(calendar_id: &str, start_date: &str, end_date: &str) -> Self {
        Self {
            calendar_id: calendar_id.to_string(),
            summary: None,
            start: RawEventTime::all_day(start_date),
            end: RawEventTime::all_day(end_date),
        }
    }
}

/// Convert raw events into busy intervals in `tz`, sorted by start.
///
/// Ties in start keep their input order.
///
/// # Errors
/// Returns `OpenHoursError::InvalidTimestamp` if a timed event has a missing
/// or unparseable timestamp, and `OpenHoursError::InvalidInterval` if it ends
/// before it starts. Either aborts the run: dropping the event instead could
/// report busy time as free.
pub fn normalize(events: &[RawEvent], tz: Tz) -> Result<Vec<Interval>> {
    let mut busy = Vec::with_capacity(events.len());

    for event in events {
        let Some(start_raw) = event.start.date_time.as_deref() else {
            debug!(
                calendar = %event.calendar_id,
                summary = event.summary.as_deref().unwrap_or_default(),
                "skipping event without a time of day"
            );
            continue;
        };
        let end_raw = event.end.date_time.as_deref().ok_or_else(|| {
            OpenHoursError::InvalidTimestamp {
                calendar: event.calendar_id.clone(),
                message: format!("event starting '{start_raw}' has no end dateTime"),
            }
        })?;

        let start = parse_timestamp(start_raw, &event.calendar_id, tz)?;
        let end = parse_timestamp(end_raw, &event.calendar_id, tz)?;

        if start == end {
            debug!(
                calendar = %event.calendar_id,
                at = %start_raw,
                "skipping zero-length event"
            );
            continue;
        }

        busy.push(Interval::new(start, end)?);
    }

    // `sort_by_key` is stable, so equal starts keep input order.
    busy.sort_by_key(Interval::start);
    debug!(events = events.len(), busy = busy.len(), "normalized busy list");

    Ok(busy)
}

/// Parse an RFC 3339 timestamp (offset required) into `tz`.
pub fn parse_timestamp(raw: &str, calendar_id: &str, tz: Tz) -> Result<DateTime<Tz>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&tz))
        .map_err(|e| OpenHoursError::InvalidTimestamp {
            calendar: calendar_id.to_string(),
            message: format!("'{raw}': {e}"),
        })
}
