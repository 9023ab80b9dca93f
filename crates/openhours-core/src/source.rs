//! Event sources: where raw events come from.
//!
//! [`EventSource`] is the seam between the core and a calendar provider. A
//! networked provider (OAuth, HTTP) would implement it; this crate ships
//! [`JsonEventSource`], which reads a provider export from disk or stdin.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::error::{OpenHoursError, Result};
use crate::normalizer::RawEvent;

/// Supplies the raw events of one calendar.
pub trait EventSource {
    /// Fetch every event of `calendar_id`.
    ///
    /// # Errors
    /// Returns `OpenHoursError::UnknownCalendar` if the source has no such
    /// calendar; implementations may return other errors for transport failures.
    fn fetch_events(&self, calendar_id: &str) -> Result<Vec<RawEvent>>;
}

/// Events for one calendar, as an events-list response or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum CalendarPayload {
    Events(Vec<RawEvent>),
    List {
        #[serde(default)]
        items: Vec<RawEvent>,
    },
}

impl CalendarPayload {
    fn into_events(self) -> Vec<RawEvent> {
        match self {
            Self::Events(events) | Self::List { items: events } => events,
        }
    }
}

/// An in-memory event source built from a JSON export.
///
/// The JSON is an object keyed by calendar id:
///
/// ```json
/// {
///   "primary": { "items": [ { "start": { "dateTime": "2026-03-16T12:00:00-04:00" },
///                             "end":   { "dateTime": "2026-03-16T13:00:00-04:00" } } ] },
///   "team@example.com": []
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonEventSource {
    calendars: BTreeMap<String, Vec<RawEvent>>,
}

impl JsonEventSource {
    /// # Errors
    /// Returns `OpenHoursError::Json` if the input is not a calendar-keyed object.
    pub fn from_json(json: &str) -> Result<Self> {
        let payloads: BTreeMap<String, CalendarPayload> = serde_json::from_str(json)?;
        Ok(Self {
            calendars: payloads
                .into_iter()
                .map(|(id, payload)| (id, payload.into_events()))
                .collect(),
        })
    }

    /// Add or replace the events of one calendar.
    pub fn insert(&mut self, calendar_id: impl Into<String>, events: Vec<RawEvent>) {
        self.calendars.insert(calendar_id.into(), events);
    }

    pub fn calendar_ids(&self) -> impl Iterator<Item = &str> {
        self.calendars.keys().map(String::as_str)
    }
}

impl EventSource for JsonEventSource {
    fn fetch_events(&self, calendar_id: &str) -> Result<Vec<RawEvent>> {
        self.calendars
            .get(calendar_id)
            .cloned()
            .ok_or_else(|| OpenHoursError::UnknownCalendar(calendar_id.to_string()))
    }
}

/// Fetch every listed calendar and concatenate the events in calendar order,
/// tagging each event with the calendar it came from.
pub fn collect_events<S>(source: &S, calendars: &[String]) -> Result<Vec<RawEvent>>
where
    S: EventSource + ?Sized,
{
    let mut all_events = Vec::new();
    for calendar_id in calendars {
        let events = source.fetch_events(calendar_id)?;
        debug!(calendar = %calendar_id, events = events.len(), "fetched events");
        all_events.extend(events.into_iter().map(|mut event| {
            event.calendar_id.clone_from(calendar_id);
            event
        }));
    }
    Ok(all_events)
}
