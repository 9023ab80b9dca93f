//! Group free intervals by day and render them for people or machines.
//!
//! Text output is one line per date, e.g.
//!
//! ```text
//! Mon, March 16: 10:00-12:00 or 1:00-5:00
//! Tue, March 17: 10:00-11:00, 1:30-2:30, or 4:00-5:00
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{weekday_name, ReportConfig, ReportWindow};
use crate::error::Result;
use crate::interval::Interval;

/// Printed instead of day lines when nothing is free.
pub const NO_AVAILABILITY: &str = "No free time in this interval, sorry";

/// Free intervals that start on one calendar date, in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slots: Vec<Interval>,
}

impl DayAvailability {
    /// Each slot rendered as `"<start>-<end>"`.
    pub fn ranges(&self) -> Vec<String> {
        self.slots.iter().map(format_range).collect()
    }

    /// `"<Wkd>, <Month> <DD>: <ranges>"`.
    pub fn line(&self) -> String {
        format!(
            "{}: {}",
            self.date.format("%a, %B %d"),
            join_ranges(&self.ranges())
        )
    }
}

/// Day-grouped availability for one run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    pub days: Vec<DayAvailability>,
}

impl Report {
    /// Group intervals by the local date of their start. Dates come out in
    /// ascending order; slots within a date keep their input order.
    pub fn from_intervals(intervals: &[Interval]) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Vec<Interval>> = BTreeMap::new();
        for interval in intervals {
            by_date
                .entry(interval.start().date_naive())
                .or_default()
                .push(*interval);
        }

        Self {
            days: by_date
                .into_iter()
                .map(|(date, slots)| DayAvailability { date, slots })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// One line per date, or the single [`NO_AVAILABILITY`] line.
    pub fn lines(&self) -> Vec<String> {
        if self.is_empty() {
            return vec![NO_AVAILABILITY.to_string()];
        }
        self.days.iter().map(DayAvailability::line).collect()
    }

    /// Pretty-printed JSON: `{"available", "days": [{"date", "text", "slots"}]}`.
    pub fn to_json(&self) -> Result<String> {
        let dto = ReportDto {
            available: !self.is_empty(),
            days: self.days.iter().map(DayDto::from).collect(),
        };
        Ok(serde_json::to_string_pretty(&dto)?)
    }
}

/// Render `"<start>-<end>"` on a 12-hour clock without hour padding, e.g. `"2:00-3:30"`.
pub fn format_range(interval: &Interval) -> String {
    format!(
        "{}-{}",
        interval.start().format("%-I:%M"),
        interval.end().format("%-I:%M")
    )
}

/// Join ranges as an English list: `a`, `a or b`, `a, b, or c`.
pub fn join_ranges(ranges: &[String]) -> String {
    match ranges {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}

/// The preamble printed before the report: window, slot length, calendars,
/// timezone and skipped days.
pub fn summary_lines(config: &ReportConfig, window: &ReportWindow) -> Vec<String> {
    let tz = config.timezone();
    let skipped = if config.excluded_weekdays().is_empty() {
        "no days".to_string()
    } else {
        config
            .excluded_weekdays()
            .iter()
            .map(|day| weekday_name(*day))
            .collect::<Vec<_>>()
            .join(", ")
    };

    vec![
        format!(
            "Printing availabilities between {} and {} of at least {} minutes",
            window.start().with_timezone(&tz).format("%Y-%m-%d %H:%M"),
            window.end().with_timezone(&tz).format("%Y-%m-%d %H:%M"),
            config.min_slot_minutes()
        ),
        format!(
            "Drawing from calendars {} using timezone {}, skipping {}",
            config.calendars().join(", "),
            tz.name(),
            skipped
        ),
        "Your availabilities are:".to_string(),
    ]
}

// ---------------------------------------------------------------------------
// Serde DTOs for JSON output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ReportDto {
    available: bool,
    days: Vec<DayDto>,
}

#[derive(Serialize)]
struct DayDto {
    date: NaiveDate,
    text: String,
    slots: Vec<SlotDto>,
}

#[derive(Serialize)]
struct SlotDto {
    start: String,
    end: String,
    duration_minutes: i64,
    text: String,
}

impl From<&DayAvailability> for DayDto {
    fn from(day: &DayAvailability) -> Self {
        Self {
            date: day.date,
            text: day.line(),
            slots: day.slots.iter().map(SlotDto::from).collect(),
        }
    }
}

impl From<&Interval> for SlotDto {
    fn from(interval: &Interval) -> Self {
        Self {
            start: interval.start().to_rfc3339(),
            end: interval.end().to_rfc3339(),
            duration_minutes: interval.duration().num_minutes(),
            text: format_range(interval),
        }
    }
}
