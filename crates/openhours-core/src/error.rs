//! Error types for openhours-core operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenHoursError {
    /// A provider timestamp was missing or not valid RFC 3339 with an offset.
    #[error("Invalid timestamp in event from calendar '{calendar}': {message}")]
    InvalidTimestamp { calendar: String, message: String },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An interval whose start is not strictly before its end.
    #[error("Invalid interval: start {start} is not before end {end}")]
    InvalidInterval { start: String, end: String },

    /// A list that downstream phases scan linearly was not sorted by start.
    #[error("{list} is not sorted: interval starting {next} follows one starting {previous}")]
    Unsorted {
        list: &'static str,
        previous: String,
        next: String,
    },

    /// A working-hour boundary has no instant in the target timezone.
    #[error("No valid local time for {0}")]
    NonexistentLocalTime(String),

    #[error("Unknown calendar: {0}")]
    UnknownCalendar(String),

    /// Event payloads or report output could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OpenHoursError>;
