//! Time intervals in a single fixed timezone.
//!
//! Busy intervals come from the normalizer, free intervals from the resolver;
//! both share this type. The constructor enforces `start < end`, so every
//! `Interval` in circulation is well-formed.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use crate::error::{OpenHoursError, Result};

/// A half-open span of time `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl Interval {
    /// Build an interval, rejecting empty or reversed spans.
    ///
    /// # Errors
    /// Returns `OpenHoursError::InvalidInterval` if `start >= end`.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self> {
        if start >= end {
            return Err(OpenHoursError::InvalidInterval {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Two intervals overlap when neither ends at or before the other starts.
    ///
    /// Touching endpoints (`a.end == b.start`) are NOT an overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }

    /// Returns true when `other` begins exactly where `self` ends.
    pub fn abuts(&self, other: &Interval) -> bool {
        self.end == other.start
    }

    /// Extend this interval to cover `other`, which must abut it.
    pub(crate) fn extended_by(self, other: &Interval) -> Self {
        debug_assert!(self.abuts(other));
        Self {
            start: self.start,
            end: other.end,
        }
    }
}
