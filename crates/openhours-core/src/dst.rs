//! Mapping working-hour boundaries onto instants across DST transitions.
//!
//! A wall-clock hour on a given date is not always a single instant: during
//! fall-back it occurs twice, during spring-forward it may not occur at all.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, TimeZone};
use chrono_tz::Tz;

use crate::error::{OpenHoursError, Result};

/// How far past a nonexistent local time we look for the first valid one.
const MAX_GAP_HOURS: i64 = 3;

/// Resolve `hour:00` on `date` in `tz` to a concrete instant.
///
/// - Unambiguous local times map directly.
/// - Ambiguous local times (fall-back) take the earlier instant.
/// - Nonexistent local times (spring-forward gap) shift forward to the first
///   whole hour that exists.
///
/// # Errors
/// Returns `OpenHoursError::NonexistentLocalTime` if `hour` is out of range or
/// no valid local time is found within a few hours of the requested one.
pub fn localize(tz: Tz, date: NaiveDate, hour: u32) -> Result<DateTime<Tz>> {
    let naive = date
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| OpenHoursError::NonexistentLocalTime(format!("{date} {hour}:00")))?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => (1..=MAX_GAP_HOURS)
            .find_map(|shift| tz.from_local_datetime(&(naive + Duration::hours(shift))).earliest())
            .ok_or_else(|| OpenHoursError::NonexistentLocalTime(format!("{naive} in {tz}"))),
    }
}
