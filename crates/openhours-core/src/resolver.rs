//! Resolve free intervals from a sorted busy list.
//!
//! Three passes, run in order by [`resolve`]:
//!
//! 1. [`generate_candidates`] walks the window in fixed 15-minute steps,
//!    staying inside working hours and skipping excluded weekdays.
//! 2. [`filter_free`] keeps candidates that overlap no busy interval.
//! 3. [`merge_adjacent`] joins touching candidates and drops runs shorter
//!    than the minimum slot length.
//!
//! Day grouping and text rendering live in [`crate::report`].

use chrono::{DateTime, Datelike, Duration, NaiveDate};
use chrono_tz::Tz;
use tracing::{debug, trace};

use crate::config::{ReportConfig, ReportWindow};
use crate::error::{OpenHoursError, Result};
use crate::interval::Interval;

/// Width of every candidate interval.
pub const CANDIDATE_STEP_MINUTES: i64 = 15;

/// Generate fixed-width candidate intervals across the window.
///
/// A window start outside working hours is moved forward to the next
/// working-hour start; one inside working hours is rounded up to the next
/// quarter hour counted from that day's start. A candidate is emitted only if
/// it fits entirely inside both the window and its day's working hours. When
/// the next step would cross the day end, the walk jumps to the next
/// non-excluded day.
pub fn generate_candidates(config: &ReportConfig, window: &ReportWindow) -> Result<Vec<Interval>> {
    let tz = config.timezone();
    let step = Duration::minutes(CANDIDATE_STEP_MINUTES);
    let end_bound = window.end().with_timezone(&tz);

    let mut cursor = clamp_to_working_hours(window.start().with_timezone(&tz), config)?;
    let mut day_end = config.day_end_on(cursor.date_naive())?;
    let mut candidates = Vec::new();

    while cursor < end_bound {
        if cursor + step > day_end {
            cursor = next_working_day_start(cursor.date_naive(), config)?;
            day_end = config.day_end_on(cursor.date_naive())?;
            continue;
        }

        let candidate_end = cursor + step;
        if candidate_end > end_bound {
            break;
        }
        candidates.push(Interval::new(cursor, candidate_end)?);
        cursor = candidate_end;
    }

    trace!(count = candidates.len(), "generated candidates");
    Ok(candidates)
}

/// Keep only candidates that overlap none of the busy intervals.
///
/// Touching endpoints do not count as overlap. Candidate order is preserved.
///
/// # Errors
/// Returns `OpenHoursError::Unsorted` if `busy` is not sorted by start.
pub fn filter_free(candidates: &[Interval], busy: &[Interval]) -> Result<Vec<Interval>> {
    ensure_sorted("busy list", busy)?;

    Ok(candidates
        .iter()
        .filter(|candidate| busy.iter().all(|b| !candidate.overlaps(b)))
        .copied()
        .collect())
}

/// Coalesce runs of exactly touching intervals and drop short runs.
///
/// A run is kept only if it lasts at least `min_slot_minutes`.
///
/// # Errors
/// Returns `OpenHoursError::Unsorted` if an interval starts before the
/// previous one ends.
pub fn merge_adjacent(free: &[Interval], min_slot_minutes: u32) -> Result<Vec<Interval>> {
    let min_length = Duration::minutes(i64::from(min_slot_minutes));
    let mut merged = Vec::new();

    let mut remaining = free.iter();
    let Some(first) = remaining.next() else {
        return Ok(merged);
    };

    let mut current = *first;
    for next in remaining {
        if current.abuts(next) {
            current = current.extended_by(next);
            continue;
        }
        if next.start() < current.end() {
            return Err(unsorted("free candidates", &current, next));
        }
        if current.duration() >= min_length {
            merged.push(current);
        }
        current = *next;
    }
    if current.duration() >= min_length {
        merged.push(current);
    }

    Ok(merged)
}

/// Run candidate generation, busy filtering and merging for one window.
///
/// An empty result means no availability; it is not an error.
pub fn resolve(
    busy: &[Interval],
    config: &ReportConfig,
    window: &ReportWindow,
) -> Result<Vec<Interval>> {
    let candidates = generate_candidates(config, window)?;
    let free = filter_free(&candidates, busy)?;
    let merged = merge_adjacent(&free, config.min_slot_minutes())?;

    debug!(
        candidates = candidates.len(),
        busy = busy.len(),
        free = free.len(),
        merged = merged.len(),
        "resolved free intervals"
    );
    Ok(merged)
}

/// Move `instant` forward to the nearest candidate boundary inside working
/// hours on a non-excluded day.
fn clamp_to_working_hours(instant: DateTime<Tz>, config: &ReportConfig) -> Result<DateTime<Tz>> {
    let date = instant.date_naive();
    if config.is_excluded(date.weekday()) {
        return next_working_day_start(date, config);
    }

    let day_start = config.day_start_on(date)?;
    if instant < day_start {
        return Ok(day_start);
    }

    // Candidates sit on the grid day_start + k * step; round up onto it.
    let step_secs = CANDIDATE_STEP_MINUTES * 60;
    let whole_steps = (instant - day_start).num_seconds() / step_secs;
    let mut aligned = day_start + Duration::seconds(whole_steps * step_secs);
    if aligned < instant {
        aligned += Duration::seconds(step_secs);
    }

    if aligned >= config.day_end_on(date)? {
        return next_working_day_start(date, config);
    }
    Ok(aligned)
}

/// Working-hour start on the first non-excluded day after `date`.
fn next_working_day_start(date: NaiveDate, config: &ReportConfig) -> Result<DateTime<Tz>> {
    let mut day = next_day(date)?;
    while config.is_excluded(day.weekday()) {
        day = next_day(day)?;
    }
    config.day_start_on(day)
}

fn next_day(date: NaiveDate) -> Result<NaiveDate> {
    date.succ_opt()
        .ok_or_else(|| OpenHoursError::InvalidConfig(format!("no calendar day after {date}")))
}

fn ensure_sorted(list: &'static str, intervals: &[Interval]) -> Result<()> {
    match intervals
        .windows(2)
        .find(|pair| pair[1].start() < pair[0].start())
    {
        Some(pair) => Err(unsorted(list, &pair[0], &pair[1])),
        None => Ok(()),
    }
}

fn unsorted(list: &'static str, previous: &Interval, next: &Interval) -> OpenHoursError {
    OpenHoursError::Unsorted {
        list,
        previous: previous.start().to_rfc3339(),
        next: next.start().to_rfc3339(),
    }
}
