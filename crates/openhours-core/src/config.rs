//! Immutable per-run configuration: timezone, working hours, calendars,
//! minimum slot length, excluded weekdays, and the reporting window.

use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Weekday};
use chrono_tz::Tz;

use crate::dst;
use crate::error::{OpenHoursError, Result};

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;
pub const DEFAULT_DAY_START_HOUR: u32 = 10;
pub const DEFAULT_DAY_END_HOUR: u32 = 17;
pub const DEFAULT_CALENDAR: &str = "primary";
pub const DEFAULT_MIN_SLOT_MINUTES: u32 = 30;
pub const DEFAULT_EXCLUDED_WEEKDAYS: [Weekday; 2] = [Weekday::Sat, Weekday::Sun];

/// Length of the default reporting window, counted from today.
pub const DEFAULT_WINDOW_DAYS: i64 = 21;

/// Padding applied on each side of the window when querying a provider, so
/// events that start before the window but run into it are still returned.
pub const FETCH_PADDING_DAYS: i64 = 1;

/// Settings for one availability run.
///
/// Built once, validated on construction, and passed by reference into the
/// resolver. Nothing here changes during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    timezone: Tz,
    day_start_hour: u32,
    day_end_hour: u32,
    calendars: Vec<String>,
    min_slot_minutes: u32,
    excluded_weekdays: Vec<Weekday>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            day_start_hour: DEFAULT_DAY_START_HOUR,
            day_end_hour: DEFAULT_DAY_END_HOUR,
            calendars: vec![DEFAULT_CALENDAR.to_string()],
            min_slot_minutes: DEFAULT_MIN_SLOT_MINUTES,
            excluded_weekdays: DEFAULT_EXCLUDED_WEEKDAYS.to_vec(),
        }
    }
}

impl ReportConfig {
    /// Create a configuration with the given timezone and working hours.
    ///
    /// Calendars, minimum slot length and excluded weekdays start at their
    /// defaults and can be replaced with the `with_*` methods.
    ///
    /// # Errors
    /// Returns `OpenHoursError::InvalidTimezone` for an unknown IANA name and
    /// `OpenHoursError::InvalidConfig` unless `day_start_hour < day_end_hour <= 23`.
    pub fn new(timezone: &str, day_start_hour: u32, day_end_hour: u32) -> Result<Self> {
        let timezone = parse_timezone(timezone)?;
        Self::default()
            .with_timezone(timezone)
            .with_working_hours(day_start_hour, day_end_hour)
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Replace the working hours `[day_start_hour, day_end_hour)`.
    ///
    /// # Errors
    /// Returns `OpenHoursError::InvalidConfig` unless `day_start_hour < day_end_hour <= 23`.
    pub fn with_working_hours(mut self, day_start_hour: u32, day_end_hour: u32) -> Result<Self> {
        if day_end_hour > 23 {
            return Err(OpenHoursError::InvalidConfig(format!(
                "day end hour must be between 0 and 23, got {day_end_hour}"
            )));
        }
        if day_start_hour >= day_end_hour {
            return Err(OpenHoursError::InvalidConfig(format!(
                "day start hour ({day_start_hour}) must be before day end hour ({day_end_hour})"
            )));
        }
        self.day_start_hour = day_start_hour;
        self.day_end_hour = day_end_hour;
        Ok(self)
    }

    /// Replace the calendar list. Order is kept; duplicates are dropped.
    ///
    /// # Errors
    /// Returns `OpenHoursError::InvalidConfig` if no calendar is given.
    pub fn with_calendars<I, S>(mut self, calendars: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids: Vec<String> = Vec::new();
        for id in calendars {
            let id = id.into();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        if ids.is_empty() {
            return Err(OpenHoursError::InvalidConfig(
                "at least one calendar is required".to_string(),
            ));
        }
        self.calendars = ids;
        Ok(self)
    }

    /// # Errors
    /// Returns `OpenHoursError::InvalidConfig` if `minutes` is zero.
    pub fn with_min_slot_minutes(mut self, minutes: u32) -> Result<Self> {
        if minutes == 0 {
            return Err(OpenHoursError::InvalidConfig(
                "minimum slot length must be positive".to_string(),
            ));
        }
        self.min_slot_minutes = minutes;
        Ok(self)
    }

    /// Replace the excluded weekdays with the given names.
    ///
    /// Accepts full or three-letter names in any case (`"Friday"`, `"fri"`).
    ///
    /// # Errors
    /// Returns `OpenHoursError::InvalidConfig` for an unknown name, or when
    /// every day of the week would be excluded.
    pub fn with_excluded_weekdays<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut days: Vec<Weekday> = Vec::new();
        for name in names {
            let day = parse_weekday(name.as_ref())?;
            if !days.contains(&day) {
                days.push(day);
            }
        }
        if days.len() == 7 {
            return Err(OpenHoursError::InvalidConfig(
                "cannot exclude every day of the week".to_string(),
            ));
        }
        days.sort_by_key(Weekday::num_days_from_monday);
        self.excluded_weekdays = days;
        Ok(self)
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn day_start_hour(&self) -> u32 {
        self.day_start_hour
    }

    pub fn day_end_hour(&self) -> u32 {
        self.day_end_hour
    }

    pub fn calendars(&self) -> &[String] {
        &self.calendars
    }

    pub fn min_slot_minutes(&self) -> u32 {
        self.min_slot_minutes
    }

    /// Excluded weekdays, Monday first.
    pub fn excluded_weekdays(&self) -> &[Weekday] {
        &self.excluded_weekdays
    }

    pub fn is_excluded(&self, day: Weekday) -> bool {
        self.excluded_weekdays.contains(&day)
    }

    /// Start of working hours on `date`, in the configured timezone.
    pub fn day_start_on(&self, date: NaiveDate) -> Result<DateTime<Tz>> {
        dst::localize(self.timezone, date, self.day_start_hour)
    }

    /// End of working hours on `date`, in the configured timezone.
    pub fn day_end_on(&self, date: NaiveDate) -> Result<DateTime<Tz>> {
        dst::localize(self.timezone, date, self.day_end_hour)
    }

    /// Build the window from `start_date` at the day start hour to `end_date`
    /// at the day end hour.
    ///
    /// A single day whose working hours fall entirely inside a DST gap
    /// resolves both bounds to the same instant. That yields an empty window,
    /// which reports no availability rather than failing.
    ///
    /// # Errors
    /// Returns `OpenHoursError::InvalidConfig` if `end_date` is before `start_date`.
    pub fn window(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<ReportWindow> {
        if end_date < start_date {
            return Err(OpenHoursError::InvalidConfig(format!(
                "end date {end_date} is before start date {start_date}"
            )));
        }
        let start = self.day_start_on(start_date)?;
        let end = self.day_end_on(end_date)?;
        Ok(ReportWindow {
            start,
            end: end.max(start),
        })
    }

    /// The window used when no dates are given: `today` through three weeks later.
    pub fn default_window(&self, today: NaiveDate) -> Result<ReportWindow> {
        self.window(today, today + Duration::days(DEFAULT_WINDOW_DAYS))
    }
}

/// The `[start, end]` span a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl ReportWindow {
    /// # Errors
    /// Returns `OpenHoursError::InvalidConfig` unless `start < end`.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self> {
        if start >= end {
            return Err(OpenHoursError::InvalidConfig(format!(
                "report window start {} is not before its end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    /// The span a provider should be queried for: the window padded by a day
    /// on each side.
    pub fn fetch_range(&self) -> (DateTime<Tz>, DateTime<Tz>) {
        let padding = Duration::days(FETCH_PADDING_DAYS);
        (self.start - padding, self.end + padding)
    }
}

/// Parse an IANA timezone name such as `"America/New_York"`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| OpenHoursError::InvalidTimezone(name.to_string()))
}

/// Parse a weekday name, full or abbreviated, in any case.
pub fn parse_weekday(name: &str) -> Result<Weekday> {
    Weekday::from_str(name.trim())
        .map_err(|_| OpenHoursError::InvalidConfig(format!("unknown weekday: '{name}'")))
}

/// The full English name of a weekday, as used in report output.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

