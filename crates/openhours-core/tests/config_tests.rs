//! Tests for configuration validation, reporting windows and DST resolution.

use chrono::{Duration, NaiveDate, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::America::New_York;
use openhours_core::config::{parse_weekday, weekday_name, DEFAULT_WINDOW_DAYS};
use openhours_core::dst::localize;
use openhours_core::{
    compute_availability, OpenHoursError, ReportConfig, ReportWindow, NO_AVAILABILITY,
};

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap()
}

// ── Construction and validation ─────────────────────────────────────────────

#[test]
fn defaults_match_documented_values() {
    let config = ReportConfig::default();

    assert_eq!(config.timezone(), New_York);
    assert_eq!(config.day_start_hour(), 10);
    assert_eq!(config.day_end_hour(), 17);
    assert_eq!(config.calendars(), ["primary".to_string()]);
    assert_eq!(config.min_slot_minutes(), 30);
    assert_eq!(config.excluded_weekdays(), [Weekday::Sat, Weekday::Sun]);
}

#[test]
fn unknown_timezone_is_rejected() {
    let err = ReportConfig::new("Mars/Olympus_Mons", 10, 17).unwrap_err();

    assert!(matches!(err, OpenHoursError::InvalidTimezone(name) if name == "Mars/Olympus_Mons"));
}

#[test]
fn start_hour_must_precede_end_hour() {
    assert!(matches!(
        ReportConfig::new("UTC", 17, 17),
        Err(OpenHoursError::InvalidConfig(_))
    ));
    assert!(matches!(
        ReportConfig::new("UTC", 18, 9),
        Err(OpenHoursError::InvalidConfig(_))
    ));
}

#[test]
fn end_hour_above_23_is_rejected() {
    assert!(matches!(
        ReportConfig::new("UTC", 9, 24),
        Err(OpenHoursError::InvalidConfig(_))
    ));
}

#[test]
fn zero_minimum_slot_is_rejected() {
    let err = ReportConfig::default().with_min_slot_minutes(0).unwrap_err();

    assert!(matches!(err, OpenHoursError::InvalidConfig(_)));
}

#[test]
fn calendars_keep_order_and_drop_duplicates() {
    let config = ReportConfig::default()
        .with_calendars(["team", "primary", "team"])
        .unwrap();

    assert_eq!(config.calendars(), ["team".to_string(), "primary".to_string()]);
}

#[test]
fn empty_calendar_list_is_rejected() {
    let err = ReportConfig::default()
        .with_calendars(Vec::<String>::new())
        .unwrap_err();

    assert!(matches!(err, OpenHoursError::InvalidConfig(_)));
}

// ── Weekdays ────────────────────────────────────────────────────────────────

#[test]
fn weekday_names_parse_in_any_case_and_length() {
    assert_eq!(parse_weekday("Friday").unwrap(), Weekday::Fri);
    assert_eq!(parse_weekday("fri").unwrap(), Weekday::Fri);
    assert_eq!(parse_weekday("SUNDAY").unwrap(), Weekday::Sun);
    assert_eq!(parse_weekday(" tue ").unwrap(), Weekday::Tue);
}

#[test]
fn unknown_weekday_is_rejected() {
    let err = ReportConfig::default()
        .with_excluded_weekdays(["Funday"])
        .unwrap_err();

    assert!(matches!(err, OpenHoursError::InvalidConfig(msg) if msg.contains("Funday")));
}

#[test]
fn excluded_weekdays_are_deduplicated_and_ordered() {
    let config = ReportConfig::default()
        .with_excluded_weekdays(["Sunday", "fri", "Saturday", "friday"])
        .unwrap();

    assert_eq!(
        config.excluded_weekdays(),
        [Weekday::Fri, Weekday::Sat, Weekday::Sun]
    );
    assert!(config.is_excluded(Weekday::Fri));
    assert!(!config.is_excluded(Weekday::Mon));
}

#[test]
fn excluding_every_weekday_is_rejected() {
    let all = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

    let err = ReportConfig::default().with_excluded_weekdays(all).unwrap_err();

    assert!(matches!(err, OpenHoursError::InvalidConfig(_)));
}

#[test]
fn weekday_names_render_in_full() {
    assert_eq!(weekday_name(Weekday::Wed), "Wednesday");
    assert_eq!(weekday_name(Weekday::Sat), "Saturday");
}

// ── Windows ─────────────────────────────────────────────────────────────────

#[test]
fn window_spans_start_of_first_day_to_end_of_last_day() {
    let window = ReportConfig::default()
        .window(date(3, 16), date(3, 20))
        .unwrap();

    assert_eq!(
        window.start(),
        New_York.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap()
    );
    assert_eq!(
        window.end(),
        New_York.with_ymd_and_hms(2026, 3, 20, 17, 0, 0).unwrap()
    );
}

#[test]
fn single_day_window_is_valid() {
    let window = ReportConfig::default()
        .window(date(3, 16), date(3, 16))
        .unwrap();

    assert_eq!(window.end() - window.start(), Duration::hours(7));
}

#[test]
fn window_end_before_start_is_rejected() {
    let err = ReportConfig::default()
        .window(date(3, 20), date(3, 16))
        .unwrap_err();

    assert!(matches!(err, OpenHoursError::InvalidConfig(_)));
}

#[test]
fn explicit_window_must_have_positive_length() {
    let at = New_York.with_ymd_and_hms(2026, 3, 16, 12, 0, 0).unwrap();

    assert!(ReportWindow::new(at, at).is_err());
}

#[test]
fn default_window_covers_three_weeks() {
    let window = ReportConfig::default().default_window(date(3, 16)).unwrap();

    assert_eq!(window.start().date_naive(), date(3, 16));
    assert_eq!(
        window.end().date_naive(),
        date(3, 16) + Duration::days(DEFAULT_WINDOW_DAYS)
    );
}

#[test]
fn fetch_range_pads_one_day_each_side() {
    let window = ReportConfig::default()
        .window(date(3, 16), date(3, 20))
        .unwrap();

    let (from, to) = window.fetch_range();

    assert_eq!(from, window.start() - Duration::days(1));
    assert_eq!(to, window.end() + Duration::days(1));
}

// ── DST resolution ──────────────────────────────────────────────────────────

#[test]
fn ordinary_local_time_maps_directly() {
    let dt = localize(New_York, date(3, 16), 10).unwrap();

    assert_eq!(dt.with_timezone(&Utc), Utc.with_ymd_and_hms(2026, 3, 16, 14, 0, 0).unwrap());
}

#[test]
fn spring_forward_gap_shifts_to_next_valid_hour() {
    // 2026-03-08 02:00 does not exist in New York.
    let dt = localize(New_York, date(3, 8), 2).unwrap();

    assert_eq!(dt.hour(), 3);
    assert_eq!(dt.with_timezone(&Utc), Utc.with_ymd_and_hms(2026, 3, 8, 7, 0, 0).unwrap());
}

#[test]
fn fall_back_ambiguity_takes_earlier_instant() {
    // 2026-11-01 01:00 happens twice in New York; the first is EDT (UTC-4).
    let dt = localize(New_York, date(11, 1), 1).unwrap();

    assert_eq!(dt.with_timezone(&Utc), Utc.with_ymd_and_hms(2026, 11, 1, 5, 0, 0).unwrap());
}

#[test]
fn out_of_range_hour_is_an_error() {
    assert!(matches!(
        localize(New_York, date(3, 16), 24),
        Err(OpenHoursError::NonexistentLocalTime(_))
    ));
}

#[test]
fn working_hours_inside_spring_forward_gap_report_no_availability() {
    // 02:00 and 03:00 both resolve to 03:00 EDT on 2026-03-08.
    let config = ReportConfig::new("America/New_York", 2, 3)
        .unwrap()
        .with_excluded_weekdays(Vec::<&str>::new())
        .unwrap();

    let window = config.window(date(3, 8), date(3, 8)).unwrap();
    assert_eq!(window.start(), window.end());

    let report = compute_availability(&[], &config, &window).unwrap();
    assert!(report.is_empty());
    assert_eq!(report.lines(), vec![NO_AVAILABILITY]);
}
