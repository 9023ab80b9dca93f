//! `openhours` CLI — print free time across one or more calendars.
//!
//! ## Usage
//!
//! ```sh
//! # Next three weeks, events exported as JSON on stdin
//! openhours < events.json
//!
//! # Explicit date range, events from a file
//! openhours 2026-03-16 2026-03-20 --events events.json
//!
//! # Override working hours, calendars and skipped days
//! openhours --day-start 9 --day-end 18 --calendar primary --calendar team@example.com \
//!     --exclude fri,sat,sun --min-slot 45 --events events.json
//!
//! # Settings from a TOML file, machine-readable output
//! openhours --config openhours.toml --format json --events events.json
//! ```

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{ArgAction, Parser, ValueEnum};
use openhours_core::config::parse_timezone;
use openhours_core::report::summary_lines;
use openhours_core::{collect_events, compute_availability, JsonEventSource, ReportConfig};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "openhours",
    version,
    about = "Print free time across your calendars"
)]
struct Cli {
    /// First date to report (YYYY-MM-DD); requires END
    #[arg(requires = "end")]
    start: Option<NaiveDate>,

    /// Last date to report (YYYY-MM-DD)
    end: Option<NaiveDate>,

    /// TOML settings file; command-line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Calendar events as JSON keyed by calendar id (reads stdin if omitted)
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// IANA timezone for all output (e.g. America/New_York)
    #[arg(long)]
    timezone: Option<String>,

    /// First working hour, 0-23
    #[arg(long)]
    day_start: Option<u32>,

    /// Hour at which the working day ends, 0-23
    #[arg(long)]
    day_end: Option<u32>,

    /// Calendar id to read; repeat for several calendars
    #[arg(long = "calendar", action = ArgAction::Append)]
    calendars: Vec<String>,

    /// Shortest free slot worth reporting, in minutes
    #[arg(long)]
    min_slot: Option<u32>,

    /// Comma-separated weekdays to skip, or "none"
    #[arg(long, value_delimiter = ',')]
    exclude: Option<Vec<String>>,

    /// Date the default three-week window starts from (defaults to today)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print only the availability lines, without the preamble
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Settings read from `--config`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    timezone: Option<String>,
    day_start_hour: Option<u32>,
    day_end_hour: Option<u32>,
    calendars: Option<Vec<String>>,
    min_slot_minutes: Option<u32>,
    excluded_weekdays: Option<Vec<String>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file_config = match cli.config.as_deref() {
        Some(path) => load_file_config(path)?,
        None => FileConfig::default(),
    };
    let config = build_config(&cli, file_config)?;

    let window = match (cli.start, cli.end) {
        (Some(start), Some(end)) => config.window(start, end),
        _ => {
            let today = cli
                .today
                .unwrap_or_else(|| Utc::now().with_timezone(&config.timezone()).date_naive());
            config.default_window(today)
        }
    }
    .context("Invalid report window")?;

    let json = read_input(cli.events.as_deref())?;
    let source = JsonEventSource::from_json(&json).context("Failed to parse calendar events")?;
    let events = collect_events(&source, config.calendars())
        .context("Failed to read calendar events")?;
    info!(events = events.len(), calendars = config.calendars().len(), "loaded events");

    let report = compute_availability(&events, &config, &window)
        .context("Failed to compute availability")?;

    match cli.format {
        Format::Text => {
            if !cli.quiet {
                for line in summary_lines(&config, &window) {
                    println!("{line}");
                }
            }
            for line in report.lines() {
                println!("{line}");
            }
        }
        Format::Json => {
            let json = report.to_json().context("Failed to encode report")?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for the report.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Layer defaults, then the config file, then command-line flags.
fn build_config(cli: &Cli, file: FileConfig) -> Result<ReportConfig> {
    let mut config = ReportConfig::default();

    if let Some(name) = cli.timezone.as_deref().or(file.timezone.as_deref()) {
        config = config.with_timezone(parse_timezone(name)?);
    }

    let day_start = cli
        .day_start
        .or(file.day_start_hour)
        .unwrap_or(config.day_start_hour());
    let day_end = cli
        .day_end
        .or(file.day_end_hour)
        .unwrap_or(config.day_end_hour());
    config = config.with_working_hours(day_start, day_end)?;

    if !cli.calendars.is_empty() {
        config = config.with_calendars(cli.calendars.iter().cloned())?;
    } else if let Some(calendars) = file.calendars {
        config = config.with_calendars(calendars)?;
    }

    if let Some(minutes) = cli.min_slot.or(file.min_slot_minutes) {
        config = config.with_min_slot_minutes(minutes)?;
    }

    if let Some(days) = cli.exclude.clone().or(file.excluded_weekdays) {
        config = config.with_excluded_weekdays(weekday_names(&days))?;
    }

    Ok(config)
}

/// Drop blanks; a lone "none" means no excluded days.
fn weekday_names(raw: &[String]) -> Vec<&str> {
    let names: Vec<&str> = raw
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    match names.as_slice() {
        [only] if only.eq_ignore_ascii_case("none") => Vec::new(),
        _ => names,
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
