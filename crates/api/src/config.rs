//! # API Configuration Module
//!
//! Loads the server and scheduling configuration from environment variables,
//! with defaults where a sensible one exists.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `BUSINESS_UTC_OFFSET`: Fixed offset all times are interpreted in (default: "-03:00")
//! - `WORK_DAY_START` / `WORK_DAY_END`: Default working window (default: 09:00 to 20:00)
//! - `WORK_CLOSED_DAYS`: Comma-separated weekdays with no working hours, e.g. "sun"
//! - `WORK_HOURS_MON` .. `WORK_HOURS_SUN`: Per-weekday window as "HH:MM-HH:MM", or "closed"

use chrono::{FixedOffset, Weekday};
use eyre::{Result, WrapErr};
use shiftbook_core::hours::{DaySchedule, WorkingHours, parse_day_schedule, parse_weekday};
use shiftbook_core::time::{Interval, default_offset, parse_offset, parse_time_of_day};
use std::env;
use tracing::Level;

const WEEKDAY_VARS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "WORK_HOURS_MON"),
    (Weekday::Tue, "WORK_HOURS_TUE"),
    (Weekday::Wed, "WORK_HOURS_WED"),
    (Weekday::Thu, "WORK_HOURS_THU"),
    (Weekday::Fri, "WORK_HOURS_FRI"),
    (Weekday::Sat, "WORK_HOURS_SAT"),
    (Weekday::Sun, "WORK_HOURS_SUN"),
];

/// Configuration for the Shiftbook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use shiftbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Offset every date and time of day is anchored in
    pub business_offset: FixedOffset,

    /// Working windows used by the availability calculator
    pub working_hours: WorkingHours,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - The business offset or any working-hours variable is malformed
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Scheduling settings
        let business_offset = match env::var("BUSINESS_UTC_OFFSET") {
            Ok(value) => parse_offset(&value).wrap_err("Invalid BUSINESS_UTC_OFFSET value")?,
            Err(_) => default_offset(),
        };
        let working_hours = working_hours_from(|name| env::var(name).ok())?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            business_offset,
            working_hours,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_log_level(value: &str) -> Level {
    match value.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Builds the working-hours configuration from a variable lookup.
pub fn working_hours_from<F>(lookup: F) -> Result<WorkingHours>
where
    F: Fn(&str) -> Option<String>,
{
    let start = lookup("WORK_DAY_START").unwrap_or_else(|| "09:00".to_string());
    let end = lookup("WORK_DAY_END").unwrap_or_else(|| "20:00".to_string());
    let window = Interval::new(
        parse_time_of_day(start.trim()).wrap_err("Invalid WORK_DAY_START value")?,
        parse_time_of_day(end.trim()).wrap_err("Invalid WORK_DAY_END value")?,
    );
    let mut hours = WorkingHours::new(window).wrap_err("Invalid default working window")?;

    if let Some(days) = lookup("WORK_CLOSED_DAYS") {
        for day in days.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            let weekday = parse_weekday(day).wrap_err("Invalid WORK_CLOSED_DAYS value")?;
            hours = hours.with_weekday(weekday, DaySchedule::Closed)?;
        }
    }

    for (weekday, name) in WEEKDAY_VARS {
        if let Some(value) = lookup(name) {
            let schedule =
                parse_day_schedule(&value).wrap_err_with(|| format!("Invalid {name} value"))?;
            hours = hours.with_weekday(weekday, schedule)?;
        }
    }

    Ok(hours)
}
