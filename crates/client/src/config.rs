//! # Client Configuration
//!
//! Loads settings for the timetable client from environment variables.
//!
//! ## Environment Variables
//!
//! - `TIMETABLE_API_URL`: Base URL of the backend API (default: "http://localhost:8080/api")
//! - `TIMETABLE_REQUEST_TIMEOUT_SECONDS`: Per-request timeout, at least 1 (default: 30)
//! - `TIMETABLE_LESSONS_PER_DAY`: Lesson hours shown per day, 1 to 12 (default: 8)
//! - `TIMETABLE_CONFLICT_POLICY`: `reject` or `allow` for occupied slots (default: "reject")
//! - `LOG_LEVEL`: Logging level (default: "info")

use std::env;
use std::time::Duration;

use eyre::{eyre, Result, WrapErr};
use timetable_core::grid::{ConflictPolicy, GridBounds, DEFAULT_LESSONS_PER_DAY};
use tracing::Level;

/// Upper bound for `TIMETABLE_LESSONS_PER_DAY`.
pub const MAX_LESSONS_PER_DAY: u8 = 12;

pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL all endpoint paths are appended to, without a trailing slash
    pub api_url: String,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Number of lesson hours per day in the weekly grid
    pub lessons_per_day: u8,

    /// What to do when adding a slot to an occupied cell
    pub conflict_policy: ConflictPolicy,

    /// Log level for the application
    pub log_level: Level,
}

impl ClientConfig {
    /// Creates a new ClientConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `TIMETABLE_LESSONS_PER_DAY` is not a number between 1 and 12
    /// - `TIMETABLE_CONFLICT_POLICY` is neither `reject` nor `allow`
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("TIMETABLE_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api".to_string());

        let request_timeout = env::var("TIMETABLE_REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|&seconds| seconds > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS);

        let lessons_per_day = match env::var("TIMETABLE_LESSONS_PER_DAY") {
            Ok(value) => value
                .parse::<u8>()
                .wrap_err("Invalid TIMETABLE_LESSONS_PER_DAY value")?,
            Err(_) => DEFAULT_LESSONS_PER_DAY,
        };
        if lessons_per_day == 0 || lessons_per_day > MAX_LESSONS_PER_DAY {
            return Err(eyre!(
                "TIMETABLE_LESSONS_PER_DAY must be between 1 and {}",
                MAX_LESSONS_PER_DAY
            ));
        }

        let conflict_policy = match env::var("TIMETABLE_CONFLICT_POLICY") {
            Ok(value) => value
                .parse::<ConflictPolicy>()
                .wrap_err("Invalid TIMETABLE_CONFLICT_POLICY value")?,
            Err(_) => ConflictPolicy::default(),
        };

        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        Ok(Self {
            api_url: normalize_base_url(&api_url),
            request_timeout,
            lessons_per_day,
            conflict_policy,
            log_level,
        })
    }

    /// Grid bounds for the configured number of lessons per day.
    pub fn grid_bounds(&self) -> Result<GridBounds> {
        GridBounds::with_lessons_per_day(self.lessons_per_day)
            .wrap_err("Invalid timetable bounds")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api".to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            lessons_per_day: DEFAULT_LESSONS_PER_DAY,
            conflict_policy: ConflictPolicy::default(),
            log_level: Level::INFO,
        }
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level; unknown values fall back to INFO.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
