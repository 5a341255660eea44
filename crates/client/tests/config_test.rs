use std::env;
use std::sync::Mutex;
use std::time::Duration;

use pretty_assertions::assert_eq;
use rstest::rstest;
use timetable_client::{
    config::{normalize_base_url, parse_log_level, ClientConfig},
    ApiClient,
};
use timetable_core::grid::ConflictPolicy;
use tracing::Level;

const VARS: [&str; 5] = [
    "TIMETABLE_API_URL",
    "TIMETABLE_REQUEST_TIMEOUT_SECONDS",
    "TIMETABLE_LESSONS_PER_DAY",
    "TIMETABLE_CONFLICT_POLICY",
    "LOG_LEVEL",
];

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with exactly `vars` set among the config variables.
fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    // SAFETY: every test touching these variables holds ENV_LOCK.
    unsafe {
        for name in VARS {
            env::remove_var(name);
        }
        for (name, value) in vars {
            env::set_var(name, value);
        }
    }

    let result = f();

    unsafe {
        for name in VARS {
            env::remove_var(name);
        }
    }
    result
}

#[test]
fn test_from_env_defaults() {
    let config = with_env(&[], ClientConfig::from_env).expect("Config failed");

    assert_eq!(config.api_url, "http://localhost:8080/api");
    assert_eq!(config.timeout(), Duration::from_secs(30));
    assert_eq!(config.lessons_per_day, 8);
    assert_eq!(config.conflict_policy, ConflictPolicy::Reject);
    assert_eq!(config.log_level, Level::INFO);
}

#[test]
fn test_from_env_custom_values() {
    let config = with_env(
        &[
            ("TIMETABLE_API_URL", "https://school.example/api/"),
            ("TIMETABLE_REQUEST_TIMEOUT_SECONDS", "5"),
            ("TIMETABLE_LESSONS_PER_DAY", "12"),
            ("TIMETABLE_CONFLICT_POLICY", "Allow"),
            ("LOG_LEVEL", "debug"),
        ],
        ClientConfig::from_env,
    )
    .expect("Config failed");

    assert_eq!(config.api_url, "https://school.example/api");
    assert_eq!(config.request_timeout, 5);
    assert_eq!(config.lessons_per_day, 12);
    assert_eq!(config.conflict_policy, ConflictPolicy::Allow);
    assert_eq!(config.log_level, Level::DEBUG);

    let client = ApiClient::new(&config).expect("Failed to build client");
    assert_eq!(client.base_url(), "https://school.example/api");
}

#[rstest]
#[case("0")]
#[case("13")]
#[case("eight")]
fn test_from_env_rejects_lessons_per_day(#[case] value: &str) {
    let result = with_env(&[("TIMETABLE_LESSONS_PER_DAY", value)], ClientConfig::from_env);

    assert!(result.is_err());
}

#[test]
fn test_from_env_rejects_unknown_policy() {
    let result = with_env(
        &[("TIMETABLE_CONFLICT_POLICY", "overwrite")],
        ClientConfig::from_env,
    );

    let err = result.expect_err("Unknown policy accepted");
    assert!(err.to_string().contains("TIMETABLE_CONFLICT_POLICY"));
}

#[rstest]
#[case("0")]
#[case("-3")]
#[case("soon")]
fn test_from_env_invalid_timeout_falls_back(#[case] value: &str) {
    let config = with_env(
        &[("TIMETABLE_REQUEST_TIMEOUT_SECONDS", value)],
        ClientConfig::from_env,
    )
    .expect("Config failed");

    assert_eq!(config.request_timeout, 30);
}

#[rstest]
#[case("trace", Level::TRACE)]
#[case("DEBUG", Level::DEBUG)]
#[case(" warn ", Level::WARN)]
#[case("error", Level::ERROR)]
#[case("verbose", Level::INFO)]
fn test_parse_log_level(#[case] value: &str, #[case] expected: Level) {
    assert_eq!(parse_log_level(value), expected);
}

#[rstest]
#[case("http://localhost:8080/api/", "http://localhost:8080/api")]
#[case("http://localhost:8080/api//", "http://localhost:8080/api")]
#[case(" http://host/api ", "http://host/api")]
fn test_normalize_base_url(#[case] value: &str, #[case] expected: &str) {
    assert_eq!(normalize_base_url(value), expected);
}

#[rstest]
#[case(1, 5)]
#[case(8, 40)]
#[case(12, 60)]
fn test_grid_bounds_follow_lessons_per_day(#[case] lessons_per_day: u8, #[case] cells: usize) {
    let config = ClientConfig {
        lessons_per_day,
        ..ClientConfig::default()
    };

    let bounds = config.grid_bounds().expect("Invalid bounds");

    assert_eq!(bounds.cell_count(), cells);
    assert_eq!(bounds.hours().last().copied(), Some(lessons_per_day));
}

#[test]
fn test_grid_bounds_reject_zero_lessons() {
    let config = ClientConfig {
        lessons_per_day: 0,
        ..ClientConfig::default()
    };

    assert!(config.grid_bounds().is_err());
}
