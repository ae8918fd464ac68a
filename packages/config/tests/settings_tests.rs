// ABOUTME: Integration tests for environment-driven client settings
// ABOUTME: Serialized because every case mutates process environment variables

use academy_config::constants::*;
use academy_config::{ClientSettings, ConfigError};
use rstest::rstest;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

fn clear_env() {
    for var in [
        ACADEMY_API_BASE_URL,
        ACADEMY_CSRF_COOKIE_NAME,
        ACADEMY_CSRF_HEADER_NAME,
        ACADEMY_TOKEN_FILE,
        ACADEMY_HTTP_REQUEST_TIMEOUT_SECS,
        ACADEMY_HTTP_CONNECT_TIMEOUT_SECS,
    ] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_settings_from_env_defaults() {
    clear_env();

    let settings = ClientSettings::from_env().unwrap();

    assert_eq!(
        settings.api_base_url,
        academy_config::parse_base_url(DEFAULT_API_BASE_URL).unwrap()
    );
    assert_eq!(settings.csrf_cookie_name, DEFAULT_CSRF_COOKIE_NAME);
    assert_eq!(settings.csrf_header_name, DEFAULT_CSRF_HEADER_NAME);
    assert!(settings.request_timeout.is_none());
    assert!(settings.connect_timeout.is_none());
}

#[test]
#[serial]
fn test_settings_from_env_overrides() {
    clear_env();
    env::set_var(ACADEMY_API_BASE_URL, "https://admin.example.com/api");
    env::set_var(ACADEMY_CSRF_COOKIE_NAME, "csrf_token");
    env::set_var(ACADEMY_CSRF_HEADER_NAME, "X-CSRF-Token");
    env::set_var(ACADEMY_TOKEN_FILE, "/tmp/academy-test/token.toml");
    env::set_var(ACADEMY_HTTP_REQUEST_TIMEOUT_SECS, "30");
    env::set_var(ACADEMY_HTTP_CONNECT_TIMEOUT_SECS, "5");

    let settings = ClientSettings::from_env().unwrap();

    assert_eq!(settings.api_base_url.as_str(), "https://admin.example.com/api");
    assert_eq!(settings.csrf_cookie_name, "csrf_token");
    assert_eq!(settings.csrf_header_name, "X-CSRF-Token");
    assert_eq!(
        settings.token_file,
        Some(PathBuf::from("/tmp/academy-test/token.toml"))
    );
    assert_eq!(settings.request_timeout, Some(Duration::from_secs(30)));
    assert_eq!(settings.connect_timeout, Some(Duration::from_secs(5)));

    clear_env();
}

#[test]
#[serial]
fn test_token_file_defaults_under_home() {
    clear_env();
    let home = tempfile::tempdir().unwrap();
    let previous_home = env::var(HOME).ok();
    env::set_var(HOME, home.path());

    let settings = ClientSettings::from_env().unwrap();

    assert_eq!(
        settings.token_file,
        Some(home.path().join(ACADEMY_DIR_NAME).join(TOKEN_FILE_NAME))
    );

    match previous_home {
        Some(value) => env::set_var(HOME, value),
        None => env::remove_var(HOME),
    }
}

#[test]
#[serial]
fn test_invalid_base_url_is_rejected() {
    clear_env();
    env::set_var(ACADEMY_API_BASE_URL, "localhost without scheme");

    let result = ClientSettings::from_env();
    assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));

    clear_env();
}

#[rstest]
#[case("0")]
#[case("-5")]
#[case("1.5")]
#[case("soon")]
#[serial]
fn test_invalid_timeout_values(#[case] value: &str) {
    clear_env();
    env::set_var(ACADEMY_HTTP_REQUEST_TIMEOUT_SECS, value);

    let result = ClientSettings::from_env();
    assert_eq!(
        result,
        Err(ConfigError::InvalidTimeout {
            var: ACADEMY_HTTP_REQUEST_TIMEOUT_SECS,
            value: value.to_string(),
        })
    );

    clear_env();
}

#[rstest]
#[case(ACADEMY_CSRF_COOKIE_NAME, "XSRF TOKEN")]
#[case(ACADEMY_CSRF_HEADER_NAME, "X-XSRF-TOKEN:")]
#[serial]
fn test_invalid_names_are_rejected(#[case] var: &str, #[case] value: &str) {
    clear_env();
    env::set_var(var, value);

    assert!(ClientSettings::from_env().is_err());

    clear_env();
}

#[test]
fn test_for_base_url_keeps_defaults() {
    let settings = ClientSettings::for_base_url("http://127.0.0.1:9000").unwrap();
    assert_eq!(settings.api_base_url.as_str(), "http://127.0.0.1:9000/");
    assert_eq!(settings.csrf_cookie_name, DEFAULT_CSRF_COOKIE_NAME);
}
