use std::collections::HashMap;

use duxcall_api::config::{ApiConfig, DEFAULT_TIMEZONE};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tracing::Level;

fn config_from(pairs: &[(&str, &str)]) -> eyre::Result<ApiConfig> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ApiConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = config_from(&[("DATABASE_URL", "postgres://localhost/duxcall")]).unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 3000);
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.default_timezone, DEFAULT_TIMEZONE);
    assert!(!config.enable_dev_routes);
    assert_eq!(config.server_addr(), "0.0.0.0:3000");
}

#[test]
fn test_database_url_is_required() {
    let err = config_from(&[]).unwrap_err();

    assert!(err.to_string().contains("DATABASE_URL"));
}

#[test]
fn test_invalid_port_is_an_error() {
    let result = config_from(&[
        ("DATABASE_URL", "postgres://localhost/duxcall"),
        ("API_PORT", "eighty"),
    ]);

    assert!(result.is_err());
}

#[test]
fn test_overrides() {
    let config = config_from(&[
        ("DATABASE_URL", "postgres://localhost/duxcall"),
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "8080"),
        ("LOG_LEVEL", "DEBUG"),
        ("API_CORS_ORIGINS", "http://localhost:5173, https://app.example.com,"),
        ("API_REQUEST_TIMEOUT_SECONDS", "5"),
        ("HOSPITAL_TIMEZONE", "America/New_York"),
    ])
    .unwrap();

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec![
            "http://localhost:5173".to_string(),
            "https://app.example.com".to_string()
        ])
    );
    assert_eq!(config.request_timeout, 5);
    assert_eq!(config.default_timezone, chrono_tz::America::New_York);
}

#[test]
fn test_unparseable_timeout_falls_back() {
    let config = config_from(&[
        ("DATABASE_URL", "postgres://localhost/duxcall"),
        ("API_REQUEST_TIMEOUT_SECONDS", "soon"),
    ])
    .unwrap();

    assert_eq!(config.request_timeout, 30);
}

#[test]
fn test_unknown_timezone_is_an_error() {
    let result = config_from(&[
        ("DATABASE_URL", "postgres://localhost/duxcall"),
        ("HOSPITAL_TIMEZONE", "Mars/Olympus_Mons"),
    ]);

    assert!(result.is_err());
}

#[rstest]
#[case("true", true)]
#[case("TRUE", true)]
#[case("1", true)]
#[case("false", false)]
#[case("yes", false)]
fn test_dev_routes_flag(#[case] raw: &str, #[case] expected: bool) {
    let config = config_from(&[
        ("DATABASE_URL", "postgres://localhost/duxcall"),
        ("API_ENABLE_DEV_ROUTES", raw),
    ])
    .unwrap();

    assert_eq!(config.enable_dev_routes, expected);
}

#[test]
fn test_default_zone_matches_resolver_default() {
    assert_eq!(
        DEFAULT_TIMEZONE,
        duxcall_core::ResolverConfig::default().timezone
    );
}
