use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("GOOGLE_PLACES_API_KEY", "test-places-key");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "NEARBY_ENV"));
}

#[test]
fn build_app_config_fails_without_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GOOGLE_PLACES_API_KEY"),
        "expected MissingEnvVar(GOOGLE_PLACES_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_blank_api_key() {
    let mut map = full_env();
    map.insert("GOOGLE_PLACES_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GOOGLE_PLACES_API_KEY"),
        "got: {result:?}"
    );
}

#[test]
fn build_app_config_applies_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.places_api_key, "test-places-key");
    assert_eq!(
        cfg.places_base_url,
        "https://maps.googleapis.com/maps/api/place/"
    );
    assert_eq!(cfg.geo_base_url, "http://ip-api.com/json/");
    assert_eq!(cfg.request_timeout_secs, 15);
    assert_eq!(cfg.user_agent, "nearby/0.1 (atm-pharmacy-locator)");
    assert_eq!(cfg.details_concurrency, 4);
    assert_eq!(cfg.search_debounce_ms, 300);
    assert_eq!(cfg.default_radius_m, 5000);
    assert_eq!(
        cfg.preferences_path,
        std::path::PathBuf::from("./nearby-preferences.yaml")
    );
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = full_env();
    map.insert("NEARBY_ENV", "production");
    map.insert("NEARBY_SEARCH_DEBOUNCE_MS", "150");
    map.insert("NEARBY_DEFAULT_RADIUS_M", "2000");
    map.insert("NEARBY_DETAILS_CONCURRENCY", "8");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.search_debounce_ms, 150);
    assert_eq!(cfg.default_radius_m, 2000);
    assert_eq!(cfg.details_concurrency, 8);
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = full_env();
    map.insert("NEARBY_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARBY_REQUEST_TIMEOUT_SECS"),
        "got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_concurrency() {
    let mut map = full_env();
    map.insert("NEARBY_DETAILS_CONCURRENCY", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARBY_DETAILS_CONCURRENCY"),
        "got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_radius_above_provider_max() {
    let mut map = full_env();
    map.insert("NEARBY_DEFAULT_RADIUS_M", "50001");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARBY_DEFAULT_RADIUS_M"),
        "got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("test-places-key"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn preferences_path_defaults_without_api_key() {
    let env = HashMap::new();
    assert_eq!(
        preferences_path_with(lookup_from_map(&env)),
        std::path::PathBuf::from(DEFAULT_PREFERENCES_PATH)
    );
}

#[test]
fn preferences_path_reads_override() {
    let mut env = HashMap::new();
    env.insert("NEARBY_PREFERENCES_PATH", "/tmp/prefs.yaml");
    assert_eq!(
        preferences_path_with(lookup_from_map(&env)),
        std::path::PathBuf::from("/tmp/prefs.yaml")
    );
}

#[test]
fn log_level_defaults_and_overrides() {
    let env = HashMap::new();
    assert_eq!(log_level_with(lookup_from_map(&env)), DEFAULT_LOG_LEVEL);

    let mut env = HashMap::new();
    env.insert("NEARBY_LOG_LEVEL", "debug");
    assert_eq!(log_level_with(lookup_from_map(&env)), "debug");
}
