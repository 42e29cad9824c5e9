use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Largest radius the places provider accepts for a nearby search.
pub const MAX_RADIUS_M: u32 = 50_000;

pub const DEFAULT_PREFERENCES_PATH: &str = "./nearby-preferences.yaml";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Resolve the preferences file path alone.
///
/// Preference commands need no places credentials, so this skips the rest
/// of [`load_app_config`].
#[must_use]
pub fn load_preferences_path() -> std::path::PathBuf {
    dotenvy::dotenv().ok();
    preferences_path_with(|key| std::env::var(key))
}

/// Resolve only the fallback log filter, for commands that run without the
/// full configuration.
#[must_use]
pub fn load_log_level() -> String {
    dotenvy::dotenv().ok();
    log_level_with(|key| std::env::var(key))
}

fn log_level_with<F>(lookup: F) -> String
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup("NEARBY_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
}

fn preferences_path_with<F>(lookup: F) -> std::path::PathBuf
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup("NEARBY_PREFERENCES_PATH")
        .map_or_else(|_| DEFAULT_PREFERENCES_PATH.into(), std::path::PathBuf::from)
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let places_api_key = require("GOOGLE_PLACES_API_KEY")?;
    if places_api_key.trim().is_empty() {
        return Err(invalid("GOOGLE_PLACES_API_KEY", "must not be empty".to_string()));
    }

    let env = parse_environment(&or_default("NEARBY_ENV", "development"))?;
    let log_level = log_level_with(&lookup);
    let places_base_url = or_default(
        "NEARBY_PLACES_BASE_URL",
        "https://maps.googleapis.com/maps/api/place/",
    );
    let geo_base_url = or_default("NEARBY_GEO_BASE_URL", "http://ip-api.com/json/");
    let request_timeout_secs = parse_u64("NEARBY_REQUEST_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("NEARBY_USER_AGENT", "nearby/0.1 (atm-pharmacy-locator)");

    let details_concurrency = parse_usize("NEARBY_DETAILS_CONCURRENCY", "4")?;
    if details_concurrency == 0 {
        return Err(invalid(
            "NEARBY_DETAILS_CONCURRENCY",
            "must be at least 1".to_string(),
        ));
    }

    let search_debounce_ms = parse_u64("NEARBY_SEARCH_DEBOUNCE_MS", "300")?;

    let default_radius_m = parse_u32("NEARBY_DEFAULT_RADIUS_M", "5000")?;
    if default_radius_m == 0 || default_radius_m > MAX_RADIUS_M {
        return Err(invalid(
            "NEARBY_DEFAULT_RADIUS_M",
            format!("must be between 1 and {MAX_RADIUS_M}"),
        ));
    }

    let preferences_path = preferences_path_with(&lookup);

    Ok(AppConfig {
        env,
        log_level,
        places_api_key,
        places_base_url,
        geo_base_url,
        request_timeout_secs,
        user_agent,
        details_concurrency,
        search_debounce_ms,
        default_radius_m,
        preferences_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NEARBY_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
