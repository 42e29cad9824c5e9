pub mod app_config;
pub mod config;
pub mod distance;
pub mod hours;
pub mod locations;
pub mod preferences;

pub use app_config::{AppConfig, Environment};
pub use config::{
    load_app_config, load_app_config_from_env, load_log_level, load_preferences_path,
    DEFAULT_LOG_LEVEL, DEFAULT_PREFERENCES_PATH, MAX_RADIUS_M,
};
pub use distance::{distance_km, format_distance};
pub use hours::{evaluate_status, OpenStatus};
pub use locations::{
    BusinessStatus, Category, Coordinate, DayTime, Location, OpeningHours, Period,
};
pub use preferences::{
    Contrast, MemoryPreferenceStore, PreferenceStore, Preferences, Theme, YamlPreferenceStore,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to access preferences file {path}: {source}")]
    PreferencesIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse preferences file: {0}")]
    PreferencesParse(#[source] serde_yaml::Error),

    #[error("failed to serialize preferences: {0}")]
    PreferencesSerialize(#[source] serde_yaml::Error),
}
