use thiserror::Error;

/// Reasons the current position could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoError {
    /// The user (or the service on their behalf) refused to share a position.
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location unavailable: {0}")]
    Unavailable(String),

    #[error("timed out resolving location")]
    Timeout,
}

/// Errors returned by the places query adapter.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// The provider answered with a non-OK `status` field.
    #[error("places provider returned {status}{}", detail_suffix(.message))]
    Provider {
        status: String,
        message: Option<String>,
    },

    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl PlacesError {
    /// Provider status code, when the failure came from the provider itself.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        match self {
            PlacesError::Provider { status, .. } => Some(status),
            _ => None,
        }
    }
}
