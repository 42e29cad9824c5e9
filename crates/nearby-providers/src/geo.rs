//! Geo provider adapters: resolve the user's current coordinate.

use std::future::Future;
use std::time::Duration;

use nearby_core::Coordinate;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::error::GeoError;

/// Resolves the current position of the user.
pub trait GeoProvider {
    fn resolve_current_position(&self) -> impl Future<Output = Result<Coordinate, GeoError>> + Send;
}

/// A position supplied up front, e.g. from command-line flags.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinate);

impl GeoProvider for FixedPosition {
    async fn resolve_current_position(&self) -> Result<Coordinate, GeoError> {
        Ok(self.0)
    }
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Approximate position from an IP-geolocation service speaking the
/// `ip-api.com` JSON shape.
pub struct IpGeolocator {
    client: Client,
    url: Url,
}

impl IpGeolocator {
    /// # Errors
    ///
    /// Returns [`GeoError::Unavailable`] if the HTTP client cannot be built
    /// or `url` does not parse.
    pub fn new(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GeoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(|e| GeoError::Unavailable(format!("cannot build HTTP client: {e}")))?;
        let url = Url::parse(url)
            .map_err(|e| GeoError::Unavailable(format!("invalid geolocation URL '{url}': {e}")))?;
        Ok(Self { client, url })
    }
}

impl GeoProvider for IpGeolocator {
    async fn resolve_current_position(&self) -> Result<Coordinate, GeoError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GeoError::PermissionDenied);
        }
        if !status.is_success() {
            return Err(GeoError::Unavailable(format!(
                "geolocation service returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: IpLookupResponse = response
            .json()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        if body.status != "success" {
            let reason = body.message.unwrap_or_else(|| body.status.clone());
            return Err(GeoError::Unavailable(reason));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lng)) => {
                tracing::debug!(lat, lng, "resolved position from IP geolocation");
                Ok(Coordinate::new(lat, lng))
            }
            _ => Err(GeoError::Unavailable(
                "geolocation response carried no coordinates".to_string(),
            )),
        }
    }
}

fn classify_transport_error(err: &reqwest::Error) -> GeoError {
    if err.is_timeout() {
        GeoError::Timeout
    } else {
        GeoError::Unavailable(err.to_string())
    }
}
