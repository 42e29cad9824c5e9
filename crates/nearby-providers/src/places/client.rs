//! HTTP client for the Google Places web service.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use nearby_core::{Category, Coordinate, Location, MAX_RADIUS_M};
use reqwest::{Client, Url};

use super::normalize::to_location;
use super::types::{NearbyPlace, NearbySearchResponse, PlaceDetails, PlaceDetailsResponse};
use super::{PlacesProvider, SearchMode};
use crate::error::PlacesError;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";
const DETAILS_FIELDS: &str = "opening_hours,business_status";

/// Client for the Places nearby-search and place-details endpoints.
///
/// Use [`GooglePlacesClient::new`] for production or
/// [`GooglePlacesClient::with_base_url`] to point at a mock server in tests.
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    details_concurrency: usize,
}

impl GooglePlacesClient {
    /// Creates a client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        details_concurrency: usize,
    ) -> Result<Self, PlacesError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            user_agent,
            details_concurrency,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        details_concurrency: usize,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so endpoint paths join beneath the base
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            details_concurrency: details_concurrency.max(1),
        })
    }

    /// Runs one nearby search and returns the raw hits in provider order.
    ///
    /// `ZERO_RESULTS` is an empty list, not an error.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Provider`] for any other non-`OK` status.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected shape.
    pub async fn nearby_search(
        &self,
        center: Coordinate,
        category: Category,
        mode: SearchMode,
    ) -> Result<Vec<NearbyPlace>, PlacesError> {
        let location = center.to_string();
        let mut params = vec![("location", location), ("type", category.place_type().to_string())];
        match mode {
            SearchMode::RankByDistance => params.push(("rankby", "distance".to_string())),
            SearchMode::Radius(meters) => {
                params.push(("radius", meters.clamp(1, MAX_RADIUS_M).to_string()));
            }
        }

        let url = self.build_url("nearbysearch/json", &params)?;
        let context = format!("nearbysearch(type={category})");
        let response: NearbySearchResponse = self.request_json(url, &context).await?;

        match response.status.as_str() {
            "OK" => Ok(response.results),
            "ZERO_RESULTS" => Ok(Vec::new()),
            _ => Err(PlacesError::Provider {
                status: response.status,
                message: response.error_message,
            }),
        }
    }

    /// Fetches opening hours and business status for one place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Provider`] for a non-`OK` status.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected shape.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let params = [
            ("place_id", place_id.to_string()),
            ("fields", DETAILS_FIELDS.to_string()),
        ];
        let url = self.build_url("details/json", &params)?;
        let context = format!("details(place_id={place_id})");
        let response: PlaceDetailsResponse = self.request_json(url, &context).await?;

        if response.status != "OK" {
            return Err(PlacesError::Provider {
                status: response.status,
                message: response.error_message,
            });
        }
        Ok(response.result.unwrap_or_default())
    }

    /// Joins `endpoint` onto the base URL and appends the API key and
    /// `extra` as percent-encoded query pairs.
    fn build_url(&self, endpoint: &str, extra: &[(&str, String)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, PlacesError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

impl PlacesProvider for GooglePlacesClient {
    /// Nearby search followed by a bounded fan-out of details lookups.
    ///
    /// Output order matches the search order. A failed details lookup
    /// leaves that location without schedule or business status.
    async fn search_nearby(
        &self,
        center: Coordinate,
        category: Category,
        mode: SearchMode,
    ) -> Result<Vec<Location>, PlacesError> {
        let places = self.nearby_search(center, category, mode).await?;
        tracing::debug!(%category, count = places.len(), "nearby search returned places");

        let locations = stream::iter(places)
            .map(|place| async move {
                let details = match self.place_details(&place.place_id).await {
                    Ok(details) => Some(details),
                    Err(e) => {
                        tracing::warn!(
                            place_id = %place.place_id,
                            error = %e,
                            "place details lookup failed; continuing without opening hours"
                        );
                        None
                    }
                };
                to_location(place, category, details)
            })
            .buffered(self.details_concurrency)
            .collect::<Vec<_>>()
            .await;

        Ok(locations)
    }
}
