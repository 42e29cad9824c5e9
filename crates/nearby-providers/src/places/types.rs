//! Wire types for the Google Places web service (nearby search and place
//! details endpoints).

use nearby_core::BusinessStatus;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<NearbyPlace>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NearbyPlace {
    pub place_id: String,
    pub name: String,
    /// Short street address.
    pub vicinity: Option<String>,
    pub geometry: Geometry,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    pub result: Option<PlaceDetails>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    pub opening_hours: Option<WireOpeningHours>,
    pub business_status: Option<BusinessStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireOpeningHours {
    #[serde(default)]
    pub periods: Vec<WirePeriod>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePeriod {
    pub open: Option<WirePoint>,
    pub close: Option<WirePoint>,
}

/// `time` is 24-hour `HHMM`.
#[derive(Debug, Clone, Deserialize)]
pub struct WirePoint {
    pub day: u8,
    pub time: String,
}
