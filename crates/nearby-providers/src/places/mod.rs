//! Places query adapter: nearby points of interest for a coordinate and
//! category, enriched with rating and opening-hours metadata.

mod client;
mod normalize;
pub mod types;

use std::future::Future;

use nearby_core::{Category, Coordinate, Location};

use crate::error::PlacesError;

pub use client::GooglePlacesClient;

/// How a nearby search is bounded. The provider accepts exactly one of the
/// two: ranking by distance carries no radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    RankByDistance,
    /// Search radius in meters.
    Radius(u32),
}

/// Source of candidate locations around a coordinate.
pub trait PlacesProvider {
    fn search_nearby(
        &self,
        center: Coordinate,
        category: Category,
        mode: SearchMode,
    ) -> impl Future<Output = Result<Vec<Location>, PlacesError>> + Send;
}
