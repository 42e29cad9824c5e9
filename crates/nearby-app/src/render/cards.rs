//! The card list surface.

use chrono::NaiveDateTime;
use nearby_core::{distance_km, evaluate_status, format_distance, Coordinate, Location, OpenStatus};

use super::links::search_url;

pub const NO_RESULTS_MESSAGE: &str = "No locations found";

/// Everything one card displays.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationCard {
    pub id: String,
    pub status: OpenStatus,
    pub category_label: &'static str,
    pub name: String,
    pub address: String,
    /// `None` until the user coordinate is known.
    pub distance: Option<String>,
    /// One decimal, or `N/A` when unrated or rated zero.
    pub rating: String,
    pub review_count: u32,
    pub link: String,
}

impl LocationCard {
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardList {
    Cards(Vec<LocationCard>),
    NoResults,
}

impl CardList {
    /// The placeholder text for an empty list.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self {
            CardList::Cards(_) => None,
            CardList::NoResults => Some(NO_RESULTS_MESSAGE),
        }
    }
}

/// Build one card per derived location, in order. `now` is local
/// wall-clock time for open/closed evaluation.
#[must_use]
pub fn render_cards(locations: &[Location], user: Option<Coordinate>, now: NaiveDateTime) -> CardList {
    if locations.is_empty() {
        return CardList::NoResults;
    }
    CardList::Cards(
        locations
            .iter()
            .map(|location| card(location, user, now))
            .collect(),
    )
}

fn card(location: &Location, user: Option<Coordinate>, now: NaiveDateTime) -> LocationCard {
    LocationCard {
        id: location.id.clone(),
        status: evaluate_status(location.opening_hours.as_ref(), location.category, now),
        category_label: location.category.label(),
        name: location.name.clone(),
        address: location.address.clone(),
        distance: user.map(|origin| format_distance(distance_km(origin, location.coordinate))),
        rating: location
            .rating
            .filter(|r| *r > 0.0)
            .map_or_else(|| "N/A".to_string(), |r| format!("{r:.1}")),
        review_count: location.rating_count.unwrap_or(0),
        link: search_url(location),
    }
}
