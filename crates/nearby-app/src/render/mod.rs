//! Render surfaces: pure functions from the derived sequence to what a
//! card list or a map should show.

pub mod cards;
mod links;
pub mod markers;

pub use cards::{render_cards, CardList, LocationCard, NO_RESULTS_MESSAGE};
pub use links::{directions_url, search_url};
pub use markers::{render_markers, MapBounds, MapView, Marker, MarkerInfo, MarkerKind};
