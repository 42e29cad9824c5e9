//! External collaborators of the locator: where the user is, and what is
//! near them.

pub mod error;
pub mod geo;
pub mod places;

pub use error::{GeoError, PlacesError};
pub use geo::{FixedPosition, GeoProvider, IpGeolocator};
pub use places::{GooglePlacesClient, PlacesProvider, SearchMode};
