//! The map surface: one marker for the user, one per derived location, and
//! the viewport that frames them.

use nearby_core::{distance_km, Category, Coordinate, Location};

use super::links::directions_url;

const USER_Z_INDEX: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    User,
    Place(Category),
}

impl MarkerKind {
    /// Fill color of the marker symbol.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            MarkerKind::User => "#4285F4",
            MarkerKind::Place(Category::Atm) => "#34A853",
            MarkerKind::Place(Category::Pharmacy) => "#EA4335",
        }
    }
}

/// Content of the popup shown when a place marker is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerInfo {
    pub name: String,
    pub address: String,
    pub distance: String,
    /// Rating and review count; `None` for unrated or zero-rated places.
    pub rating: Option<String>,
    pub directions_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: Coordinate,
    pub title: String,
    pub z_index: i32,
    pub info: Option<MarkerInfo>,
}

/// Axis-aligned lat/lng box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl MapBounds {
    #[must_use]
    pub fn around(point: Coordinate) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    pub fn extend(&mut self, point: Coordinate) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    /// User marker first, then places in derived order.
    pub markers: Vec<Marker>,
    /// `None` when there are no place markers to frame.
    pub bounds: Option<MapBounds>,
}

/// Lay out markers for the derived sequence around `user`.
#[must_use]
pub fn render_markers(locations: &[Location], user: Coordinate) -> MapView {
    let mut markers = Vec::with_capacity(locations.len() + 1);
    markers.push(Marker {
        kind: MarkerKind::User,
        position: user,
        title: "Your Location".to_string(),
        z_index: USER_Z_INDEX,
        info: None,
    });
    markers.extend(locations.iter().map(|location| place_marker(location, user)));

    let bounds = (!locations.is_empty()).then(|| {
        let mut bounds = MapBounds::around(user);
        for location in locations {
            bounds.extend(location.coordinate);
        }
        bounds
    });

    MapView {
        center: user,
        markers,
        bounds,
    }
}

fn place_marker(location: &Location, user: Coordinate) -> Marker {
    let rating = location.rating.filter(|r| *r > 0.0).map(|rating| {
        format!(
            "{rating:.1} ({} reviews)",
            location.rating_count.unwrap_or(0)
        )
    });
    Marker {
        kind: MarkerKind::Place(location.category),
        position: location.coordinate,
        title: location.name.clone(),
        z_index: 0,
        info: Some(MarkerInfo {
            name: location.name.clone(),
            address: location.address.clone(),
            distance: format!("{:.2} km away", distance_km(user, location.coordinate)),
            rating,
            directions_url: directions_url(location),
        }),
    }
}
