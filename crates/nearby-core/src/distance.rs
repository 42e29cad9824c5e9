//! Great-circle distance between coordinates and its display form.

use crate::locations::Coordinate;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between `a` and `b` in kilometers.
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Render a distance for a location card.
///
/// Below one kilometer the value is shown in whole meters (`"350m away"`),
/// otherwise in kilometers with one decimal (`"2.3km away"`).
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        #[allow(clippy::cast_possible_truncation)]
        let meters = (km * 1000.0).round() as i64;
        format!("{meters}m away")
    } else {
        format!("{km:.1}km away")
    }
}
