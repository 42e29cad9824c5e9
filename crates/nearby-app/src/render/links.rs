//! External map links.

use nearby_core::Location;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left untouched in a URI component: alphanumerics plus
/// `- _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Map search for the location's name and address.
#[must_use]
pub fn search_url(location: &Location) -> String {
    let query = format!("{} {}", location.name, location.address);
    let encoded = utf8_percent_encode(&query, URI_COMPONENT);
    format!("https://www.google.com/maps/search/?api=1&query={encoded}")
}

/// Turn-by-turn directions to the location.
#[must_use]
pub fn directions_url(location: &Location) -> String {
    let place_id = utf8_percent_encode(&location.id, URI_COMPONENT);
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}&destination_place_id={place_id}",
        location.coordinate.lat, location.coordinate.lng
    )
}
