//! Conversion from places wire types into domain [`Location`]s.

use nearby_core::{Category, Coordinate, DayTime, Location, OpeningHours, Period};

use super::types::{NearbyPlace, PlaceDetails, WireOpeningHours, WirePeriod, WirePoint};

/// Build a [`Location`] from a search hit and its (possibly missing) details.
pub(super) fn to_location(
    place: NearbyPlace,
    category: Category,
    details: Option<PlaceDetails>,
) -> Location {
    let (opening_hours, business_status) = match details {
        Some(d) => (d.opening_hours.map(|h| to_schedule(&h)), d.business_status),
        None => (None, None),
    };

    Location {
        id: place.place_id,
        name: place.name,
        address: place.vicinity.unwrap_or_default(),
        category,
        coordinate: Coordinate::new(place.geometry.location.lat, place.geometry.location.lng),
        rating: place.rating,
        rating_count: place.user_ratings_total,
        opening_hours,
        business_status,
    }
}

fn to_schedule(hours: &WireOpeningHours) -> OpeningHours {
    OpeningHours {
        periods: hours.periods.iter().filter_map(to_period).collect(),
    }
}

/// A period that opens at `0000` with no close point is how the provider
/// encodes round-the-clock service; it becomes the 00:00 → 23:59 same-day
/// pattern. Any other period without both ends is dropped.
fn to_period(period: &WirePeriod) -> Option<Period> {
    let open = parse_point(period.open.as_ref()?)?;
    match period.close.as_ref() {
        Some(close) => Some(Period {
            open,
            close: parse_point(close)?,
        }),
        None if open.hour == 0 && open.minute == 0 => Some(Period {
            open,
            close: DayTime::new(open.day, 23, 59),
        }),
        None => None,
    }
}

fn parse_point(point: &WirePoint) -> Option<DayTime> {
    let time = point.time.trim();
    if point.day > 6 || time.len() != 4 || !time.bytes().all(|b| b.is_ascii_digit()) {
        tracing::debug!(day = point.day, time = %point.time, "skipping malformed opening-hours point");
        return None;
    }
    let hour: u8 = time[..2].parse().ok()?;
    let minute: u8 = time[2..].parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(DayTime::new(point.day, hour, minute))
}

#[cfg(test)]
mod tests {
    use nearby_core::BusinessStatus;

    use super::super::types::{Geometry, LatLng};
    use super::*;

    fn point(day: u8, time: &str) -> WirePoint {
        WirePoint {
            day,
            time: time.to_string(),
        }
    }

    fn place() -> NearbyPlace {
        NearbyPlace {
            place_id: "place-1".to_string(),
            name: "Corner Pharmacy".to_string(),
            vicinity: Some("12 High St".to_string()),
            geometry: Geometry {
                location: LatLng {
                    lat: 51.5,
                    lng: -0.12,
                },
            },
            rating: Some(4.4),
            user_ratings_total: Some(87),
        }
    }

    #[test]
    fn parses_regular_period() {
        let period = WirePeriod {
            open: Some(point(1, "0830")),
            close: Some(point(1, "1745")),
        };
        assert_eq!(
            to_period(&period),
            Some(Period {
                open: DayTime::new(1, 8, 30),
                close: DayTime::new(1, 17, 45),
            })
        );
    }

    #[test]
    fn open_ended_midnight_period_becomes_always_open() {
        let period = WirePeriod {
            open: Some(point(0, "0000")),
            close: None,
        };
        let parsed = to_period(&period).expect("round-the-clock period");
        assert!(parsed.is_always_open());
    }

    #[test]
    fn open_ended_daytime_period_is_dropped() {
        let period = WirePeriod {
            open: Some(point(2, "0900")),
            close: None,
        };
        assert_eq!(to_period(&period), None);
    }

    #[test]
    fn malformed_times_are_dropped() {
        for bad in ["9:00", "2460", "12345", "ab12"] {
            let period = WirePeriod {
                open: Some(point(1, bad)),
                close: Some(point(1, "1700")),
            };
            assert_eq!(to_period(&period), None, "time {bad}");
        }
        let bad_day = WirePeriod {
            open: Some(point(7, "0900")),
            close: Some(point(7, "1700")),
        };
        assert_eq!(to_period(&bad_day), None);
    }

    #[test]
    fn location_without_details_has_no_schedule() {
        let loc = to_location(place(), Category::Pharmacy, None);
        assert_eq!(loc.id, "place-1");
        assert_eq!(loc.address, "12 High St");
        assert_eq!(loc.category, Category::Pharmacy);
        assert_eq!(loc.rating, Some(4.4));
        assert_eq!(loc.rating_count, Some(87));
        assert!(loc.opening_hours.is_none());
        assert!(loc.business_status.is_none());
    }

    #[test]
    fn location_with_details_carries_schedule_and_status() {
        let details = PlaceDetails {
            opening_hours: Some(WireOpeningHours {
                periods: vec![WirePeriod {
                    open: Some(point(5, "2200")),
                    close: Some(point(6, "0200")),
                }],
            }),
            business_status: Some(BusinessStatus::Operational),
        };
        let loc = to_location(place(), Category::Pharmacy, Some(details));
        let hours = loc.opening_hours.expect("schedule");
        assert_eq!(hours.periods.len(), 1);
        assert_eq!(hours.periods[0].close, DayTime::new(6, 2, 0));
        assert_eq!(loc.business_status, Some(BusinessStatus::Operational));
    }
}
