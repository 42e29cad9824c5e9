//! Domain types for nearby points of interest.

use serde::{Deserialize, Serialize};

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Classification of a point of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Atm,
    Pharmacy,
}

impl Category {
    /// Every category queried by a refresh, in commit order.
    pub const ALL: [Category; 2] = [Category::Atm, Category::Pharmacy];

    /// The provider-side place type for this category.
    #[must_use]
    pub fn place_type(self) -> &'static str {
        match self {
            Category::Atm => "atm",
            Category::Pharmacy => "pharmacy",
        }
    }

    /// Human-readable label shown on cards and markers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Atm => "ATM",
            Category::Pharmacy => "Pharmacy",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.place_type())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atm" => Ok(Category::Atm),
            "pharmacy" => Ok(Category::Pharmacy),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}

/// Operational state reported by the places provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessStatus {
    Operational,
    ClosedTemporarily,
    ClosedPermanently,
    #[serde(other)]
    Other,
}

/// A weekday plus wall-clock time. `day` counts from Sunday (0) to Saturday (6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTime {
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl DayTime {
    #[must_use]
    pub fn new(day: u8, hour: u8, minute: u8) -> Self {
        Self { day, hour, minute }
    }

    /// Minutes elapsed since midnight.
    #[must_use]
    pub fn minute_of_day(self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }
}

/// A single open/close interval. `close.day != open.day` means the period
/// crosses midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub open: DayTime,
    pub close: DayTime,
}

impl Period {
    /// `true` for the open 00:00 → close 23:59 same-day pattern that
    /// denotes round-the-clock service.
    #[must_use]
    pub fn is_always_open(&self) -> bool {
        self.open.day == self.close.day
            && self.open.hour == 0
            && self.open.minute == 0
            && self.close.hour == 23
            && self.close.minute == 59
    }
}

/// Weekly opening-hours schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub periods: Vec<Period>,
}

/// A point of interest returned by a places query. Immutable once built;
/// result sets are replaced wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Provider place ID, unique within one result set.
    pub id: String,
    pub name: String,
    pub address: String,
    pub category: Category,
    pub coordinate: Coordinate,
    /// 0.0 to 5.0 when present.
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    pub opening_hours: Option<OpeningHours>,
    pub business_status: Option<BusinessStatus>,
}
