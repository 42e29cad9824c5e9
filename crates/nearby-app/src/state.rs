//! View state: every user-controllable display parameter, held as one
//! snapshot.

use nearby_core::{Category, Coordinate};
use nearby_providers::{GeoError, SearchMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Atm,
    Pharmacy,
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Atm => category == Category::Atm,
            CategoryFilter::Pharmacy => category == Category::Pharmacy,
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(CategoryFilter::All),
            "atm" => Ok(CategoryFilter::Atm),
            "pharmacy" => Ok(CategoryFilter::Pharmacy),
            other => Err(format!(
                "unknown filter '{other}' (expected all, atm or pharmacy)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Distance,
    Rating,
    Name,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(SortKey::Distance),
            "rating" => Ok(SortKey::Rating),
            "name" => Ok(SortKey::Name),
            other => Err(format!(
                "unknown sort key '{other}' (expected distance, rating or name)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Map,
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" => Ok(ViewMode::List),
            "map" => Ok(ViewMode::Map),
            other => Err(format!("unknown view mode '{other}' (expected list or map)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub filter: CategoryFilter,
    /// Free text, matched case-insensitively against name and address.
    pub search: String,
    pub sort: SortKey,
    pub view_mode: ViewMode,
    /// Meters. Only bounds the places query when `sort` is not distance.
    pub radius_m: u32,
    /// `None` until geolocation resolves.
    pub user_coordinate: Option<Coordinate>,
}

impl ViewState {
    #[must_use]
    pub fn new(radius_m: u32) -> Self {
        Self {
            filter: CategoryFilter::default(),
            search: String::new(),
            sort: SortKey::default(),
            view_mode: ViewMode::default(),
            radius_m,
            user_coordinate: None,
        }
    }

    /// The places query mode implied by this state.
    #[must_use]
    pub fn search_mode(&self) -> SearchMode {
        match self.sort {
            SortKey::Distance => SearchMode::RankByDistance,
            SortKey::Rating | SortKey::Name => SearchMode::Radius(self.radius_m),
        }
    }
}

/// What the user sees. Exactly one is active at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    Populated,
    Empty,
    /// A places query failed; previously loaded results are kept.
    TransientError(String),
    /// The position could not be resolved. Persists until a retry.
    LocationRequired(GeoError),
}
