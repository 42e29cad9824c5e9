//! The location list view-model.
//!
//! Owns the current result set and view state, and republishes the derived
//! sequence (filtered, then sorted) to subscribers after every mutation.
//! All mutation happens on one task; there is no interior locking.

use std::cmp::Ordering;

use feruca::Collator;
use nearby_core::{distance_km, Coordinate, Location};
use nearby_providers::GeoError;
use thiserror::Error;

use crate::state::{CategoryFilter, DisplayState, SortKey, ViewMode, ViewState};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The requested state transition needs data that is not there yet.
    #[error("precondition unmet: {reason}")]
    PreconditionUnmet { reason: &'static str },
}

/// What a render surface receives on every change.
#[derive(Debug)]
pub struct ViewSnapshot<'a> {
    pub locations: &'a [Location],
    pub view: &'a ViewState,
    pub display: DisplayState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ViewSnapshot<'_>) + Send>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadPhase {
    Loading,
    Ready,
    Failed(String),
    LocationRequired(GeoError),
}

pub struct LocationListViewModel {
    results: Vec<Location>,
    state: ViewState,
    derived: Vec<Location>,
    phase: LoadPhase,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    derivation_passes: u64,
    /// Set while the last derivation failed for want of a user coordinate.
    derivation_blocked: bool,
}

impl std::fmt::Debug for LocationListViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationListViewModel")
            .field("results", &self.results.len())
            .field("derived", &self.derived.len())
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("derivation_blocked", &self.derivation_blocked)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl LocationListViewModel {
    #[must_use]
    pub fn new(radius_m: u32) -> Self {
        Self {
            results: Vec::new(),
            state: ViewState::new(radius_m),
            derived: Vec::new(),
            phase: LoadPhase::Loading,
            listeners: Vec::new(),
            next_subscription: 0,
            derivation_passes: 0,
            derivation_blocked: false,
        }
    }

    /// Register a render surface. It is called after every published change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ViewSnapshot<'_>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn results(&self) -> &[Location] {
        &self.results
    }

    /// The most recently published derived sequence.
    #[must_use]
    pub fn derived_sequence(&self) -> &[Location] {
        &self.derived
    }

    #[must_use]
    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    /// Number of successful derivation passes so far.
    #[must_use]
    pub fn derivation_passes(&self) -> u64 {
        self.derivation_passes
    }

    /// The same view a subscriber receives on the next publish.
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        ViewSnapshot {
            locations: &self.derived,
            view: &self.state,
            display: self.display_state(),
        }
    }

    #[must_use]
    pub fn display_state(&self) -> DisplayState {
        match &self.phase {
            LoadPhase::Loading => DisplayState::Loading,
            LoadPhase::Failed(message) => DisplayState::TransientError(message.clone()),
            LoadPhase::LocationRequired(err) => DisplayState::LocationRequired(err.clone()),
            LoadPhase::Ready if self.derivation_blocked => DisplayState::Loading,
            LoadPhase::Ready if self.derived.is_empty() => DisplayState::Empty,
            LoadPhase::Ready => DisplayState::Populated,
        }
    }

    /// Replace the result set wholesale.
    pub fn set_results(&mut self, locations: Vec<Location>) {
        self.results = locations;
        self.phase = LoadPhase::Ready;
        self.recompute();
    }

    pub fn set_user_coordinate(&mut self, coordinate: Coordinate) {
        if self.state.user_coordinate == Some(coordinate) {
            return;
        }
        self.state.user_coordinate = Some(coordinate);
        self.recompute();
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        if self.state.filter == filter {
            return;
        }
        self.state.filter = filter;
        self.recompute();
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.state.search == text {
            return;
        }
        self.state.search = text;
        self.recompute();
    }

    /// Change the sort key.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::PreconditionUnmet`] when asked to sort by
    /// distance before a user coordinate exists. State and the published
    /// sequence are left untouched.
    pub fn set_sort(&mut self, sort: SortKey) -> Result<(), ViewError> {
        if sort == SortKey::Distance && self.state.user_coordinate.is_none() {
            return Err(ViewError::PreconditionUnmet {
                reason: "distance sort requires a resolved user coordinate",
            });
        }
        if self.state.sort == sort {
            return Ok(());
        }
        self.state.sort = sort;
        self.recompute();
        Ok(())
    }

    pub fn set_radius(&mut self, radius_m: u32) {
        if self.state.radius_m == radius_m {
            return;
        }
        self.state.radius_m = radius_m;
        self.recompute();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.state.view_mode == mode {
            return;
        }
        self.state.view_mode = mode;
        self.recompute();
    }

    /// Enter the loading state. Current results stay in place.
    pub fn begin_loading(&mut self) {
        self.phase = LoadPhase::Loading;
        self.publish();
    }

    /// Record a failed refresh. Current results stay in place.
    pub fn fail_refresh(&mut self, message: impl Into<String>) {
        self.phase = LoadPhase::Failed(message.into());
        self.publish();
    }

    /// Record that the position could not be resolved.
    pub fn require_location(&mut self, err: GeoError) {
        self.phase = LoadPhase::LocationRequired(err);
        self.publish();
    }

    /// Filter then sort the current result set under the current view state.
    ///
    /// Names compare under root-locale Unicode collation. Sorting is stable:
    /// ties keep result-set order.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::PreconditionUnmet`] when the sort key is distance
    /// and no user coordinate exists.
    pub fn derive(&self) -> Result<Vec<Location>, ViewError> {
        let needle = self.state.search.to_lowercase();
        let filtered = self
            .results
            .iter()
            .filter(|loc| self.state.filter.matches(loc.category))
            .filter(|loc| needle.is_empty() || matches_search(loc, &needle))
            .cloned();

        match self.state.sort {
            SortKey::Distance => {
                let origin = self.state.user_coordinate.ok_or(ViewError::PreconditionUnmet {
                    reason: "distance sort requires a resolved user coordinate",
                })?;
                let mut keyed: Vec<(f64, Location)> = filtered
                    .map(|loc| (distance_km(origin, loc.coordinate), loc))
                    .collect();
                keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
                Ok(keyed.into_iter().map(|(_, loc)| loc).collect())
            }
            SortKey::Rating => {
                let mut sorted: Vec<Location> = filtered.collect();
                sorted.sort_by(compare_rating_desc);
                Ok(sorted)
            }
            SortKey::Name => {
                let mut sorted: Vec<Location> = filtered.collect();
                let mut collator = Collator::default();
                sorted.sort_by(|a, b| collator.collate(a.name.as_str(), b.name.as_str()));
                Ok(sorted)
            }
        }
    }

    fn recompute(&mut self) {
        match self.derive() {
            Ok(sequence) => {
                self.derived = sequence;
                self.derivation_blocked = false;
                self.derivation_passes += 1;
                self.publish();
            }
            Err(e) => {
                self.derivation_blocked = true;
                tracing::debug!(error = %e, "keeping previous derived sequence");
            }
        }
    }

    fn publish(&mut self) {
        let snapshot = ViewSnapshot {
            locations: &self.derived,
            view: &self.state,
            display: self.display_state(),
        };
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
    }
}

fn matches_search(location: &Location, needle: &str) -> bool {
    location.name.to_lowercase().contains(needle) || location.address.to_lowercase().contains(needle)
}

fn compare_rating_desc(a: &Location, b: &Location) -> Ordering {
    b.rating.unwrap_or(0.0).total_cmp(&a.rating.unwrap_or(0.0))
}

#[cfg(test)]
#[path = "view_model_test.rs"]
mod tests;
