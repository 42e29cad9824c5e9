//! The controller: resolves the user's position, runs places queries and
//! feeds commands into the view-model, one event at a time.

use std::time::Duration;

use nearby_core::{AppConfig, Category, MAX_RADIUS_M};
use nearby_providers::{GeoError, GeoProvider, PlacesError, PlacesProvider, SearchMode};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::debounce::SearchDebouncer;
use crate::state::{CategoryFilter, SortKey, ViewMode};
use crate::view_model::{LocationListViewModel, ViewError};

/// User intents dispatched to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetFilter(CategoryFilter),
    /// Debounced; applied once input has been quiet for the configured period.
    SetSearch(String),
    SetSort(SortKey),
    SetRadius(u32),
    SetViewMode(ViewMode),
    Refresh,
    /// Re-run initialization from position resolution onwards.
    Retry,
    Shutdown,
}

/// Whether the event loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Shutdown,
}

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("no user coordinate to search around")]
    MissingCoordinate,

    #[error(transparent)]
    Places(#[from] PlacesError),
}

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("could not resolve current position: {0}")]
    Geo(#[from] GeoError),

    #[error("refresh failed: {0}")]
    Refresh(#[from] RefreshError),
}

#[derive(Debug, Clone)]
pub struct LocatorOptions {
    pub default_radius_m: u32,
    pub search_debounce: Duration,
}

impl LocatorOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            default_radius_m: config.default_radius_m,
            search_debounce: Duration::from_millis(config.search_debounce_ms),
        }
    }
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            default_radius_m: 5_000,
            search_debounce: Duration::from_millis(300),
        }
    }
}

enum Event {
    Command(Command),
    SearchQuiet(u64),
    Closed,
}

pub struct Locator<G, P> {
    geo: G,
    places: P,
    view: LocationListViewModel,
    debouncer: SearchDebouncer,
    quiet_rx: mpsc::UnboundedReceiver<u64>,
}

impl<G, P> std::fmt::Debug for Locator<G, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Locator")
            .field("view", &self.view)
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}

impl<G, P> Locator<G, P>
where
    G: GeoProvider,
    P: PlacesProvider,
{
    #[must_use]
    pub fn new(geo: G, places: P, options: &LocatorOptions) -> Self {
        let (debouncer, quiet_rx) = SearchDebouncer::new(options.search_debounce);
        Self {
            geo,
            places,
            view: LocationListViewModel::new(options.default_radius_m),
            debouncer,
            quiet_rx,
        }
    }

    #[must_use]
    pub fn view(&self) -> &LocationListViewModel {
        &self.view
    }

    /// Mutable access for subscribing render surfaces and for applying
    /// initial view settings before [`Locator::initialize`].
    pub fn view_mut(&mut self) -> &mut LocationListViewModel {
        &mut self.view
    }

    /// Resolve the current position, then load results around it.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Geo`] when the position cannot be resolved
    /// (the view shows the location-required state until a retry) and
    /// [`LocatorError::Refresh`] when the first places query fails.
    pub async fn initialize(&mut self) -> Result<(), LocatorError> {
        self.view.begin_loading();

        let coordinate = match self.geo.resolve_current_position().await {
            Ok(coordinate) => coordinate,
            Err(e) => {
                tracing::warn!(error = %e, "position unavailable");
                self.view.require_location(e.clone());
                return Err(e.into());
            }
        };
        tracing::debug!(%coordinate, "resolved user position");
        self.view.set_user_coordinate(coordinate);

        self.refresh().await?;
        Ok(())
    }

    /// Query both categories concurrently and commit the combined result
    /// set, ATMs first. If either query fails nothing is committed.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError::MissingCoordinate`] before the position is
    /// known, or the first places error encountered.
    pub async fn refresh(&mut self) -> Result<(), RefreshError> {
        let center = self
            .view
            .view_state()
            .user_coordinate
            .ok_or(RefreshError::MissingCoordinate)?;
        let mode = self.view.view_state().search_mode();

        self.view.begin_loading();
        let outcome = tokio::try_join!(
            self.places.search_nearby(center, Category::Atm, mode),
            self.places.search_nearby(center, Category::Pharmacy, mode),
        );

        match outcome {
            Ok((mut locations, pharmacies)) => {
                tracing::info!(
                    atms = locations.len(),
                    pharmacies = pharmacies.len(),
                    ?mode,
                    "refresh complete"
                );
                locations.extend(pharmacies);
                self.view.set_results(locations);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed; keeping previous results");
                self.view.fail_refresh(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Apply one command to completion.
    ///
    /// Query failures are reflected in the display state, not returned.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::PreconditionUnmet`] when the command is rejected
    /// by the view-model; nothing changes in that case.
    pub async fn handle(&mut self, command: Command) -> Result<Flow, ViewError> {
        match command {
            Command::SetFilter(filter) => self.view.set_filter(filter),
            Command::SetSearch(text) => {
                self.debouncer.schedule(text);
            }
            Command::SetSort(sort) => {
                let before = self.view.view_state().search_mode();
                self.view.set_sort(sort)?;
                if self.view.view_state().search_mode() != before {
                    self.refresh_logged().await;
                }
            }
            Command::SetRadius(radius_m) => {
                let radius_m = radius_m.clamp(1, MAX_RADIUS_M);
                let changed = self.view.view_state().radius_m != radius_m;
                self.view.set_radius(radius_m);
                if changed && matches!(self.view.view_state().search_mode(), SearchMode::Radius(_)) {
                    self.refresh_logged().await;
                }
            }
            Command::SetViewMode(mode) => self.view.set_view_mode(mode),
            Command::Refresh => self.refresh_logged().await,
            Command::Retry => {
                if let Err(e) = self.initialize().await {
                    tracing::warn!(error = %e, "retry did not complete");
                }
            }
            Command::Shutdown => {
                self.debouncer.cancel();
                return Ok(Flow::Shutdown);
            }
        }
        Ok(Flow::Continue)
    }

    /// Process commands until [`Command::Shutdown`] or until the sender is
    /// dropped. Debounced search input is applied between commands.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) -> Self {
        loop {
            let event = tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => Event::Command(command),
                    None => Event::Closed,
                },
                Some(generation) = self.quiet_rx.recv() => Event::SearchQuiet(generation),
            };

            match event {
                Event::Command(command) => match self.handle(command).await {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Shutdown) => break,
                    Err(e) => tracing::warn!(error = %e, "command rejected"),
                },
                Event::SearchQuiet(generation) => {
                    if let Some(text) = self.debouncer.take_if_current(generation) {
                        self.view.set_search(text);
                    }
                }
                Event::Closed => break,
            }
        }
        self
    }

    async fn refresh_logged(&mut self) {
        if let Err(e) = self.refresh().await {
            tracing::debug!(error = %e, "refresh did not commit");
        }
    }
}

#[cfg(test)]
#[path = "locator_test.rs"]
mod tests;
