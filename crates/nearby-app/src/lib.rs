//! Location list view-model and the controller that feeds it.

pub mod debounce;
pub mod locator;
pub mod render;
pub mod state;
pub mod view_model;

pub use debounce::SearchDebouncer;
pub use locator::{Command, Flow, Locator, LocatorError, LocatorOptions, RefreshError};
pub use state::{CategoryFilter, DisplayState, SortKey, ViewMode, ViewState};
pub use view_model::{LocationListViewModel, SubscriptionId, ViewError, ViewSnapshot};
