use std::sync::{Arc, Mutex};

use nearby_core::Category;

use super::*;

const ORIGIN: Coordinate = Coordinate {
    lat: 40.0,
    lng: -74.0,
};

fn location(id: &str, name: &str, category: Category, lat_offset: f64, rating: Option<f64>) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        address: format!("{id} Main Street"),
        category,
        coordinate: Coordinate::new(ORIGIN.lat + lat_offset, ORIGIN.lng),
        rating,
        rating_count: rating.map(|_| 10),
        opening_hours: None,
        business_status: None,
    }
}

/// Three ATMs and two pharmacies. Nearest first: p1, p2, a1, a3, a2.
fn fixture() -> Vec<Location> {
    vec![
        location("a1", "Zenith Bank ATM", Category::Atm, 0.03, Some(3.0)),
        location("p1", "apple Pharmacy", Category::Pharmacy, 0.01, Some(4.8)),
        location("a2", "Metro ATM", Category::Atm, 0.05, None),
        location("p2", "Boots", Category::Pharmacy, 0.02, Some(3.0)),
        location("a3", "Cash Express", Category::Atm, 0.04, Some(4.1)),
    ]
}

fn ids(locations: &[Location]) -> Vec<&str> {
    locations.iter().map(|l| l.id.as_str()).collect()
}

fn ready_model() -> LocationListViewModel {
    let mut vm = LocationListViewModel::new(5000);
    vm.set_user_coordinate(ORIGIN);
    vm.set_results(fixture());
    vm
}

#[test]
fn starts_loading_with_default_view_state() {
    let vm = LocationListViewModel::new(5000);
    assert_eq!(vm.display_state(), DisplayState::Loading);
    assert_eq!(vm.view_state().filter, CategoryFilter::All);
    assert_eq!(vm.view_state().sort, SortKey::Distance);
    assert_eq!(vm.view_state().view_mode, ViewMode::List);
    assert_eq!(vm.view_state().radius_m, 5000);
    assert!(vm.view_state().search.is_empty());
    assert!(vm.view_state().user_coordinate.is_none());
    assert!(vm.derived_sequence().is_empty());
}

#[test]
fn distance_sort_orders_nearest_first() {
    let vm = ready_model();
    assert_eq!(ids(vm.derived_sequence()), ["p1", "p2", "a1", "a3", "a2"]);
    assert_eq!(vm.display_state(), DisplayState::Populated);
}

#[test]
fn atm_filter_keeps_only_atms() {
    let mut vm = ready_model();
    vm.set_filter(CategoryFilter::Atm);
    let derived = vm.derived_sequence();
    assert_eq!(derived.len(), 3);
    assert!(derived.iter().all(|l| l.category == Category::Atm));
}

#[test]
fn pharmacy_filter_keeps_only_pharmacies() {
    let mut vm = ready_model();
    vm.set_filter(CategoryFilter::Pharmacy);
    assert_eq!(ids(vm.derived_sequence()), ["p1", "p2"]);
}

#[test]
fn name_sort_is_case_insensitive_ascending() {
    let mut vm = ready_model();
    vm.set_sort(SortKey::Name).unwrap();
    let names: Vec<&str> = vm.derived_sequence().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        ["apple Pharmacy", "Boots", "Cash Express", "Metro ATM", "Zenith Bank ATM"]
    );
}

#[test]
fn rating_sort_is_descending_with_unrated_as_zero() {
    let mut vm = ready_model();
    vm.set_sort(SortKey::Rating).unwrap();
    let ratings: Vec<Option<f64>> = vm.derived_sequence().iter().map(|l| l.rating).collect();
    assert_eq!(
        ratings,
        [Some(4.8), Some(4.1), Some(3.0), Some(3.0), None]
    );
}

#[test]
fn rating_ties_keep_result_set_order() {
    let mut vm = ready_model();
    vm.set_sort(SortKey::Rating).unwrap();
    // a1 and p2 are both rated 3.0; a1 comes first in the result set.
    let derived = ids(vm.derived_sequence());
    let a1 = derived.iter().position(|id| *id == "a1").unwrap();
    let p2 = derived.iter().position(|id| *id == "p2").unwrap();
    assert!(a1 < p2);
}

#[test]
fn name_ties_keep_result_set_order() {
    let mut vm = LocationListViewModel::new(5000);
    vm.set_sort(SortKey::Name).unwrap();
    vm.set_results(vec![
        location("x2", "Boots", Category::Pharmacy, 0.0, None),
        location("x1", "Boots", Category::Pharmacy, 0.0, None),
        location("x3", "Alder", Category::Pharmacy, 0.0, None),
    ]);
    assert_eq!(ids(vm.derived_sequence()), ["x3", "x2", "x1"]);
}

#[test]
fn name_sort_collates_accents_and_case() {
    let mut vm = LocationListViewModel::new(5000);
    vm.set_sort(SortKey::Name).unwrap();
    vm.set_results(vec![
        location("z", "Zara Pharmacy", Category::Pharmacy, 0.0, None),
        location("e", "\u{c9}mile Pharmacie", Category::Pharmacy, 0.0, None),
        location("upper", "BOOTS", Category::Pharmacy, 0.0, None),
        location("lower", "boots", Category::Pharmacy, 0.0, None),
    ]);
    assert_eq!(ids(vm.derived_sequence()), ["lower", "upper", "e", "z"]);
}

#[test]
fn search_matches_name_or_address_case_insensitively() {
    let mut vm = ready_model();
    vm.set_search("METRO");
    assert_eq!(ids(vm.derived_sequence()), ["a2"]);

    vm.set_search("p2 main");
    assert_eq!(ids(vm.derived_sequence()), ["p2"]);

    vm.set_search("");
    assert_eq!(vm.derived_sequence().len(), 5);
}

#[test]
fn search_and_filter_combine() {
    let mut vm = ready_model();
    vm.set_filter(CategoryFilter::Pharmacy);
    vm.set_search("atm");
    assert!(vm.derived_sequence().is_empty());
    assert_eq!(vm.display_state(), DisplayState::Empty);
}

#[test]
fn derived_sequence_is_subset_of_results() {
    let mut vm = ready_model();
    vm.set_filter(CategoryFilter::Atm);
    vm.set_search("a");
    for loc in vm.derived_sequence() {
        assert!(vm.results().contains(loc));
    }
}

#[test]
fn distance_sort_without_coordinate_is_rejected() {
    let mut vm = LocationListViewModel::new(5000);
    vm.set_sort(SortKey::Name).unwrap();
    vm.set_results(fixture());
    let before = vm.derived_sequence().to_vec();
    let passes = vm.derivation_passes();

    let err = vm.set_sort(SortKey::Distance).unwrap_err();

    assert!(matches!(err, ViewError::PreconditionUnmet { .. }));
    assert_eq!(vm.view_state().sort, SortKey::Name);
    assert_eq!(vm.derived_sequence(), before.as_slice());
    assert_eq!(vm.derivation_passes(), passes);
}

#[test]
fn distance_sort_without_coordinate_on_empty_model_leaves_empty_sequence() {
    let mut vm = LocationListViewModel::new(5000);
    vm.set_sort(SortKey::Rating).unwrap();
    assert!(vm.set_sort(SortKey::Distance).is_err());
    assert!(vm.derived_sequence().is_empty());
}

#[test]
fn derive_reports_missing_coordinate_under_distance_sort() {
    let mut vm = LocationListViewModel::new(5000);
    vm.set_results(fixture());
    assert!(matches!(
        vm.derive(),
        Err(ViewError::PreconditionUnmet { .. })
    ));
    // The failed pass leaves the previous (empty) sequence published.
    assert!(vm.derived_sequence().is_empty());
    assert_eq!(vm.results().len(), 5);
    assert_eq!(vm.display_state(), DisplayState::Loading);

    vm.set_filter(CategoryFilter::Atm);
    assert_eq!(vm.display_state(), DisplayState::Loading);

    vm.set_user_coordinate(ORIGIN);
    assert_eq!(vm.derived_sequence().len(), 3);
    assert_eq!(vm.display_state(), DisplayState::Populated);
}

#[test]
fn set_results_replaces_wholesale() {
    let mut vm = ready_model();
    vm.set_results(vec![location("n1", "New Place", Category::Atm, 0.01, None)]);
    assert_eq!(ids(vm.results()), ["n1"]);
    assert_eq!(ids(vm.derived_sequence()), ["n1"]);
}

#[test]
fn repeating_a_value_does_not_republish() {
    let mut vm = ready_model();
    let passes = vm.derivation_passes();
    vm.set_filter(CategoryFilter::All);
    vm.set_search("");
    vm.set_sort(SortKey::Distance).unwrap();
    vm.set_radius(5000);
    vm.set_view_mode(ViewMode::List);
    assert_eq!(vm.derivation_passes(), passes);
}

#[test]
fn subscribers_receive_every_published_snapshot() {
    let seen: Arc<Mutex<Vec<(usize, DisplayState, ViewMode)>>> = Arc::default();
    let mut vm = LocationListViewModel::new(5000);
    let sink = Arc::clone(&seen);
    vm.subscribe(move |snapshot| {
        sink.lock()
            .unwrap()
            .push((snapshot.locations.len(), snapshot.display.clone(), snapshot.view.view_mode));
    });

    vm.set_user_coordinate(ORIGIN);
    vm.set_results(fixture());
    vm.set_view_mode(ViewMode::Map);
    vm.set_filter(CategoryFilter::Pharmacy);

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        [
            (0, DisplayState::Loading, ViewMode::List),
            (5, DisplayState::Populated, ViewMode::List),
            (5, DisplayState::Populated, ViewMode::Map),
            (2, DisplayState::Populated, ViewMode::Map),
        ]
    );
}

#[test]
fn multiple_subscribers_and_unsubscribe() {
    let first = Arc::new(Mutex::new(0_u32));
    let second = Arc::new(Mutex::new(0_u32));
    let mut vm = ready_model();

    let f = Arc::clone(&first);
    let first_id = vm.subscribe(move |_| *f.lock().unwrap() += 1);
    let s = Arc::clone(&second);
    vm.subscribe(move |_| *s.lock().unwrap() += 1);

    vm.set_filter(CategoryFilter::Atm);
    assert!(vm.unsubscribe(first_id));
    assert!(!vm.unsubscribe(first_id));
    vm.set_filter(CategoryFilter::Pharmacy);

    assert_eq!(*first.lock().unwrap(), 1);
    assert_eq!(*second.lock().unwrap(), 2);
}

#[test]
fn failed_refresh_keeps_results_and_shows_transient_error() {
    let mut vm = ready_model();
    vm.begin_loading();
    assert_eq!(vm.display_state(), DisplayState::Loading);
    vm.fail_refresh("places provider returned OVER_QUERY_LIMIT");

    assert_eq!(
        vm.display_state(),
        DisplayState::TransientError("places provider returned OVER_QUERY_LIMIT".to_string())
    );
    assert_eq!(vm.results().len(), 5);
    assert_eq!(vm.derived_sequence().len(), 5);
}

#[test]
fn location_required_state_holds_the_geo_error() {
    let mut vm = LocationListViewModel::new(5000);
    vm.require_location(GeoError::PermissionDenied);
    assert_eq!(
        vm.display_state(),
        DisplayState::LocationRequired(GeoError::PermissionDenied)
    );
}

#[test]
fn snapshot_matches_published_state() {
    let mut vm = ready_model();
    vm.set_filter(CategoryFilter::Atm);
    let snapshot = vm.snapshot();
    assert_eq!(snapshot.locations.len(), 3);
    assert_eq!(snapshot.view.filter, CategoryFilter::Atm);
    assert_eq!(snapshot.display, DisplayState::Populated);
}
