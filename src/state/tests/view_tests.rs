//! Tests for view state transitions.

use std::sync::Arc;

use super::{names, sample_base};
use crate::format;
use crate::model::{
    FilterCategory, FilterError, PointCollection, ProximityQuery, ProximityRecord,
    ProximityResultSet,
};
use crate::state::{PrimaryLayer, ViewState};

fn results_for(query: ProximityQuery, count: usize) -> ProximityResultSet {
    let records = (0..count)
        .map(|i| ProximityRecord {
            school_nam: Some(format!("Near {}", i)),
            level: Some("Primary".to_string()),
            status: Some("Public".to_string()),
            county: Some("Nairobi".to_string()),
            latitude: query.latitude,
            longitude: query.longitude,
        })
        .collect();
    ProximityResultSet::new(query, records)
}

#[test]
fn test_default_view_shows_base() {
    let view = ViewState::new(sample_base());
    let layers = view.active_layers();

    assert!(layers.overlay.is_none());
    assert!(matches!(layers.primary, PrimaryLayer::Base(base) if base.len() == 4));
}

#[test]
fn test_level_primary_filter() {
    let mut view = ViewState::new(sample_base());
    view.select_category(Some(FilterCategory::Level));
    view.select_value("Primary").unwrap();

    assert_eq!(view.run_filter(), Some(2));
    match view.active_layers().primary {
        PrimaryLayer::Filtered(filtered) => assert_eq!(names(filtered), vec!["A", "C"]),
        other => panic!("expected Filtered, got {:?}", other),
    }
}

#[test]
fn test_run_filter_incomplete_selection_is_noop() {
    let mut view = ViewState::new(sample_base());
    view.select_category(Some(FilterCategory::Status));

    assert_eq!(view.run_filter(), None);
    assert!(view.filtered().is_none());
}

#[test]
fn test_illegal_value_rejected() {
    let mut view = ViewState::new(sample_base());
    view.select_category(Some(FilterCategory::Level));

    assert!(matches!(
        view.select_value("Public"),
        Err(FilterError::IllegalValue { .. })
    ));
    assert!(view.filter_selection().value().is_none());
}

#[test]
fn test_zero_match_filter_is_still_filtered_layer() {
    // School A alone: public, so a "Private" filter matches nothing.
    let base: PointCollection = sample_base().iter().take(1).cloned().collect();
    let mut view = ViewState::new(Arc::new(base));
    view.select_category(Some(FilterCategory::Status));
    view.select_value("Private").unwrap();

    assert_eq!(view.run_filter(), Some(0));
    assert!(matches!(
        view.active_layers().primary,
        PrimaryLayer::Filtered(f) if f.is_empty()
    ));
}

#[test]
fn test_category_change_clears_filtered_output() {
    let mut view = ViewState::new(sample_base());
    view.select_category(Some(FilterCategory::Level));
    view.select_value("Primary").unwrap();
    view.run_filter();
    assert!(view.filtered().is_some());

    view.select_category(Some(FilterCategory::Status));

    assert!(view.filtered().is_none());
    assert!(view.filter_selection().value().is_none());
    assert!(matches!(view.active_layers().primary, PrimaryLayer::Base(_)));
}

#[test]
fn test_clear_filter_returns_to_base() {
    let mut view = ViewState::new(sample_base());
    view.select_category(Some(FilterCategory::Level));
    view.select_value("Secondary").unwrap();
    view.run_filter();

    view.clear_filter();

    assert!(view.filter_selection().category().is_none());
    assert!(matches!(view.active_layers().primary, PrimaryLayer::Base(_)));
}

#[test]
fn test_proximity_wins_regardless_of_order() {
    let query = ProximityQuery::at(-1.28, 36.80);

    // Filter first, then proximity.
    let mut view = ViewState::new(sample_base());
    view.select_category(Some(FilterCategory::Level));
    view.select_value("Primary").unwrap();
    view.run_filter();
    view.select_point(query);
    view.set_proximity_results(results_for(query, 3));
    assert!(matches!(
        view.active_layers().primary,
        PrimaryLayer::Proximity(r) if r.len() == 3
    ));

    // Proximity first, then filter.
    let mut view = ViewState::new(sample_base());
    view.select_point(query);
    view.set_proximity_results(results_for(query, 3));
    view.select_category(Some(FilterCategory::Level));
    view.select_value("Primary").unwrap();
    view.run_filter();
    assert!(matches!(
        view.active_layers().primary,
        PrimaryLayer::Proximity(r) if r.len() == 3
    ));
}

#[test]
fn test_empty_proximity_results_still_primary() {
    let query = ProximityQuery::at(0.0, 0.0);
    let mut view = ViewState::new(sample_base());
    view.select_point(query);
    view.set_proximity_results(results_for(query, 0));

    assert!(matches!(
        view.active_layers().primary,
        PrimaryLayer::Proximity(r) if r.is_empty()
    ));
}

#[test]
fn test_new_click_clears_results() {
    let first = ProximityQuery::at(-1.0, 36.0);
    let mut view = ViewState::new(sample_base());
    view.select_point(first);
    view.set_proximity_results(results_for(first, 2));

    view.select_point(ProximityQuery::at(-2.0, 37.0));

    assert!(view.proximity_results().is_none());
    assert_eq!(view.selection().map(|q| q.latitude), Some(-2.0));
}

#[test]
fn test_set_radius_needs_selection() {
    let mut view = ViewState::new(sample_base());
    assert!(!view.set_radius(10.0));

    view.select_point(ProximityQuery::at(-1.0, 36.0));
    assert!(view.set_radius(10.0));
    assert_eq!(view.selection().map(|q| q.radius_km()), Some(10.0));
}

#[test]
fn test_dismiss_keeps_filter_and_overlay() {
    let query = ProximityQuery::at(-1.28, 36.80);
    let mut view = ViewState::new(sample_base());
    view.select_category(Some(FilterCategory::Level));
    view.select_value("Primary").unwrap();
    view.run_filter();
    view.set_overlay(format::validate(r#"{"type":"FeatureCollection","features":[]}"#).unwrap());
    view.select_point(query);
    view.set_proximity_results(results_for(query, 1));

    view.dismiss();

    assert!(view.selection().is_none());
    let layers = view.active_layers();
    assert!(layers.overlay.is_some());
    assert!(matches!(layers.primary, PrimaryLayer::Filtered(_)));
}

#[test]
fn test_reset_returns_to_default_from_anywhere() {
    let query = ProximityQuery::at(-1.28, 36.80);
    let mut view = ViewState::new(sample_base());
    view.select_category(Some(FilterCategory::Level));
    view.select_value("Primary").unwrap();
    view.run_filter();
    view.select_point(query);
    view.set_proximity_results(results_for(query, 2));
    view.set_overlay(format::validate(r#"{"type":"FeatureCollection","features":[]}"#).unwrap());

    view.reset();

    let layers = view.active_layers();
    assert!(layers.overlay.is_none());
    assert!(matches!(layers.primary, PrimaryLayer::Base(b) if b.len() == 4));
    assert!(view.selection().is_none());
    assert!(view.filter_selection().category().is_none());
}

#[test]
fn test_empty_upload_is_non_null_overlay() {
    let mut view = ViewState::new(sample_base());
    let overlay = format::validate(r#"{"type":"FeatureCollection","features":[]}"#).unwrap();
    view.set_overlay(overlay);

    assert!(matches!(view.active_layers().overlay, Some(o) if o.is_empty()));
}

#[test]
fn test_rejected_upload_leaves_overlay_unchanged() {
    let mut view = ViewState::new(sample_base());
    let first = format::validate(
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"Point","coordinates":[36.8,-1.3]},"properties":{}}]}"#,
    )
    .unwrap();
    view.set_overlay(first);

    // A bare Feature is not a FeatureCollection; the caller never reaches set_overlay.
    let rejected = format::validate(r#"{"type":"Feature"}"#);
    assert!(rejected.is_err());
    if let Ok(collection) = rejected {
        view.set_overlay(collection);
    }

    assert_eq!(view.overlay().map(|o| o.len()), Some(1));
}

#[test]
fn test_overlay_shown_alongside_primary() {
    let mut view = ViewState::new(sample_base());
    view.set_overlay(format::validate(r#"{"type":"FeatureCollection","features":[]}"#).unwrap());
    view.select_category(Some(FilterCategory::Status));
    view.select_value("Public").unwrap();
    view.run_filter();

    let layers = view.active_layers();
    assert!(layers.overlay.is_some());
    match layers.primary {
        PrimaryLayer::Filtered(f) => assert_eq!(names(f), vec!["A", "B", "D"]),
        other => panic!("expected Filtered, got {:?}", other),
    }

    view.clear_overlay();
    assert!(view.active_layers().overlay.is_none());
}
