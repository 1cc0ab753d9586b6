//! Tests for the rendered layer set: draw order, styles and popups.

use super::sample_base;
use crate::format;
use crate::model::{FilterCategory, ProximityQuery, ProximityRecord, ProximityResultSet};
use crate::state::{LayerKind, LayerStyle, PopupRow, ViewState};

fn row(label: &str, value: &str) -> PopupRow {
    PopupRow {
        label: label.to_string(),
        value: value.to_string(),
    }
}

#[test]
fn test_base_render() {
    let view = ViewState::new(sample_base());
    let rendered = view.active_layers().render();

    assert_eq!(rendered.len(), 1);
    let base = &rendered[0];
    assert_eq!(base.kind, LayerKind::Base);
    assert_eq!(base.points.len(), 4);
    assert_eq!(base.style.fill, [255, 0, 0]);
    assert_eq!(base.style.stroke, [0, 0, 0]);
    assert_eq!(base.style.fill_opacity, 0.8);

    assert_eq!(
        base.points[0].popup,
        vec![
            row("School Name", "A"),
            row("Level", "Primary"),
            row("Status", "Public"),
            row("County", "Nairobi"),
            row("Latitude", "-1.28"),
            row("Longitude", "36.8"),
        ]
    );
    // Missing attributes render as empty values.
    assert_eq!(base.points[3].popup[1], row("Level", ""));
}

#[test]
fn test_unnamed_base_point_has_no_popup() {
    let base = format::validate(
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"Point","coordinates":[36.8,-1.3]},"properties":{"LEVEL":"Primary"}}]}"#,
    )
    .unwrap();
    let view = ViewState::new(std::sync::Arc::new(base));
    let rendered = view.active_layers().render();

    assert!(rendered[0].points[0].popup.is_empty());
}

#[test]
fn test_filtered_render_is_yellow() {
    let mut view = ViewState::new(sample_base());
    view.select_category(Some(FilterCategory::Level));
    view.select_value("Secondary").unwrap();
    view.run_filter();

    let rendered = view.active_layers().render();
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].kind, LayerKind::Filtered);
    assert_eq!(rendered[0].style, LayerStyle::solid([255, 255, 0]));
    assert_eq!(rendered[0].points.len(), 1);
    assert_eq!(rendered[0].points[0].popup[0], row("School Name", "B"));
}

#[test]
fn test_proximity_render_uses_record_fields() {
    let query = ProximityQuery::at(-1.29, 36.82);
    let record = ProximityRecord {
        school_nam: Some("Moi Primary".to_string()),
        level: Some("Primary".to_string()),
        status: None,
        county: Some("Nairobi".to_string()),
        latitude: -1.29,
        longitude: 36.82,
    };
    let mut view = ViewState::new(sample_base());
    view.select_point(query);
    view.set_proximity_results(ProximityResultSet::new(query, vec![record]));

    let rendered = view.active_layers().render();
    let layer = &rendered[0];
    assert_eq!(layer.kind, LayerKind::Proximity);
    assert_eq!(layer.style.fill, [0, 128, 0]);
    assert_eq!(layer.points[0].coordinate.latitude, -1.29);
    assert_eq!(layer.points[0].popup[0], row("School Name", "Moi Primary"));
    assert_eq!(layer.points[0].popup[2], row("Status", ""));
}

#[test]
fn test_overlay_drawn_below_primary() {
    let overlay = format::validate(
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"Point","coordinates":[36.9,-1.2]},
             "properties":{"facility":"Clinic","beds":12}}]}"#,
    )
    .unwrap();
    let mut view = ViewState::new(sample_base());
    view.set_overlay(overlay);

    let rendered = view.active_layers().render();
    assert_eq!(rendered.len(), 2);
    assert_eq!(rendered[0].kind, LayerKind::Overlay);
    assert_eq!(rendered[0].style.fill, [128, 0, 128]);
    assert_eq!(
        rendered[0].points[0].popup,
        vec![row("facility", "Clinic"), row("beds", "12")]
    );
    assert_eq!(rendered[1].kind, LayerKind::Base);
}

#[test]
fn test_layer_names() {
    assert_eq!(LayerKind::Base.name(), "Schools");
    assert_eq!(LayerKind::Overlay.name(), "Uploaded data");
}
