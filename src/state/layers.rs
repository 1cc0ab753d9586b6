//! Layer compositor.
//!
//! Decides which layers the rendering surface draws. There are at most two:
//! an optional user overlay, and exactly one primary layer chosen by a strict
//! precedence:
//!
//! 1. proximity results, if a query has resolved and not been cleared
//! 2. filtered output, if "Run Filter" produced one
//! 3. the base dataset
//!
//! The overlay is independent of the primary layer and both can be visible.

use crate::constants::{MARKER_RADIUS, attr};
use crate::model::{Coordinate, PointCollection, PointFeature, ProximityResultSet, display_value};
use crate::state::view::ViewState;

/// The one primary data source on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimaryLayer<'a> {
    /// Results of the last fulfilled proximity query
    Proximity(&'a ProximityResultSet),
    /// Output of the attribute filter
    Filtered(&'a PointCollection),
    /// The full base dataset
    Base(&'a PointCollection),
}

impl PrimaryLayer<'_> {
    /// Kind of this layer.
    pub fn kind(&self) -> LayerKind {
        match self {
            PrimaryLayer::Proximity(_) => LayerKind::Proximity,
            PrimaryLayer::Filtered(_) => LayerKind::Filtered,
            PrimaryLayer::Base(_) => LayerKind::Base,
        }
    }

    /// Number of points in this layer.
    pub fn len(&self) -> usize {
        match self {
            PrimaryLayer::Proximity(results) => results.len(),
            PrimaryLayer::Filtered(collection) | PrimaryLayer::Base(collection) => {
                collection.len()
            }
        }
    }

    /// Whether this layer has no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything the rendering surface should draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveLayers<'a> {
    /// User overlay, shown whenever one is loaded
    pub overlay: Option<&'a PointCollection>,
    /// Exactly one primary layer
    pub primary: PrimaryLayer<'a>,
}

/// Compute the active layer set for `state`.
pub fn active_layers(state: &ViewState) -> ActiveLayers<'_> {
    let primary = if let Some(results) = state.proximity_results() {
        PrimaryLayer::Proximity(results)
    } else if let Some(filtered) = state.filtered() {
        PrimaryLayer::Filtered(filtered)
    } else {
        PrimaryLayer::Base(state.base())
    };

    ActiveLayers {
        overlay: state.overlay(),
        primary,
    }
}

impl ActiveLayers<'_> {
    /// Styled geometry for every active layer, in draw order (overlay first,
    /// primary on top).
    pub fn render(&self) -> Vec<RenderLayer> {
        let mut layers = Vec::with_capacity(2);

        if let Some(overlay) = self.overlay {
            layers.push(RenderLayer::new(
                LayerKind::Overlay,
                overlay.iter().map(overlay_point).collect(),
            ));
        }

        let points = match self.primary {
            PrimaryLayer::Proximity(results) => results
                .records()
                .iter()
                .map(|record| school_point(&record.to_feature()))
                .collect(),
            PrimaryLayer::Filtered(collection) => collection.iter().map(school_point).collect(),
            PrimaryLayer::Base(collection) => collection
                .iter()
                .map(|feature| {
                    // The base popup is only bound for named schools.
                    if feature.attributes().contains_key(attr::SCHOOL_NAME) {
                        school_point(feature)
                    } else {
                        RenderPoint::new(feature.coordinate(), Vec::new())
                    }
                })
                .collect(),
        };
        layers.push(RenderLayer::new(self.primary.kind(), points));

        layers
    }
}

/// Identifies a layer for styling and legends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// User-uploaded points
    Overlay,
    /// Proximity results
    Proximity,
    /// Filter output
    Filtered,
    /// Base dataset
    Base,
}

impl LayerKind {
    /// Get the display name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Overlay => "Uploaded data",
            LayerKind::Proximity => "Proximity results",
            LayerKind::Filtered => "Filtered schools",
            LayerKind::Base => "Schools",
        }
    }

    /// Marker style for this layer.
    pub fn style(&self) -> LayerStyle {
        match self {
            LayerKind::Base => LayerStyle {
                stroke: [0, 0, 0],
                fill_opacity: 0.8,
                ..LayerStyle::solid([255, 0, 0])
            },
            LayerKind::Filtered => LayerStyle::solid([255, 255, 0]),
            LayerKind::Proximity => LayerStyle::solid([0, 128, 0]),
            LayerKind::Overlay => LayerStyle::solid([128, 0, 128]),
        }
    }
}

/// Circle marker style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerStyle {
    /// RGB fill colour
    pub fill: [u8; 3],
    /// RGB stroke colour
    pub stroke: [u8; 3],
    /// Stroke width in pixels
    pub stroke_weight: f32,
    /// Fill opacity, 0..=1
    pub fill_opacity: f32,
    /// Marker radius in pixels
    pub radius: f32,
}

impl LayerStyle {
    /// Opaque marker with the same fill and stroke colour.
    pub fn solid(color: [u8; 3]) -> Self {
        Self {
            fill: color,
            stroke: color,
            stroke_weight: 1.0,
            fill_opacity: 1.0,
            radius: MARKER_RADIUS,
        }
    }
}

/// One `label: value` line of a point popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupRow {
    /// Row label
    pub label: String,
    /// Row value
    pub value: String,
}

/// A point ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPoint {
    /// Where to draw it
    pub coordinate: Coordinate,
    /// Popup rows shown on click (empty means no popup)
    pub popup: Vec<PopupRow>,
}

impl RenderPoint {
    fn new(coordinate: Coordinate, popup: Vec<PopupRow>) -> Self {
        Self { coordinate, popup }
    }
}

/// A styled layer ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderLayer {
    /// Which layer this is
    pub kind: LayerKind,
    /// Marker style
    pub style: LayerStyle,
    /// Points in dataset order
    pub points: Vec<RenderPoint>,
}

impl RenderLayer {
    fn new(kind: LayerKind, points: Vec<RenderPoint>) -> Self {
        Self {
            kind,
            style: kind.style(),
            points,
        }
    }
}

const SCHOOL_ROWS: &[(&str, &str)] = &[
    ("School Name", attr::SCHOOL_NAME),
    ("Level", attr::LEVEL),
    ("Status", attr::STATUS),
    ("County", attr::COUNTY),
    ("Latitude", attr::LATITUDE),
    ("Longitude", attr::LONGITUDE),
];

fn school_point(feature: &PointFeature) -> RenderPoint {
    let popup = SCHOOL_ROWS
        .iter()
        .map(|(label, name)| PopupRow {
            label: (*label).to_string(),
            value: feature.attribute_display(name).unwrap_or_default(),
        })
        .collect();
    RenderPoint::new(feature.coordinate(), popup)
}

// Uploaded files have an open-ended schema: one row per attribute.
fn overlay_point(feature: &PointFeature) -> RenderPoint {
    let popup = feature
        .attributes()
        .iter()
        .map(|(key, value)| PopupRow {
            label: key.clone(),
            value: display_value(value),
        })
        .collect();
    RenderPoint::new(feature.coordinate(), popup)
}
