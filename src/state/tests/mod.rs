//! Scenario tests for the view state machine and layer compositor.
//!
//! These drive [`ViewState`](crate::state::ViewState) through user-visible
//! sequences and check what the rendering surface would draw.

mod layers_tests;
mod view_tests;

use std::sync::Arc;

use crate::model::{Coordinate, PointCollection, PointFeature};

/// Base dataset of four schools.
///
/// | Name | LEVEL     | STATUS  |
/// |------|-----------|---------|
/// | A    | Primary   | Public  |
/// | B    | Secondary | Public  |
/// | C    | Primary   | Private |
/// | D    | (missing) | Public  |
fn sample_base() -> Arc<PointCollection> {
    let school = |name: &str, lng: f64, lat: f64| {
        PointFeature::new(Coordinate::new(lng, lat), Default::default())
            .with_attribute("SCHOOL_NAM", name)
            .with_attribute("COUNTY", "Nairobi")
            .with_attribute("LATITUDE", lat)
            .with_attribute("LONGITUDE", lng)
    };

    Arc::new(PointCollection::from_features(vec![
        school("A", 36.80, -1.28)
            .with_attribute("LEVEL", "Primary")
            .with_attribute("STATUS", "Public"),
        school("B", 36.82, -1.29)
            .with_attribute("LEVEL", "Secondary")
            .with_attribute("STATUS", "Public"),
        school("C", 36.84, -1.30)
            .with_attribute("LEVEL", "Primary")
            .with_attribute("STATUS", "Private"),
        school("D", 36.86, -1.31).with_attribute("STATUS", "Public"),
    ]))
}

/// Names of the features of a collection, in order.
fn names(collection: &PointCollection) -> Vec<&str> {
    collection
        .iter()
        .filter_map(|f| f.attribute_str("SCHOOL_NAM"))
        .collect()
}
