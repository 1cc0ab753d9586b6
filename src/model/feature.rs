//! Point features and collections.

use serde_json::{Map, Value};

/// Open-ended attribute table of a feature, in source order.
pub type Attributes = Map<String, Value>;

/// A longitude/latitude pair in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Longitude in degrees, east positive
    pub longitude: f64,
    /// Latitude in degrees, north positive
    pub latitude: f64,
}

impl Coordinate {
    /// Create a coordinate from a longitude/latitude pair.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Whether both components are finite and inside WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && (-180.0..=180.0).contains(&self.longitude)
            && (-90.0..=90.0).contains(&self.latitude)
    }
}

/// A single geographic point with named attributes.
///
/// Features are immutable once loaded; the filter engine and the layer
/// compositor only ever clone or borrow them.
#[derive(Debug, Clone, PartialEq)]
pub struct PointFeature {
    coordinate: Coordinate,
    attributes: Attributes,
}

impl PointFeature {
    /// Create a feature at `coordinate` with the given attributes.
    pub fn new(coordinate: Coordinate, attributes: Attributes) -> Self {
        Self {
            coordinate,
            attributes,
        }
    }

    /// Builder helper used when assembling features by hand.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Position of the feature.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// All attributes, in source order.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Attribute value if it is a string. Non-string values never match.
    pub fn attribute_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    /// Attribute rendered for display (strings verbatim, other JSON values as text).
    pub fn attribute_display(&self, name: &str) -> Option<String> {
        self.attributes.get(name).map(display_value)
    }
}

/// Render a JSON attribute value for a popup.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// An ordered sequence of point features with FeatureCollection semantics.
///
/// Every element carries a valid coordinate; collections built from untrusted
/// text go through [`crate::format::validate`] first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCollection {
    features: Vec<PointFeature>,
}

impl PointCollection {
    /// Format tag reported for every collection.
    pub const TYPE: &'static str = "FeatureCollection";

    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection from already validated features.
    pub fn from_features(features: Vec<PointFeature>) -> Self {
        Self { features }
    }

    /// Features in order.
    pub fn features(&self) -> &[PointFeature] {
        &self.features
    }

    /// Iterate over the features in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PointFeature> {
        self.features.iter()
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection holds no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FromIterator<PointFeature> for PointCollection {
    fn from_iter<I: IntoIterator<Item = PointFeature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PointCollection {
    type Item = &'a PointFeature;
    type IntoIter = std::slice::Iter<'a, PointFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
