//! Proximity query and result types exchanged with the remote search service.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{DEFAULT_RADIUS_KM, attr};
use crate::model::feature::{Attributes, Coordinate, PointFeature, PointCollection};

/// Coerce a radius to a usable value: anything non-finite or non-positive
/// becomes the default radius.
pub fn sanitize_radius(radius_km: f64) -> f64 {
    if radius_km.is_finite() && radius_km > 0.0 {
        radius_km
    } else {
        DEFAULT_RADIUS_KM
    }
}

/// A candidate proximity search, created by a map click.
///
/// Only the radius may change before submission; a new click creates a new query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProximityQuery {
    /// Latitude of the clicked point
    pub latitude: f64,
    /// Longitude of the clicked point
    pub longitude: f64,
    /// Search radius in kilometres (always positive)
    #[serde(rename = "radius")]
    radius_km: f64,
}

impl ProximityQuery {
    /// Create a query at the given point with the default radius.
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_km: DEFAULT_RADIUS_KM,
        }
    }

    /// Builder variant of [`ProximityQuery::set_radius`].
    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.set_radius(radius_km);
        self
    }

    /// Search radius in kilometres.
    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Update the radius, falling back to the default for invalid input.
    pub fn set_radius(&mut self, radius_km: f64) {
        self.radius_km = sanitize_radius(radius_km);
    }

    /// Position of the clicked point.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.longitude, self.latitude)
    }
}

/// One record returned by the proximity service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProximityRecord {
    /// School name
    #[serde(default)]
    pub school_nam: Option<String>,
    /// Education level
    #[serde(default)]
    pub level: Option<String>,
    /// Ownership status
    #[serde(default)]
    pub status: Option<String>,
    /// Administrative region
    #[serde(default)]
    pub county: Option<String>,
    /// Latitude in degrees
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub latitude: f64,
    /// Longitude in degrees
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub longitude: f64,
}

impl ProximityRecord {
    /// Convert into a point feature carrying the dataset's attribute names,
    /// so proximity results render like base features.
    pub fn to_feature(&self) -> PointFeature {
        let text = |v: &Option<String>| Value::from(v.clone().unwrap_or_default());

        let mut attributes = Attributes::new();
        attributes.insert(attr::SCHOOL_NAME.to_string(), text(&self.school_nam));
        attributes.insert(attr::LEVEL.to_string(), text(&self.level));
        attributes.insert(attr::STATUS.to_string(), text(&self.status));
        attributes.insert(attr::COUNTY.to_string(), text(&self.county));
        attributes.insert(attr::LATITUDE.to_string(), Value::from(self.latitude));
        attributes.insert(attr::LONGITUDE.to_string(), Value::from(self.longitude));

        PointFeature::new(Coordinate::new(self.longitude, self.latitude), attributes)
    }
}

// Numeric columns may arrive as JSON strings depending on the database driver.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("coordinate out of range")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid coordinate '{}'", s))),
        other => Err(de::Error::custom(format!(
            "expected a coordinate, found {}",
            other
        ))),
    }
}

/// Response body of the proximity endpoint. Missing or `null` data means
/// zero results, not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProximityResponse {
    /// Matching records
    #[serde(default)]
    pub data: Option<Vec<ProximityRecord>>,
}

/// Ordered results of a fulfilled proximity query.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityResultSet {
    query: ProximityQuery,
    records: Vec<ProximityRecord>,
}

impl ProximityResultSet {
    /// Wrap the records returned for `query`.
    pub fn new(query: ProximityQuery, records: Vec<ProximityRecord>) -> Self {
        Self { query, records }
    }

    /// Build a result set from a decoded response body.
    pub fn from_response(query: ProximityQuery, response: ProximityResponse) -> Self {
        Self::new(query, response.data.unwrap_or_default())
    }

    /// The query these results answer.
    pub fn query(&self) -> &ProximityQuery {
        &self.query
    }

    /// Records in service order.
    pub fn records(&self) -> &[ProximityRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the query matched nothing.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Results as a point collection, preserving order.
    pub fn to_collection(&self) -> PointCollection {
        self.records.iter().map(ProximityRecord::to_feature).collect()
    }
}
