//! GeoJSON point collection validation.
//!
//! Untrusted text (uploaded overlays, the fetched base dataset) only enters the
//! model through [`validate`]. The checks are:
//!
//! - the text parses as JSON,
//! - the top-level `type` is `FeatureCollection` with a `features` array,
//! - an optional legacy `crs` member names WGS84,
//! - every feature has a `Point` geometry with a finite longitude/latitude
//!   pair inside WGS84 bounds.
//!
//! Any failure rejects the whole collection.

use std::path::Path;

use geojson::{Feature, GeoJson};
use serde_json::Value as JsonValue;

use crate::constants::GEOJSON_EXTENSION;
use crate::format::error::ValidationError;
use crate::model::{Attributes, Coordinate, PointCollection, PointFeature};

/// CRS names accepted in a legacy `crs` member.
const WGS84_CRS_NAMES: &[&str] = &[
    "EPSG:4326",
    "urn:ogc:def:crs:EPSG::4326",
    "urn:ogc:def:crs:OGC:1.3:CRS84",
    "urn:ogc:def:crs:OGC::CRS84",
];

/// Check that a file name carries the `.geojson` extension (case-sensitive).
pub fn check_file_name(name: &str) -> Result<(), ValidationError> {
    let ok = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == GEOJSON_EXTENSION);

    if ok {
        Ok(())
    } else {
        Err(ValidationError::WrongExtension {
            name: name.to_string(),
        })
    }
}

/// Check the extension of `path`, then read and validate it.
///
/// The file is not opened when the extension is wrong.
pub fn read_and_validate(path: &Path) -> Result<PointCollection, ValidationError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    check_file_name(&name)?;

    log::debug!("Reading GeoJSON from {:?}", path);
    let text = std::fs::read_to_string(path)?;
    validate(&text)
}

/// Parse and validate GeoJSON text into a point collection.
pub fn validate(raw_text: &str) -> Result<PointCollection, ValidationError> {
    let root: JsonValue = serde_json::from_str(raw_text)?;

    let found = match root.get("type") {
        Some(JsonValue::String(kind)) => kind.clone(),
        Some(other) => other.to_string(),
        None if root.is_object() => "an object without a type".to_string(),
        None => json_kind(&root).to_string(),
    };
    if found != PointCollection::TYPE {
        return Err(ValidationError::wrong_schema(found));
    }

    if !root.get("features").is_some_and(JsonValue::is_array) {
        return Err(ValidationError::wrong_schema(
            "a FeatureCollection without a features array",
        ));
    }

    let collection = match GeoJson::from_json_value(root) {
        Ok(GeoJson::FeatureCollection(collection)) => collection,
        Ok(_) => return Err(ValidationError::wrong_schema(found)),
        Err(e) => {
            return Err(ValidationError::wrong_schema(format!(
                "a malformed collection ({})",
                e
            )));
        }
    };

    // `crs` is not part of RFC 7946, so the parser keeps it as a foreign member.
    let crs_name = collection
        .foreign_members
        .as_ref()
        .and_then(|members| members.get("crs"))
        .and_then(|crs| crs.pointer("/properties/name"))
        .and_then(JsonValue::as_str);
    if let Some(name) = crs_name
        && !WGS84_CRS_NAMES.contains(&name)
    {
        return Err(ValidationError::UnsupportedCrs(name.to_string()));
    }

    let points = collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| point_feature(index, feature))
        .collect::<Result<PointCollection, _>>()?;

    log::debug!("Validated FeatureCollection with {} points", points.len());
    Ok(points)
}

fn point_feature(index: usize, feature: Feature) -> Result<PointFeature, ValidationError> {
    let geometry = feature
        .geometry
        .ok_or_else(|| ValidationError::invalid_feature(index, "missing geometry"))?;

    let coordinate = match &geometry.value {
        geojson::Value::Point(position) => point_coordinate(position)
            .ok_or_else(|| ValidationError::invalid_feature(index, "invalid point coordinates"))?,
        other => {
            return Err(ValidationError::invalid_feature(
                index,
                format!("expected Point geometry, found {}", geometry_kind(other)),
            ));
        }
    };

    Ok(PointFeature::new(
        coordinate,
        feature.properties.unwrap_or_else(Attributes::new),
    ))
}

// Positions are [longitude, latitude, (altitude)].
fn point_coordinate(position: &[f64]) -> Option<Coordinate> {
    let [longitude, latitude, ..] = *position else {
        return None;
    };
    let coordinate = Coordinate::new(longitude, latitude);
    coordinate.is_valid().then_some(coordinate)
}

fn geometry_kind(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
