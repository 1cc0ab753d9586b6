//! Error types for GeoJSON validation.

use thiserror::Error;

/// Reasons an uploaded or fetched point collection is rejected.
///
/// Validation is all-or-nothing: any error rejects the whole collection and
/// leaves the caller's state untouched.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// File name does not end in `.geojson`; the file is never read
    #[error("Please upload a valid .geojson file (got '{name}')")]
    WrongExtension {
        /// The rejected file name
        name: String,
    },

    /// Content is not syntactically valid JSON
    #[error("Error parsing GeoJSON file: {0}")]
    Malformed(String),

    /// Top-level object is not a FeatureCollection
    #[error("Invalid GeoJSON format: expected a FeatureCollection, found {found}")]
    WrongSchema {
        /// What was found instead
        found: String,
    },

    /// A feature is not a valid point feature
    #[error("Invalid GeoJSON format: feature {index}: {message}")]
    InvalidFeature {
        /// Position of the offending feature
        index: usize,
        /// Description of the problem
        message: String,
    },

    /// The collection declares a coordinate reference system other than WGS84
    #[error("Unsupported coordinate reference system '{0}', expected EPSG:4326")]
    UnsupportedCrs(String),

    /// I/O error while reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ValidationError {
    /// Create an invalid feature error for the feature at `index`.
    pub fn invalid_feature(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidFeature {
            index,
            message: message.into(),
        }
    }

    /// Create a wrong schema error.
    pub fn wrong_schema(found: impl Into<String>) -> Self {
        Self::WrongSchema {
            found: found.into(),
        }
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
