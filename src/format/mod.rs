//! GeoJSON ingestion.
//!
//! Both the base dataset and user overlays are validated here before they
//! become [`PointCollection`](crate::model::PointCollection)s.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use proximity_map::format::{read_and_validate, validate};
//!
//! let overlay = read_and_validate(Path::new("clinics.geojson"))?;
//! let base = validate(&fetched_text)?;
//! ```

mod error;
mod geojson;

pub use error::ValidationError;
pub use geojson::{check_file_name, read_and_validate, validate};
