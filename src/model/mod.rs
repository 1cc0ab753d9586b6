//! Data models for the proximity map.

mod feature;
mod filter;
mod proximity;

pub use feature::{Attributes, Coordinate, PointCollection, PointFeature};
pub(crate) use feature::display_value;
pub use filter::{FilterCategory, FilterError, FilterSelection};
pub use proximity::{
    ProximityQuery, ProximityRecord, ProximityResponse, ProximityResultSet, sanitize_radius,
};
