//! Global constants for the proximity map.

/// Default proximity search radius in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Hosted proximity-query endpoint used when no configuration overrides it.
pub const DEFAULT_PROXIMITY_ENDPOINT: &str =
    "https://proximity-search-api-85eba53ab9bf.herokuapp.com/api/proximity-query";

/// Location of the schools dataset shipped with the application.
pub const DEFAULT_BASE_DATASET: &str = "data/schools.geojson";

/// Default timeout for remote requests, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// File extension required for uploaded overlays.
pub const GEOJSON_EXTENSION: &str = "geojson";

/// Marker radius (in pixels) used for every point layer.
pub const MARKER_RADIUS: f32 = 6.0;

/// Attribute names of the schools dataset.
pub mod attr {
    /// School name
    pub const SCHOOL_NAME: &str = "SCHOOL_NAM";
    /// Education level (Primary / Secondary)
    pub const LEVEL: &str = "LEVEL";
    /// Ownership status (Public / Private)
    pub const STATUS: &str = "STATUS";
    /// Administrative region
    pub const COUNTY: &str = "COUNTY";
    /// Latitude, as stored in the attribute table
    pub const LATITUDE: &str = "LATITUDE";
    /// Longitude, as stored in the attribute table
    pub const LONGITUDE: &str = "LONGITUDE";
}
