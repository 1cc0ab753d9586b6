//! Base dataset loading.
//!
//! The schools dataset is fetched once per session from a local file or an
//! http(s) URL, validated like any other collection, then shared read-only.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use thiserror::Error;
use web_time::Instant;

use crate::format::{self, ValidationError};
use crate::model::PointCollection;

/// Errors that can occur while loading the base dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Transport failure while fetching a remote dataset
    #[error("Failed to fetch base dataset: {0}")]
    Fetch(String),

    /// The dataset server answered with a non-success status
    #[error("Base dataset request returned HTTP {0}")]
    Status(u16),

    /// The dataset is not a valid point collection
    #[error("Invalid base dataset: {0}")]
    Invalid(#[from] ValidationError),
}

impl From<reqwest::Error> for DatasetError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status(status.as_u16()),
            None => Self::Fetch(err.to_string()),
        }
    }
}

/// Where the base dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// A local `.geojson` file
    File(PathBuf),
    /// A remote document fetched with GET
    Url(String),
}

impl DatasetSource {
    /// Interpret a configured location: `http://` and `https://` are URLs,
    /// anything else is a file path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// The base dataset, loaded on first use and memoized.
#[derive(Debug)]
pub struct BaseDataset {
    source: DatasetSource,
    timeout: Duration,
    loaded: OnceLock<Arc<PointCollection>>,
}

impl BaseDataset {
    /// Create a lazily loaded dataset.
    pub fn new(source: DatasetSource, timeout: Duration) -> Self {
        Self {
            source,
            timeout,
            loaded: OnceLock::new(),
        }
    }

    /// Where the dataset is loaded from.
    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    /// Whether the dataset has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    /// Return the dataset, loading it on first call. A failed load is not
    /// cached, so the next call retries.
    pub fn get_or_load(&self) -> Result<Arc<PointCollection>, DatasetError> {
        if let Some(cached) = self.loaded.get() {
            return Ok(Arc::clone(cached));
        }

        let started = Instant::now();
        let collection = Arc::new(self.load()?);
        log::info!(
            "Loaded base dataset from {} ({} points) in {:?}",
            self.source,
            collection.len(),
            started.elapsed()
        );
        Ok(Arc::clone(self.loaded.get_or_init(|| collection)))
    }

    fn load(&self) -> Result<PointCollection, DatasetError> {
        match &self.source {
            DatasetSource::File(path) => Ok(format::read_and_validate(path)?),
            DatasetSource::Url(url) => {
                let client = reqwest::blocking::Client::builder()
                    .timeout(self.timeout)
                    .build()?;
                let response = client.get(url).send()?;
                let status = response.status();
                if !status.is_success() {
                    return Err(DatasetError::Status(status.as_u16()));
                }
                let text = response.text()?;
                Ok(format::validate(&text)?)
            }
        }
    }
}
