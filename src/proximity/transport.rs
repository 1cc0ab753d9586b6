//! Transport to the remote proximity-search service.

use std::time::Duration;

use reqwest::blocking::Client;
use web_time::Instant;

use crate::model::{ProximityQuery, ProximityResponse, ProximityResultSet};
use crate::proximity::error::QueryError;

/// Something that can answer a proximity query. Calls block; the client runs
/// them on a worker thread.
pub trait ProximityTransport: Send + Sync {
    /// Run one query against the service.
    fn query(&self, query: &ProximityQuery) -> Result<ProximityResultSet, QueryError>;
}

impl<F> ProximityTransport for F
where
    F: Fn(&ProximityQuery) -> Result<ProximityResultSet, QueryError> + Send + Sync,
{
    fn query(&self, query: &ProximityQuery) -> Result<ProximityResultSet, QueryError> {
        self(query)
    }
}

/// JSON-over-HTTP transport: `POST {latitude, longitude, radius}` and read
/// `{ data: [...] }` back.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport for `endpoint` with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, QueryError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// The endpoint queries are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ProximityTransport for HttpTransport {
    fn query(&self, query: &ProximityQuery) -> Result<ProximityResultSet, QueryError> {
        let started = Instant::now();
        log::debug!(
            "POST {} ({}, {}) r={}km",
            self.endpoint,
            query.latitude,
            query.longitude,
            query.radius_km()
        );

        let response = self.client.post(&self.endpoint).json(query).send()?;
        let status = response.status();
        if !status.is_success() {
            log::error!("Proximity service returned {}", status);
            return Err(QueryError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let results = parse_response(*query, &body)?;
        log::info!(
            "Proximity query returned {} records in {:?}",
            results.len(),
            started.elapsed()
        );
        Ok(results)
    }
}

/// Decode a response body. An absent or empty `data` array is zero results.
pub fn parse_response(query: ProximityQuery, body: &str) -> Result<ProximityResultSet, QueryError> {
    let response: ProximityResponse = serde_json::from_str(body)?;
    Ok(ProximityResultSet::from_response(query, response))
}
