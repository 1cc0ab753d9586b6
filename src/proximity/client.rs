//! Request lifecycle of proximity queries.
//!
//! ```text
//! Idle ──submit──▶ Pending ──ok──▶ Fulfilled
//!   ▲                 │
//!   │                 └──err─▶ Failed
//!   └──────── reset (from any state) ───────┘
//! ```
//!
//! Submission is explicit and refused while a query is pending. Resetting
//! (dismiss, new click, map reset) invalidates the in-flight request; its
//! response is discarded when it eventually arrives.

use std::sync::Arc;
use std::time::Duration;

use crate::model::{ProximityQuery, ProximityResultSet};
use crate::proximity::error::QueryError;
use crate::proximity::transport::ProximityTransport;
use crate::task::{TaskSlot, TaskToken};

/// Where the current query is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    /// Nothing submitted since the last reset
    Idle,
    /// A request is in flight; submission is disabled
    Pending,
    /// The last request succeeded with this many records (possibly zero)
    Fulfilled {
        /// Number of records returned
        count: usize,
    },
    /// The last request failed; submission is enabled again
    Failed {
        /// Why it failed
        error: QueryError,
    },
}

/// Resolution of a submitted query, delivered once.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The service answered; the result set may be empty
    Fulfilled(ProximityResultSet),
    /// Transport, status or decode failure
    Failed(QueryError),
}

/// Drives proximity requests on a background thread.
pub struct ProximityClient {
    transport: Arc<dyn ProximityTransport>,
    slot: TaskSlot<Result<ProximityResultSet, QueryError>>,
    state: QueryState,
}

impl ProximityClient {
    /// Create an idle client using `transport`.
    pub fn new(transport: Arc<dyn ProximityTransport>) -> Self {
        Self {
            transport,
            slot: TaskSlot::new("proximity-query"),
            state: QueryState::Idle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Whether a request is in flight.
    pub fn is_pending(&self) -> bool {
        self.slot.is_pending()
    }

    /// Whether the submit action should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_pending()
    }

    /// Start a request for `query`.
    pub fn submit(&mut self, query: ProximityQuery) -> Result<TaskToken, QueryError> {
        if self.is_pending() {
            log::warn!("Ignoring proximity submit while a query is pending");
            return Err(QueryError::Busy);
        }

        let transport = Arc::clone(&self.transport);
        let token = self
            .slot
            .spawn(move || transport.query(&query))
            .map_err(|e| QueryError::Network(format!("failed to start query: {}", e)))?;

        self.state = QueryState::Pending;
        log::info!(
            "Submitted proximity query #{} at ({}, {}) radius {} km",
            token,
            query.latitude,
            query.longitude,
            query.radius_km()
        );
        Ok(token)
    }

    /// Take the outcome of the pending request if it has arrived. Non-blocking.
    pub fn poll(&mut self) -> Option<QueryOutcome> {
        let result = self.slot.poll()?;
        Some(self.resolve(result))
    }

    /// Block until the pending request resolves or `timeout` elapses.
    pub fn wait(&mut self, timeout: Duration) -> Option<QueryOutcome> {
        let result = self.slot.wait(timeout)?;
        Some(self.resolve(result))
    }

    /// Return to `Idle`, discarding any in-flight response.
    pub fn reset(&mut self) {
        self.slot.invalidate();
        self.state = QueryState::Idle;
    }

    fn resolve(&mut self, result: Result<ProximityResultSet, QueryError>) -> QueryOutcome {
        match result {
            Ok(results) => {
                self.state = QueryState::Fulfilled {
                    count: results.len(),
                };
                QueryOutcome::Fulfilled(results)
            }
            Err(error) => {
                log::error!("Proximity query failed: {}", error);
                self.state = QueryState::Failed {
                    error: error.clone(),
                };
                QueryOutcome::Failed(error)
            }
        }
    }
}

impl std::fmt::Debug for ProximityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProximityClient")
            .field("state", &self.state)
            .field("pending", &self.slot.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::mpsc;

    use super::*;
    use crate::model::ProximityRecord;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn record_at(query: &ProximityQuery) -> ProximityRecord {
        ProximityRecord {
            school_nam: Some("Echo".to_string()),
            level: None,
            status: None,
            county: None,
            latitude: query.latitude,
            longitude: query.longitude,
        }
    }

    fn echo_client() -> ProximityClient {
        ProximityClient::new(Arc::new(|q: &ProximityQuery| {
            Ok::<_, QueryError>(ProximityResultSet::new(*q, vec![record_at(q)]))
        }))
    }

    #[test]
    fn test_fulfilled() {
        let mut client = echo_client();
        assert_eq!(client.state(), &QueryState::Idle);

        client.submit(ProximityQuery::at(-1.0, 36.0)).unwrap();
        let outcome = client.wait(TIMEOUT).unwrap();

        match outcome {
            QueryOutcome::Fulfilled(results) => assert_eq!(results.len(), 1),
            other => panic!("expected Fulfilled, got {:?}", other),
        }
        assert_eq!(client.state(), &QueryState::Fulfilled { count: 1 });
        assert!(client.can_submit());
    }

    #[test]
    fn test_empty_payload_is_fulfilled_not_failed() {
        let mut client = ProximityClient::new(Arc::new(|q: &ProximityQuery| {
            crate::proximity::parse_response(*q, r#"{"data": []}"#)
        }));

        client.submit(ProximityQuery::at(0.0, 0.0)).unwrap();
        assert!(matches!(
            client.wait(TIMEOUT),
            Some(QueryOutcome::Fulfilled(ref r)) if r.is_empty()
        ));
        assert_eq!(client.state(), &QueryState::Fulfilled { count: 0 });
    }

    #[test]
    fn test_failure_reenables_submission() {
        let mut client = ProximityClient::new(Arc::new(|_: &ProximityQuery| {
            Err::<ProximityResultSet, _>(QueryError::Network("connection refused".to_string()))
        }));

        client.submit(ProximityQuery::at(0.0, 0.0)).unwrap();
        assert_eq!(
            client.wait(TIMEOUT),
            Some(QueryOutcome::Failed(QueryError::Network(
                "connection refused".to_string()
            )))
        );
        assert!(matches!(client.state(), QueryState::Failed { .. }));
        assert!(client.can_submit());
    }

    #[test]
    fn test_duplicate_submit_refused_while_pending() {
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let gate = Mutex::new(release_rx);
        let mut client = ProximityClient::new(Arc::new(move |q: &ProximityQuery| {
            let _ = gate.lock().map(|rx| rx.recv());
            Ok::<_, QueryError>(ProximityResultSet::new(*q, Vec::new()))
        }));

        client.submit(ProximityQuery::at(0.0, 0.0)).unwrap();
        assert!(!client.can_submit());
        assert_eq!(
            client.submit(ProximityQuery::at(0.0, 0.0)),
            Err(QueryError::Busy)
        );

        release_tx.send(()).unwrap();
        assert!(client.wait(TIMEOUT).is_some());
        assert!(client.can_submit());
    }

    #[test]
    fn test_response_after_reset_is_discarded() {
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let gate = Mutex::new(release_rx);
        let mut client = ProximityClient::new(Arc::new(move |q: &ProximityQuery| {
            let _ = gate.lock().map(|rx| rx.recv());
            Ok::<_, QueryError>(ProximityResultSet::new(*q, vec![record_at(q)]))
        }));

        // First point, then the user clicks elsewhere and submits again.
        client.submit(ProximityQuery::at(1.0, 1.0)).unwrap();
        client.reset();
        assert_eq!(client.state(), &QueryState::Idle);
        client.submit(ProximityQuery::at(2.0, 2.0)).unwrap();

        release_tx.send(()).unwrap();
        release_tx.send(()).unwrap();

        match client.wait(TIMEOUT) {
            Some(QueryOutcome::Fulfilled(results)) => {
                assert_eq!(results.query().latitude, 2.0);
            }
            other => panic!("expected the second query's results, got {:?}", other),
        }
    }
}
