//! Proximity query client: request lifecycle plus the transport to the
//! remote search service.

mod client;
mod error;
mod transport;

pub use client::{ProximityClient, QueryOutcome, QueryState};
pub use error::QueryError;
pub use transport::{HttpTransport, ProximityTransport, parse_response};
