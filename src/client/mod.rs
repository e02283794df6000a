//! Analysis client
//!
//! Talks to the remote LexZig analysis endpoint over HTTP.
//! The transport is swappable so tests never touch the network.

pub mod analysis;
pub mod transport;
pub mod transport_fake;
pub mod transport_types;
pub mod transport_ureq;

pub use analysis::{AnalysisClient, AnalysisData, AnalysisRequest, AnalysisResult};
pub use transport::{FakeTransport, HttpResponse, SyncTransport, Transport, TransportError};

/// Client errors (no usable result for the caller)
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No response was received
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// A 2xx response whose body is not `{"data": {"tokens", "ast"}}`
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Request body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
