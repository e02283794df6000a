//! Transport types
//!
//! Common types shared across transport implementations.

/// Raw HTTP response, any status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport errors: no response was received
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Network error (connection refused, DNS failure, reset, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// Reading the response body failed
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io(err.to_string())
    }
}

/// Synchronous HTTP transport
///
/// Abstraction over the HTTP client to enable testing with `FakeTransport`.
/// A non-2xx status is a response, not an error.
pub trait SyncTransport: Send + Sync {
    /// POST a JSON body and return the response whatever its status
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<HttpResponse, TransportError>;
}
