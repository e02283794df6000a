//! Concrete transport selection

pub use crate::client::transport_fake::{FakeTransport, RecordedRequest};
pub use crate::client::transport_types::{HttpResponse, SyncTransport, TransportError};
pub use crate::client::transport_ureq::UreqTransport;

/// Concrete transport enum
///
/// Wraps all transport types so the client stays a plain, non-generic type.
#[derive(Debug)]
pub enum Transport {
    Real(UreqTransport),
    Fake(FakeTransport),
}

impl Transport {
    /// The fake transport, if this is one (tests inspect recorded requests)
    pub fn as_fake(&self) -> Option<&FakeTransport> {
        match self {
            Transport::Fake(t) => Some(t),
            Transport::Real(_) => None,
        }
    }
}

impl SyncTransport for Transport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<HttpResponse, TransportError> {
        match self {
            Transport::Real(t) => t.post_json(url, headers, body),
            Transport::Fake(t) => t.post_json(url, headers, body),
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Transport::Real(UreqTransport::new())
    }
}
