//! Real HTTP transport using ureq
//!
//! Blocking client; runs on the worker thread, never on the UI thread.

use std::io::Read;

use crate::client::transport_types::{HttpResponse, SyncTransport, TransportError};

/// Real HTTP transport using ureq
///
/// No timeout is configured: a request waits until the server answers or
/// the connection fails.
#[derive(Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncTransport for UreqTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<HttpResponse, TransportError> {
        let mut request = self.agent.post(url);
        for (key, value) in headers {
            request = request.set(key, value);
        }

        tracing::debug!(url, body_len = body.len(), "POST");

        // ureq reports 4xx/5xx as Error::Status; those still carry a body
        let response = match request.send_string(body) {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(err)) => {
                return Err(TransportError::Network(err.to_string()));
            }
        };

        let status = response.status();
        // into_string() refuses bodies over 10 MB; large ASTs exceed that
        let mut body = String::new();
        response.into_reader().read_to_string(&mut body)?;
        tracing::debug!(status, body_len = body.len(), "response");

        Ok(HttpResponse { status, body })
    }
}
