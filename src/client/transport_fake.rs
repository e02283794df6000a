//! Fake transport for testing
//!
//! Returns a canned response instead of making HTTP calls and records every
//! request it sees.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::client::transport_types::{HttpResponse, SyncTransport, TransportError};

/// A request observed by `FakeTransport`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Fake transport for testing
#[derive(Debug)]
pub struct FakeTransport {
    /// Response to return once `queued` is drained (if no error is set)
    pub response: HttpResponse,
    /// Responses returned first, one per request
    queued: Mutex<VecDeque<HttpResponse>>,
    /// Network error message to return (if set)
    pub error_message: Option<String>,
    /// Sleep before answering
    pub delay: Option<Duration>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    /// Fake transport answering 200 with the given body
    pub fn new(body: &str) -> Self {
        Self::with_status(200, body)
    }

    /// Fake transport answering with the given status and body
    pub fn with_status(status: u16, body: &str) -> Self {
        Self {
            response: HttpResponse::new(status, body),
            queued: Mutex::new(VecDeque::new()),
            error_message: None,
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fake transport that fails with a network error
    pub fn with_error(msg: &str) -> Self {
        Self {
            response: HttpResponse::new(0, ""),
            queued: Mutex::new(VecDeque::new()),
            error_message: Some(msg.to_string()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer with `responses` in order, then keep repeating the last one
    pub fn with_responses(responses: Vec<HttpResponse>) -> Self {
        let mut queued: VecDeque<HttpResponse> = responses.into();
        let last = queued.pop_back().unwrap_or_else(|| HttpResponse::new(200, ""));
        let mut transport = Self::with_status(last.status, &last.body);
        transport.queued = Mutex::new(queued);
        transport
    }

    /// Answer only after `delay`
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests seen so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl SyncTransport for FakeTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<HttpResponse, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body: body.to_string(),
            });
        }

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        if let Some(ref msg) = self.error_message {
            return Err(TransportError::Network(msg.clone()));
        }
        let next = self
            .queued
            .lock()
            .ok()
            .and_then(|mut queued| queued.pop_front());
        Ok(next.unwrap_or_else(|| self.response.clone()))
    }
}
