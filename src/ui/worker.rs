//! Analysis worker threads
//!
//! Each submission runs the blocking request on its own thread and sends
//! exactly one `AnalysisEvent` back. The main thread drains the channel in
//! its event loop; whichever event arrives last is what ends up displayed.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::client::{AnalysisClient, AnalysisResult};

/// Channel sender for analysis events
pub type AnalysisSender = mpsc::Sender<AnalysisEvent>;
/// Channel receiver for analysis events
pub type AnalysisReceiver = mpsc::Receiver<AnalysisEvent>;

/// Event sent from a worker thread to the main thread
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisEvent {
    /// The service answered (success or application error)
    Completed {
        request_id: u64,
        result: AnalysisResult,
    },
    /// No usable response (already logged by the client)
    Failed { request_id: u64, error: String },
}

impl AnalysisEvent {
    pub fn request_id(&self) -> u64 {
        match self {
            AnalysisEvent::Completed { request_id, .. } => *request_id,
            AnalysisEvent::Failed { request_id, .. } => *request_id,
        }
    }
}

/// Spawn a thread that analyses `code` and reports on `tx`
pub fn spawn_analysis(
    client: Arc<AnalysisClient>,
    request_id: u64,
    code: String,
    tx: AnalysisSender,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("analysis-{}", request_id))
        .spawn(move || {
            let event = match client.analyse(&code) {
                Ok(result) => AnalysisEvent::Completed { request_id, result },
                Err(err) => AnalysisEvent::Failed {
                    request_id,
                    error: err.to_string(),
                },
            };
            // Receiver gone means the app is shutting down
            if tx.send(event).is_err() {
                tracing::debug!(request_id, "analysis finished after receiver closed");
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{FakeTransport, Transport};

    #[test]
    fn test_worker_reports_completion() {
        let client = Arc::new(AnalysisClient::new(
            "http://test/",
            Transport::Fake(FakeTransport::with_status(400, r#"{"detail": "nope"}"#)),
        ));
        let (tx, rx) = mpsc::channel();
        spawn_analysis(client, 7, "x".to_string(), tx)
            .unwrap()
            .join()
            .unwrap();

        let event = rx.recv().unwrap();
        assert_eq!(event.request_id(), 7);
        assert_eq!(
            event,
            AnalysisEvent::Completed {
                request_id: 7,
                result: AnalysisResult::Failure {
                    detail: "nope".to_string()
                }
            }
        );
    }

    #[test]
    fn test_worker_reports_transport_failure() {
        let client = Arc::new(AnalysisClient::new(
            "http://test/",
            Transport::Fake(FakeTransport::with_error("connection refused")),
        ));
        let (tx, rx) = mpsc::channel();
        spawn_analysis(client, 1, "x".to_string(), tx)
            .unwrap()
            .join()
            .unwrap();

        match rx.recv().unwrap() {
            AnalysisEvent::Failed { request_id, error } => {
                assert_eq!(request_id, 1);
                assert!(error.contains("connection refused"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_worker_survives_closed_receiver() {
        let client = Arc::new(AnalysisClient::new(
            "http://test/",
            Transport::Fake(FakeTransport::new(r#"{"data": {"tokens": [], "ast": {}}}"#)),
        ));
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let handle = spawn_analysis(client, 1, "x".to_string(), tx).unwrap();
        assert!(handle.join().is_ok());
    }
}
