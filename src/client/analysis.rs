//! Analysis request/response handling
//!
//! One POST per submission. The response body decides the outcome, not the
//! status code:
//! - `{"data": {...}}` → `Success`
//! - `{"detail": ...}` → `Failure`
//! - neither, on a 2xx → `Err(ClientError::MalformedResponse)`
//! - neither, otherwise → `Failure` carrying the status line
//! - no response at all → `Err(ClientError::Transport)`, logged here

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::transport::{HttpResponse, SyncTransport, Transport};
use crate::client::ClientError;

/// Request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub code: String,
}

/// Successful analysis payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisData {
    /// Lexemes in source order
    pub tokens: Vec<String>,
    /// Parse tree, shape defined by the service
    pub ast: Value,
}

/// Outcome of a round trip that produced a response
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    Success(AnalysisData),
    Failure { detail: String },
}

impl AnalysisResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResult::Success(_))
    }
}

/// Either wire shape; which field is present picks the variant
#[derive(Deserialize)]
struct ResponseBody {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    detail: Option<Value>,
}

/// Client for the analysis endpoint
#[derive(Debug)]
pub struct AnalysisClient {
    endpoint: String,
    transport: Transport,
}

impl AnalysisClient {
    pub fn new(endpoint: impl Into<String>, transport: Transport) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Submit `code` for analysis
    ///
    /// The text is sent verbatim. Transport failures and unreadable success
    /// bodies are logged and returned as errors; everything else is a result.
    pub fn analyse(&self, code: &str) -> Result<AnalysisResult, ClientError> {
        let request = AnalysisRequest {
            code: code.to_string(),
        };
        let body = serde_json::to_string(&request)?;

        tracing::info!(endpoint = %self.endpoint, code_len = code.len(), "submitting analysis");

        let response = self
            .transport
            .post_json(
                &self.endpoint,
                &[("Content-Type", "application/json")],
                &body,
            )
            .map_err(|err| {
                tracing::error!(endpoint = %self.endpoint, error = %err, "analysis request failed");
                ClientError::Transport(err)
            })?;

        interpret_response(&response).map_err(|err| {
            tracing::error!(status = response.status, error = %err, "unreadable analysis response");
            err
        })
    }
}

/// Map a raw response onto `AnalysisResult`
pub fn interpret_response(response: &HttpResponse) -> Result<AnalysisResult, ClientError> {
    let body = serde_json::from_str::<ResponseBody>(&response.body).ok();

    if let Some(data) = body.as_ref().and_then(|b| b.data.clone()) {
        let data: AnalysisData = serde_json::from_value(data)
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
        tracing::info!(status = response.status, tokens = data.tokens.len(), "analysis succeeded");
        return Ok(AnalysisResult::Success(data));
    }

    let detail = match body.and_then(|b| b.detail) {
        Some(Value::String(detail)) => detail,
        // Validation errors carry a list of objects
        Some(detail) => detail.to_string(),
        None if response.is_success() => {
            return Err(ClientError::MalformedResponse(
                "body has neither data nor detail".to_string(),
            ));
        }
        None => {
            let text = response.body.trim();
            if text.is_empty() {
                format!("HTTP {}", response.status)
            } else {
                format!("HTTP {}: {}", response.status, text)
            }
        }
    };
    tracing::info!(status = response.status, %detail, "analysis rejected");
    Ok(AnalysisResult::Failure { detail })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::transport::FakeTransport;
    use serde_json::json;

    fn client(transport: FakeTransport) -> AnalysisClient {
        AnalysisClient::new("http://analysis.test/", Transport::Fake(transport))
    }

    #[test]
    fn test_success_body_becomes_success() {
        let c = client(FakeTransport::new(
            r#"{"data": {"tokens": ["a", "b"], "ast": {"type": "Program"}}}"#,
        ));
        let result = c.analyse("a b").unwrap();
        assert_eq!(
            result,
            AnalysisResult::Success(AnalysisData {
                tokens: vec!["a".to_string(), "b".to_string()],
                ast: json!({"type": "Program"}),
            })
        );
    }

    #[test]
    fn test_error_body_becomes_failure() {
        let c = client(FakeTransport::with_status(400, r#"{"detail": "parse error"}"#));
        let result = c.analyse("???").unwrap();
        assert_eq!(
            result,
            AnalysisResult::Failure {
                detail: "parse error".to_string()
            }
        );
    }

    #[test]
    fn test_structured_detail_is_rendered_as_json() {
        let c = client(FakeTransport::with_status(
            422,
            r#"{"detail": [{"loc": ["body", "code"], "msg": "field required"}]}"#,
        ));
        match c.analyse("").unwrap() {
            AnalysisResult::Failure { detail } => {
                assert!(detail.starts_with('['));
                assert!(detail.contains("field required"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_non_json_error_body_keeps_status() {
        let c = client(FakeTransport::with_status(502, "Bad Gateway"));
        assert_eq!(
            c.analyse("x").unwrap(),
            AnalysisResult::Failure {
                detail: "HTTP 502: Bad Gateway".to_string()
            }
        );

        let c = client(FakeTransport::with_status(500, ""));
        assert_eq!(
            c.analyse("x").unwrap(),
            AnalysisResult::Failure {
                detail: "HTTP 500".to_string()
            }
        );
    }

    #[test]
    fn test_transport_failure_is_error() {
        let c = client(FakeTransport::with_error("connection refused"));
        let err = c.analyse("x").unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_detail_on_2xx_is_failure() {
        let c = client(FakeTransport::new(r#"{"detail": "Failed to analyse input"}"#));
        assert_eq!(
            c.analyse("x").unwrap(),
            AnalysisResult::Failure {
                detail: "Failed to analyse input".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_success_body_is_error() {
        for body in [
            r#"{"result": 1}"#,
            r#"{"data": {"tokens": 5}}"#,
            "not json",
            "",
        ] {
            let c = client(FakeTransport::new(body));
            assert!(
                matches!(c.analyse("x").unwrap_err(), ClientError::MalformedResponse(_)),
                "body: {}",
                body
            );
        }
    }

    #[test]
    fn test_request_body_is_code_verbatim() {
        let c = client(FakeTransport::new(r#"{"data": {"tokens": [], "ast": null}}"#));
        let code = "const x = \"quoted\";\n\ttab";
        c.analyse(code).unwrap();

        let requests = c.transport().as_fake().unwrap().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://analysis.test/");
        let sent: AnalysisRequest = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(sent.code, code);
        assert!(requests[0]
            .headers
            .contains(&("Content-Type".to_string(), "application/json".to_string())));
    }
}
