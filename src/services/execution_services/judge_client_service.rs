use std::error::Error;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::GLOBAL_CONFIG;
use crate::models::submission_models::{JudgeError, JudgeVerdict, SubmissionRequest};

/// Seam between the submission workflow and the external judge, so the
/// workflow can be driven against a stub in tests.
#[async_trait::async_trait]
pub trait JudgeDispatch {
    async fn dispatch(&self, request: &SubmissionRequest) -> Result<JudgeVerdict, JudgeError>;
}

#[derive(Serialize)]
struct JudgeWireRequest<'a> {
    session_id: &'a str,
    problem_id: &'a str,
    language: &'a str,
    code: &'a str,
    kind: &'a str,
}

#[derive(Deserialize)]
struct JudgeWireResponse {
    passed: bool,
    #[serde(default)]
    output: String,
}

pub struct HttpJudgeClient {
    client: reqwest::Client,
    endpoint: String,
    request_timeout: Duration,
    max_attempts: u32,
    backoff_base: Duration,
}

impl HttpJudgeClient {
    pub fn from_config() -> Self {
        let judge = &GLOBAL_CONFIG.get().unwrap().judge;
        HttpJudgeClient {
            client: reqwest::Client::new(),
            endpoint: judge.endpoint.clone(),
            request_timeout: Duration::from_millis(judge.request_timeout_ms),
            max_attempts: judge.max_attempts,
            backoff_base: Duration::from_millis(judge.backoff_base_ms),
        }
    }

    async fn dispatch_once(
        &self,
        request: &SubmissionRequest,
    ) -> Result<JudgeVerdict, JudgeError> {
        let body = JudgeWireRequest {
            session_id: request.get_session_id(),
            problem_id: request.get_problem_id(),
            language: request.get_language().as_str(),
            code: request.get_code(),
            kind: request.get_kind().as_str(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.request_timeout)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(classify_transport_error)?;
        if let Some(error) = classify_http_status(status, &text) {
            return Err(error);
        }

        serde_json::from_str::<JudgeWireResponse>(&text)
            .map(|wire| JudgeVerdict {
                passed: wire.passed,
                output: wire.output,
            })
            .map_err(|e| JudgeError::Rejected(format!("Malformed judge response: {}", e)))
    }
}

#[async_trait::async_trait]
impl JudgeDispatch for HttpJudgeClient {
    async fn dispatch(&self, request: &SubmissionRequest) -> Result<JudgeVerdict, JudgeError> {
        let mut attempt: u32 = 0;
        loop {
            match self.dispatch_once(request).await {
                Ok(verdict) => return Ok(verdict),
                Err(error) => {
                    attempt += 1;
                    if !error.is_retryable() || attempt >= self.max_attempts {
                        return Err(error);
                    }
                    eprintln!(
                        "Judge dispatch attempt {} for session {} failed: {}",
                        attempt,
                        request.get_session_id(),
                        error
                    );
                    tokio::time::sleep(backoff_delay(self.backoff_base, attempt)).await;
                }
            }
        }
    }
}

fn classify_transport_error(error: reqwest::Error) -> JudgeError {
    if error.is_timeout() {
        JudgeError::Timeout
    } else {
        JudgeError::TransientNetwork(error.to_string())
    }
}

/// Non-2xx statuses: the judge's own failures are transient, anything it
/// refused to accept is a rejection with the body as the diagnostic.
fn classify_http_status(status: u16, body: &str) -> Option<JudgeError> {
    match status {
        200..=299 => None,
        500..=599 => Some(JudgeError::TransientNetwork(format!(
            "judge returned status {}",
            status
        ))),
        _ => {
            let diagnostic = if body.is_empty() {
                format!("judge rejected the submission (status {})", status)
            } else {
                body.to_string()
            };
            Some(JudgeError::Rejected(diagnostic))
        }
    }
}

fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * 2u32.saturating_pow(attempt.saturating_sub(1))
}

impl JudgeError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, JudgeError::TransientNetwork(_) | JudgeError::Timeout)
    }

    pub fn message(&self) -> String {
        match self {
            JudgeError::TransientNetwork(msg) => {
                format!("Network error talking to the judge: {}", msg)
            }
            JudgeError::Timeout => "Judge request timed out".to_string(),
            JudgeError::Rejected(diagnostic) => diagnostic.clone(),
        }
    }
}

impl fmt::Display for JudgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Error for JudgeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_side_failures_are_transient_and_retryable() {
        let error = classify_http_status(503, "").unwrap();
        assert!(matches!(error, JudgeError::TransientNetwork(_)));
        assert!(error.is_retryable());
    }

    #[test]
    fn client_side_failures_carry_the_diagnostic_and_do_not_retry() {
        let error = classify_http_status(422, "compile error on line 3").unwrap();
        match &error {
            JudgeError::Rejected(diagnostic) => assert_eq!(diagnostic, "compile error on line 3"),
            other => panic!("expected Rejected, got {:?}", other),
        }
        assert!(!error.is_retryable());
    }

    #[test]
    fn success_statuses_classify_as_ok() {
        assert!(classify_http_status(200, "").is_none());
        assert!(classify_http_status(204, "").is_none());
    }

    #[test]
    fn timeouts_are_retryable() {
        assert!(JudgeError::Timeout.is_retryable());
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let base = Duration::from_millis(250);
        assert_eq!(backoff_delay(base, 1), Duration::from_millis(250));
        assert_eq!(backoff_delay(base, 2), Duration::from_millis(500));
        assert_eq!(backoff_delay(base, 3), Duration::from_millis(1_000));
    }

    #[test]
    fn verdict_wire_shape_parses() {
        let wire: JudgeWireResponse =
            serde_json::from_str(r#"{"passed": true, "output": "all cases passed"}"#).unwrap();
        assert!(wire.passed);
        assert_eq!(wire.output, "all cases passed");

        let bare: JudgeWireResponse = serde_json::from_str(r#"{"passed": false}"#).unwrap();
        assert!(!bare.passed);
        assert_eq!(bare.output, "");
    }
}
