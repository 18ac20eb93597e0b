use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;

use super::types::{Answer, QuestionRequest};

/// Everything that can go wrong between asking and getting an answer.
/// The session shows the same message for all of them; the variant is for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Connection-level failure (DNS, refused, reset).
    Network(String),
    /// No response within the configured timeout.
    Timeout(Duration),
    /// Non-success HTTP status.
    Api { status: u16, message: String },
    /// The service answered but denied access.
    Unauthorized,
    /// The service answered with some other error string.
    Rejected(String),
    /// Body was not the expected shape.
    Malformed(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Network(msg) => write!(f, "network error: {msg}"),
            ServiceError::Timeout(after) => {
                write!(f, "no response after {}s", after.as_secs())
            }
            ServiceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ServiceError::Unauthorized => write!(f, "unauthorized"),
            ServiceError::Rejected(msg) => write!(f, "service error: {msg}"),
            ServiceError::Malformed(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// A remote question-answering endpoint.
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Returns the name of the service, for logging.
    fn name(&self) -> &str;

    /// Sends one question and waits for its answer.
    async fn ask(&self, request: &QuestionRequest) -> Result<Answer, ServiceError>;
}

/// Runs `ask` with an upper bound on how long the session may stay loading.
pub async fn ask_with_timeout(
    service: &dyn AnswerService,
    request: &QuestionRequest,
    timeout: Duration,
) -> Result<Answer, ServiceError> {
    match tokio::time::timeout(timeout, service.ask(request)).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                "{} did not answer within {}s (generation={})",
                service.name(),
                timeout.as_secs(),
                request.generation
            );
            Err(ServiceError::Timeout(timeout))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedService, question};

    #[test]
    fn test_error_display() {
        let err = ServiceError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 502): bad gateway");
        assert_eq!(
            ServiceError::Timeout(Duration::from_secs(60)).to_string(),
            "no response after 60s"
        );
    }

    #[tokio::test]
    async fn test_ask_with_timeout_passes_answer_through() {
        let service = ScriptedService::answering("fine");
        let result = ask_with_timeout(&service, &question("q"), Duration::from_secs(5)).await;
        assert_eq!(result.unwrap().text, "fine");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ask_with_timeout_expires() {
        let service = ScriptedService::hanging();
        let result = ask_with_timeout(&service, &question("q"), Duration::from_secs(5)).await;
        assert_eq!(result, Err(ServiceError::Timeout(Duration::from_secs(5))));
    }
}
