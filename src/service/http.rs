//! HTTP client for the website Q&A service.
//!
//! One JSON `POST {base_url}/api/chat` per question. The service reports
//! authorization problems inside a 200 body (`{"result":{"error":"Unauthorized"}}`),
//! so a successful status still has to be inspected before it counts as an answer.

use async_trait::async_trait;
use log::{debug, info, warn};

use super::provider::{AnswerService, ServiceError};
use super::types::{Answer, ChatResponse, QuestionRequest};

/// Error string the service uses for denied requests.
const UNAUTHORIZED: &str = "Unauthorized";

pub struct HttpAnswerService {
    base_url: String,
    api_token: Option<String>,
    client: reqwest::Client,
}

impl HttpAnswerService {
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

/// Turns a decoded body into an answer or the failure it signals.
fn interpret(body: ChatResponse) -> Result<Answer, ServiceError> {
    match (body.result.error, body.result.text) {
        (Some(error), _) if error == UNAUTHORIZED => Err(ServiceError::Unauthorized),
        (Some(error), _) => Err(ServiceError::Rejected(error)),
        (None, Some(text)) => Ok(Answer { text }),
        (None, None) => Err(ServiceError::Malformed(
            "result.text missing".to_string(),
        )),
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    fn name(&self) -> &str {
        "http"
    }

    async fn ask(&self, request: &QuestionRequest) -> Result<Answer, ServiceError> {
        info!(
            "Q&A request: url={}, question_len={}, history={} (generation={})",
            request.web_url,
            request.question.len(),
            request.history.as_ref().map_or(0, Vec::len),
            request.generation
        );

        let mut builder = self.client.post(self.endpoint()).json(request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        debug!("Q&A response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Q&A API error: {} - {}", status, err_body);
            return Err(ServiceError::Api {
                status,
                message: err_body,
            });
        }

        let raw = response
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        debug!("Q&A response body: {} bytes", raw.len());

        let body: ChatResponse =
            serde_json::from_str(&raw).map_err(|e| ServiceError::Malformed(e.to_string()))?;
        interpret(body)
    }
}
