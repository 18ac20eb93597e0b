//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::service::{Answer, AnswerService, QuestionRequest, ServiceError};

enum Script {
    Answer(String),
    Fail(ServiceError),
    Hang,
}

/// An in-memory service that replies the same way every time and records
/// what it was asked.
pub struct ScriptedService {
    script: Script,
    pub asked: Mutex<Vec<QuestionRequest>>,
}

impl ScriptedService {
    fn with(script: Script) -> Self {
        Self {
            script,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(text: &str) -> Self {
        Self::with(Script::Answer(text.to_string()))
    }

    pub fn failing(error: ServiceError) -> Self {
        Self::with(Script::Fail(error))
    }

    /// Never answers.
    pub fn hanging() -> Self {
        Self::with(Script::Hang)
    }
}

#[async_trait]
impl AnswerService for ScriptedService {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn ask(&self, request: &QuestionRequest) -> Result<Answer, ServiceError> {
        self.asked.lock().unwrap().push(request.clone());
        match &self.script {
            Script::Answer(text) => Ok(Answer { text: text.clone() }),
            Script::Fail(error) => Err(error.clone()),
            Script::Hang => std::future::pending().await,
        }
    }
}

/// A request for `https://example.com` with no history.
pub fn question(text: &str) -> QuestionRequest {
    QuestionRequest {
        question: text.to_string(),
        web_url: "https://example.com".to_string(),
        history: None,
        generation: 1,
    }
}
