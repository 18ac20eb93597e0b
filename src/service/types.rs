use serde::{Deserialize, Serialize};

use crate::core::history::HistoryPair;

/// Body of `POST /api/chat`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QuestionRequest {
    pub question: String,
    #[serde(rename = "webUrl")]
    pub web_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryPair>>,
    /// Session generation this request belongs to. Never sent over the wire.
    #[serde(skip)]
    pub generation: u64,
}

/// A successful answer from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
}

/// Raw response envelope: `{ "result": { "text": ... } }` on success,
/// `{ "result": { "error": ... } }` when the service refuses.
#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    pub result: ResultBody,
}

#[derive(Deserialize, Debug, Default)]
pub struct ResultBody {
    pub text: Option<String>,
    pub error: Option<String>,
}
