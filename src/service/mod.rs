pub mod http;
pub mod provider;
pub mod types;

pub use http::HttpAnswerService;
pub use provider::{AnswerService, ServiceError, ask_with_timeout};
pub use types::{Answer, ChatResponse, QuestionRequest, ResultBody};
