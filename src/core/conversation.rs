//! # Conversation Log
//!
//! The append-only record of everything said in a session. The presentation
//! layer only ever reads it; the session controller is the only writer.
//!
//! The log is never empty: it is created with a single assistant greeting,
//! so readers can always rely on `last()` returning a turn.

use serde::{Deserialize, Serialize};

/// Greeting shown as the first assistant turn of every session.
pub const DEFAULT_GREETING: &str = "Hey, I'm Apollo! How can I help?";

/// Who authored a turn. Serialized with the names the chat frontend uses.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Role {
    #[serde(rename = "userMessage")]
    User,
    #[serde(rename = "apiMessage")]
    Assistant,
}

/// One message in the conversation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatTurn {
    #[serde(rename = "type")]
    pub role: Role,
    #[serde(rename = "message")]
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// Ordered, append-only sequence of turns.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageLog {
    turns: Vec<ChatTurn>,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}

impl MessageLog {
    /// Creates a log seeded with an assistant greeting.
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            turns: vec![ChatTurn::assistant(greeting)],
        }
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the log has no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }
}
