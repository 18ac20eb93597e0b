//! # Session State
//!
//! Everything one conversation owns, in one place.
//!
//! ```text
//! Session
//! ├── log: MessageLog        // append-only turns, starts with a greeting
//! ├── input: InputField      // question being typed (≤ 512 chars)
//! ├── target_ref: String     // website the questions are about
//! ├── is_loading: bool       // a request is in flight
//! ├── generation: u64        // identifies the in-flight request
//! └── status_message: String // title bar text
//! ```
//!
//! State changes only happen through `update(session, action)` in action.rs.
//! The log and the flags are always changed together inside one call.

use crate::core::config::ResolvedConfig;
use crate::core::conversation::MessageLog;
use crate::core::history::{self, HistoryPair};
use crate::core::input::InputField;

pub struct Session {
    pub log: MessageLog,
    pub input: InputField,
    pub target_ref: String,
    pub is_loading: bool,
    /// Bumped for every request sent and on teardown. A response carrying
    /// any other value is stale and gets dropped.
    pub generation: u64,
    pub status_message: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(MessageLog::default(), String::new())
    }
}

impl Session {
    pub fn new(log: MessageLog, target_ref: String) -> Self {
        Self {
            log,
            input: InputField::new(),
            target_ref,
            is_loading: false,
            generation: 0,
            status_message: String::from("Ready"),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            MessageLog::new(config.greeting.clone()),
            config.website.clone().unwrap_or_default(),
        )
    }

    /// Context for the next request: the latest answered question, if any.
    pub fn history(&self) -> Option<HistoryPair> {
        history::latest_exchange(self.log.turns())
    }

    pub fn has_target(&self) -> bool {
        !self.target_ref.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ApolloConfig, resolve};
    use crate::core::conversation::{ChatTurn, DEFAULT_GREETING};

    #[test]
    fn test_session_new_defaults() {
        let session = Session::default();
        assert_eq!(session.log.len(), 1);
        assert_eq!(session.log.turns()[0], ChatTurn::assistant(DEFAULT_GREETING));
        assert!(!session.is_loading);
        assert!(session.input.is_empty());
        assert!(!session.has_target());
        assert_eq!(session.generation, 0);
    }

    #[test]
    fn test_from_config_uses_greeting_and_website() {
        let mut config = resolve(&ApolloConfig::default(), &Default::default());
        config.greeting = "Welcome.".to_string();
        config.website = Some("https://example.com".to_string());

        let session = Session::from_config(&config);
        assert_eq!(session.log.turns()[0].text, "Welcome.");
        assert_eq!(session.target_ref, "https://example.com");
        assert!(session.has_target());
    }

    #[test]
    fn test_whitespace_target_is_not_a_target() {
        let session = Session::new(MessageLog::default(), "   ".to_string());
        assert!(!session.has_target());
    }
}
