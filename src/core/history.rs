//! # History Derivation
//!
//! Short-term context sent along with the next question: the most recent
//! question/answer pair. Always recomputed from the log, never cached.
//!
//! Two windowing policies live here:
//!
//! - [`derive_history`]: the last two turns by position, whatever their roles.
//! - [`latest_exchange`]: the most recent user turn directly answered by an
//!   assistant turn. This is what outgoing requests carry, since positional
//!   slicing pairs the wrong turns while a question is still pending.

use serde::Serialize;

use crate::core::conversation::{ChatTurn, Role};

/// Minimum log length before any history exists (greeting + one exchange).
pub const MIN_HISTORY_LEN: usize = 3;

/// A question and the answer that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPair {
    pub user: String,
    pub assistant: String,
}

/// Serializes as a two-element array, matching what the service expects
/// inside its `history` list.
impl Serialize for HistoryPair {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [&self.user, &self.assistant].serialize(serializer)
    }
}

/// Positional window: texts of the two most recent turns once the log holds
/// at least [`MIN_HISTORY_LEN`] turns.
pub fn derive_history(turns: &[ChatTurn]) -> Option<HistoryPair> {
    if turns.len() < MIN_HISTORY_LEN {
        return None;
    }
    let [prev, last] = &turns[turns.len() - 2..] else {
        return None;
    };
    Some(HistoryPair {
        user: prev.text.clone(),
        assistant: last.text.clone(),
    })
}

/// Role-aware window: the most recent `user` turn immediately followed by an
/// `assistant` turn.
pub fn latest_exchange(turns: &[ChatTurn]) -> Option<HistoryPair> {
    if turns.len() < MIN_HISTORY_LEN {
        return None;
    }
    turns.windows(2).rev().find_map(|pair| match pair {
        [question, answer] if question.role == Role::User && answer.role == Role::Assistant => {
            Some(HistoryPair {
                user: question.text.clone(),
                assistant: answer.text.clone(),
            })
        }
        _ => None,
    })
}
