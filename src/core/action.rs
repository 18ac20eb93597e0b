//! # Actions
//!
//! Everything that can happen to a session becomes an `Action`.
//! User presses Enter? That's `Action::Key(Key::Enter { shift: false })`.
//! The service answers? That's `Action::ResponseReceived { .. }`.
//!
//! The `update()` function applies an action to the session and returns the
//! `Effect` the runtime has to carry out. No I/O happens here.
//!
//! ```text
//! Session + Action  →  update()  →  Session' + Effect
//! ```
//!
//! One submit walks this cycle and always ends back in `Idle`:
//!
//! ```text
//! Idle → Validating → Rejected ─────────────┐
//!                   → Sending → Fulfilled ──┼→ Idle
//!                             → Failed ─────┘
//! ```

use log::{debug, info, warn};

use crate::core::conversation::ChatTurn;
use crate::core::input::{Key, KeyOutcome};
use crate::core::state::Session;
use crate::service::{Answer, QuestionRequest, ServiceError};

/// Reply appended when a question is asked before any website is set.
pub const NO_TARGET_MESSAGE: &str = "Please input a website before asking a question.";
/// Reply appended for every failed request, whatever the cause.
pub const ERROR_MESSAGE: &str = "There seems to be an error";

#[derive(Debug)]
pub enum Action {
    /// A key press in the question field.
    Key(Key),
    /// Submit whatever is in the question field.
    Submit,
    /// The website being asked about changed.
    SetTarget(String),
    /// A request finished, successfully or not.
    ResponseReceived {
        generation: u64,
        outcome: Result<Answer, ServiceError>,
    },
    Quit,
}

/// Work the runtime must do after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Send exactly this request and report back with `ResponseReceived`.
    SpawnRequest(QuestionRequest),
    Quit,
}

pub fn update(session: &mut Session, action: Action) -> Effect {
    match action {
        Action::Key(key) => match session.input.handle_key(&key, session.is_loading) {
            KeyOutcome::Submit => submit(session),
            _ => Effect::None,
        },
        Action::Submit => submit(session),
        Action::SetTarget(target) => {
            debug!("Target set to {:?}", target);
            session.target_ref = target;
            Effect::None
        }
        Action::ResponseReceived {
            generation,
            outcome,
        } => {
            resolve(session, generation, outcome);
            Effect::None
        }
        Action::Quit => {
            // Anything still in flight belongs to a session that is going away.
            session.generation += 1;
            Effect::Quit
        }
    }
}

fn submit(session: &mut Session) -> Effect {
    if session.is_loading {
        debug!("Submit ignored: request already in flight");
        return Effect::None;
    }

    let question = session.input.text().trim().to_string();
    if question.is_empty() {
        return Effect::None;
    }

    session.log.push(ChatTurn::user(question.clone()));
    session.is_loading = true;

    if !session.has_target() {
        info!("Submit rejected: no website set");
        session.log.push(ChatTurn::assistant(NO_TARGET_MESSAGE));
        session.is_loading = false;
        // The typed question stays in the field so it can be re-sent once a
        // website is entered.
        session.status_message = String::from("No website set");
        return Effect::None;
    }

    session.generation += 1;
    session.status_message = String::from("Waiting for response...");
    let request = QuestionRequest {
        question,
        web_url: session.target_ref.trim().to_string(),
        history: session.history().map(|pair| vec![pair]),
        generation: session.generation,
    };
    info!("Sending question (generation={})", request.generation);
    Effect::SpawnRequest(request)
}

fn resolve(session: &mut Session, generation: u64, outcome: Result<Answer, ServiceError>) {
    if !session.is_loading || generation != session.generation {
        debug!(
            "Dropping stale response (generation={}, current={}, loading={})",
            generation, session.generation, session.is_loading
        );
        return;
    }

    match outcome {
        Ok(answer) => {
            info!("Answer received: {} bytes", answer.text.len());
            session.log.push(ChatTurn::assistant(answer.text));
        }
        Err(e) => {
            // The cause only goes to the log; the user sees the generic turn.
            warn!("Request failed: {}", e);
            session.log.push(ChatTurn::assistant(ERROR_MESSAGE));
        }
    }
    session.status_message = String::from("Ready");
    session.input.clear();
    session.is_loading = false;
}
