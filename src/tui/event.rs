use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

use crate::core::input::Key;

/// Terminal input, translated into the few things Apollo cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    Submit,
    /// Shift+Enter or Ctrl+J.
    Newline,
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    /// Tab / Shift+Tab: move between the website and question fields.
    SwitchFocus,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToBottom, // End key - also re-enables stick-to-bottom
    Resize,
}

impl TuiEvent {
    /// The question-field key this event stands for, if any.
    pub fn as_key(&self) -> Option<Key> {
        match self {
            TuiEvent::Submit => Some(Key::Enter { shift: false }),
            TuiEvent::Newline => Some(Key::Enter { shift: true }),
            TuiEvent::InputChar(c) => Some(Key::Char(*c)),
            TuiEvent::Paste(text) => Some(Key::Paste(text.clone())),
            TuiEvent::Backspace => Some(Key::Backspace),
            _ => None,
        }
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).unwrap_or(false) {
        return None;
    }
    match event::read() {
        Ok(ev) => translate(ev),
        Err(e) => {
            log::warn!("Failed to read terminal event: {}", e);
            None
        }
    }
}

fn translate(ev: Event) -> Option<TuiEvent> {
    match ev {
        Event::Key(key_event) => {
            // Keyboard enhancement reports releases too; only presses edit text.
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
                // Ctrl+J inserts newline (ASCII LF; fallback where Shift+Enter is not reported)
                (KeyModifiers::CONTROL, KeyCode::Char('j')) => Some(TuiEvent::Newline),
                (m, KeyCode::Enter) if m.contains(KeyModifiers::SHIFT) => Some(TuiEvent::Newline),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                    Some(TuiEvent::InputChar(c))
                }
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Tab | KeyCode::BackTab) => Some(TuiEvent::SwitchFocus),
                (_, KeyCode::Esc) => Some(TuiEvent::Quit),
                (_, KeyCode::Up) => Some(TuiEvent::ScrollUp),
                (_, KeyCode::Down) => Some(TuiEvent::ScrollDown),
                (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
                (_, KeyCode::End) => Some(TuiEvent::ScrollToBottom),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
