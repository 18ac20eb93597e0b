//! # Input Field
//!
//! Owns the question being typed and decides what each key does with it.
//!
//! ```text
//! Enter        + text   → Submit (no newline)
//! Shift+Enter  + text   → newline
//! Enter / Shift+Enter, empty → Suppressed (nothing inserted)
//! anything while locked → Locked
//! ```
//!
//! Whether a submit actually sends anything is decided by the session
//! controller; this module only reports the trigger.

/// Maximum number of characters the question field accepts.
pub const MAX_INPUT_CHARS: usize = 512;

/// Key presses the field understands, already stripped of terminal details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Paste(String),
    Enter { shift: bool },
    Backspace,
}

/// What a key press did to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Buffer changed.
    Edited,
    /// Enter on a non-empty buffer: the caller should submit.
    Submit,
    /// Key swallowed without effect (Enter on empty, full buffer, nothing to delete).
    Suppressed,
    /// Field is disabled while a request is in flight.
    Locked,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    text: String,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Replaces the buffer, truncating to [`MAX_INPUT_CHARS`].
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().take(MAX_INPUT_CHARS).collect();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn handle_key(&mut self, key: &Key, locked: bool) -> KeyOutcome {
        if locked {
            return KeyOutcome::Locked;
        }
        match key {
            Key::Enter { .. } if self.text.is_empty() => KeyOutcome::Suppressed,
            Key::Enter { shift: false } => KeyOutcome::Submit,
            Key::Enter { shift: true } => self.insert('\n'),
            Key::Char(c) => self.insert(*c),
            Key::Paste(pasted) => {
                let room = MAX_INPUT_CHARS.saturating_sub(self.char_count());
                if room == 0 || pasted.is_empty() {
                    return KeyOutcome::Suppressed;
                }
                self.text.extend(pasted.chars().take(room));
                KeyOutcome::Edited
            }
            Key::Backspace => match self.text.pop() {
                Some(_) => KeyOutcome::Edited,
                None => KeyOutcome::Suppressed,
            },
        }
    }

    fn insert(&mut self, c: char) -> KeyOutcome {
        if self.char_count() >= MAX_INPUT_CHARS {
            return KeyOutcome::Suppressed;
        }
        self.text.push(c);
        KeyOutcome::Edited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputField {
        let mut field = InputField::new();
        field.set_text(text);
        field
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = InputField::new();
        assert_eq!(field.handle_key(&Key::Char('h'), false), KeyOutcome::Edited);
        assert_eq!(field.handle_key(&Key::Char('i'), false), KeyOutcome::Edited);
        assert_eq!(field.text(), "hi");

        assert_eq!(field.handle_key(&Key::Backspace, false), KeyOutcome::Edited);
        assert_eq!(field.text(), "h");
    }

    #[test]
    fn test_backspace_on_empty_is_suppressed() {
        let mut field = InputField::new();
        assert_eq!(field.handle_key(&Key::Backspace, false), KeyOutcome::Suppressed);
    }

    #[test]
    fn test_enter_with_text_submits_without_newline() {
        let mut field = typed("question");
        assert_eq!(field.handle_key(&Key::Enter { shift: false }, false), KeyOutcome::Submit);
        assert_eq!(field.text(), "question");
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let mut field = typed("line one");
        assert_eq!(field.handle_key(&Key::Enter { shift: true }, false), KeyOutcome::Edited);
        assert_eq!(field.text(), "line one\n");
    }

    #[test]
    fn test_enter_on_empty_does_nothing() {
        let mut field = InputField::new();
        assert_eq!(field.handle_key(&Key::Enter { shift: false }, false), KeyOutcome::Suppressed);
        assert_eq!(field.handle_key(&Key::Enter { shift: true }, false), KeyOutcome::Suppressed);
        assert!(field.is_empty());
    }

    #[test]
    fn test_whitespace_only_still_reports_submit() {
        // The session controller owns the blank-submission guard.
        let mut field = typed("   ");
        assert_eq!(field.handle_key(&Key::Enter { shift: false }, false), KeyOutcome::Submit);
    }

    #[test]
    fn test_locked_field_rejects_everything() {
        let mut field = typed("pending");
        for key in [
            Key::Char('x'),
            Key::Paste("more".to_string()),
            Key::Enter { shift: false },
            Key::Enter { shift: true },
            Key::Backspace,
        ] {
            assert_eq!(field.handle_key(&key, true), KeyOutcome::Locked);
        }
        assert_eq!(field.text(), "pending");
    }

    #[test]
    fn test_char_rejected_at_limit() {
        let mut field = typed(&"a".repeat(MAX_INPUT_CHARS));
        assert_eq!(field.handle_key(&Key::Char('b'), false), KeyOutcome::Suppressed);
        assert_eq!(field.char_count(), MAX_INPUT_CHARS);
    }

    #[test]
    fn test_paste_truncated_to_limit() {
        let mut field = typed(&"a".repeat(MAX_INPUT_CHARS - 3));
        let outcome = field.handle_key(&Key::Paste("bcdef".to_string()), false);
        assert_eq!(outcome, KeyOutcome::Edited);
        assert_eq!(field.char_count(), MAX_INPUT_CHARS);
        assert!(field.text().ends_with("bcd"));
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let field = typed(&"é".repeat(MAX_INPUT_CHARS + 10));
        assert_eq!(field.char_count(), MAX_INPUT_CHARS);
    }
}
