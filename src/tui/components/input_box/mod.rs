//! # InputBox Component
//!
//! Draws the question field. The text itself lives in the core
//! `InputField` and every edit goes through `core::update`, so this
//! component only handles presentation: wrapping, the placeholder, the
//! character counter, and the caret.
//!
//! Edits only ever append, so the caret always sits at the end of the text
//! and the box scrolls to keep the last lines visible.

mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::input::{InputField, MAX_INPUT_CHARS};
use crate::tui::component::Component;

use text_wrap::{
    CONTENT_OFFSET, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, end_column, inner_width,
    wrap_line_count, wrapped_lines,
};

pub const PLACEHOLDER: &str = "Type your question...";
pub const LOCKED_PLACEHOLDER: &str = "Waiting for response...";

/// Question field renderer.
///
/// # Props
///
/// - `field`: the current pending input
/// - `focused`: whether keystrokes go here (shows the caret)
/// - `locked`: a question is in flight; the field is read-only
pub struct InputBox<'a> {
    pub field: &'a InputField,
    pub focused: bool,
    pub locked: bool,
}

impl<'a> InputBox<'a> {
    pub fn new(field: &'a InputField, focused: bool, locked: bool) -> Self {
        Self {
            field,
            focused,
            locked,
        }
    }

    /// Height needed for `field` at `width`, clamped to the visible maximum.
    pub fn calculate_height(field: &InputField, width: u16) -> u16 {
        let lines = wrap_line_count(field.text(), inner_width(width));
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn counter(&self) -> String {
        format!("{}/{}", self.field.char_count(), MAX_INPUT_CHARS)
    }

    fn border_style(&self) -> Style {
        if self.locked {
            Style::default().fg(Color::DarkGray)
        } else if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
        }
    }
}

impl<'a> Component for InputBox<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        let border_style = self.border_style();

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("Question")
            .title_bottom(Line::from(self.counter()).right_aligned())
            .padding(Padding::horizontal(1));

        let hint = Style::default().fg(Color::DarkGray);
        let paragraph = if self.locked {
            Paragraph::new(LOCKED_PLACEHOLDER).style(hint)
        } else if self.field.is_empty() {
            Paragraph::new(PLACEHOLDER).style(hint)
        } else {
            // Keep the tail of the text in view
            let lines = wrapped_lines(self.field.text(), width);
            let skip = lines.len().saturating_sub(MAX_VISIBLE_LINES as usize);
            Paragraph::new(lines[skip..].join("\n")).style(Style::default().fg(Color::Green))
        };

        frame.render_widget(paragraph.block(block), area);

        if self.focused && !self.locked {
            let visible = wrap_line_count(self.field.text(), width).min(MAX_VISIBLE_LINES);
            let x = area.x + CONTENT_OFFSET + end_column(self.field.text(), width);
            let y = area.y + visible; // top border + (visible - 1)
            frame.set_cursor_position((x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::Key;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn field(text: &str) -> InputField {
        let mut f = InputField::default();
        f.set_text(text);
        f
    }

    fn render_to_string(field: &InputField, focused: bool, locked: bool) -> String {
        let backend = TestBackend::new(40, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                InputBox::new(field, focused, locked).render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_empty_field_shows_placeholder() {
        let text = render_to_string(&InputField::default(), true, false);
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains("0/512"));
    }

    #[test]
    fn test_locked_field_shows_waiting_hint() {
        let text = render_to_string(&InputField::default(), true, true);
        assert!(text.contains(LOCKED_PLACEHOLDER));
    }

    #[test]
    fn test_locked_field_hides_pending_question() {
        let text = render_to_string(&field("What is this page about?"), true, true);
        assert!(text.contains(LOCKED_PLACEHOLDER));
        assert!(!text.contains("What is this page about?"));

        let text = render_to_string(&field("What is this page about?"), true, false);
        assert!(!text.contains(LOCKED_PLACEHOLDER));
        assert!(text.contains("What is this page about?"));
    }

    #[test]
    fn test_counter_tracks_characters() {
        let mut f = InputField::default();
        f.handle_key(&Key::Paste("héllo".into()), false);
        let text = render_to_string(&f, true, false);
        assert!(text.contains("héllo"));
        assert!(text.contains("5/512"));
    }

    #[test]
    fn test_height_grows_then_caps() {
        assert_eq!(InputBox::calculate_height(&field("one line"), 40), 3);
        assert_eq!(InputBox::calculate_height(&field("a\nb\nc"), 40), 5);
        let tall = "x\n".repeat(20);
        assert_eq!(
            InputBox::calculate_height(&field(&tall), 40),
            MAX_VISIBLE_LINES + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn test_cursor_sits_after_text() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let f = field("abc");
        terminal
            .draw(|frame| {
                InputBox::new(&f, true, false).render(frame, frame.area());
            })
            .unwrap();
        let pos = terminal.get_cursor_position().unwrap();
        assert_eq!((pos.x, pos.y), (CONTENT_OFFSET + 3, 1));
    }
}
