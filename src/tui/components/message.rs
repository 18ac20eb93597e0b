use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::conversation::{ChatTurn, Role};
use crate::tui::component::Component;
use crate::tui::markdown;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Pulse intensity above which a pending border turns BOLD.
const PULSE_BOLD_THRESHOLD: f32 = 0.6;
/// Pulse intensity above which a pending border loses its DIM modifier.
const PULSE_NORMAL_THRESHOLD: f32 = 0.2;

/// A single chat turn in a rounded box, titled by who said it.
///
/// Created fresh each frame. `pending` marks the question that is still
/// waiting for its answer; its border breathes with `pulse_intensity`.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub turn: &'a ChatTurn,
    pub pending: bool,
    pub pulse_intensity: f32,
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "apollo",
    }
}

pub fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Green),
        Role::Assistant => Style::default().fg(Color::Blue),
    }
}

impl<'a> Message<'a> {
    pub fn new(turn: &'a ChatTurn, pending: bool, pulse_intensity: f32) -> Self {
        Self {
            turn,
            pending,
            pulse_intensity,
        }
    }

    fn body(turn: &ChatTurn) -> Paragraph<'static> {
        let fg = role_style(turn.role).fg.unwrap_or(Color::Reset);
        Paragraph::new(markdown::render(turn.text.trim(), fg)).wrap(Wrap { trim: false })
    }

    /// Rows this turn needs at `width`, borders included.
    pub fn calculate_height(turn: &ChatTurn, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row.
            return 1;
        }
        if turn.text.trim().is_empty() {
            return VERTICAL_OVERHEAD;
        }
        let lines = Self::body(turn).line_count(content_width) as u16;
        lines.max(1) + VERTICAL_OVERHEAD
    }

    fn border_style(&self) -> Style {
        let base = role_style(self.turn.role);
        if !self.pending {
            return base.add_modifier(Modifier::DIM);
        }
        // Three-phase breathing: DIM → normal → BOLD
        if self.pulse_intensity > PULSE_BOLD_THRESHOLD {
            base.add_modifier(Modifier::BOLD)
        } else if self.pulse_intensity > PULSE_NORMAL_THRESHOLD {
            base
        } else {
            base.add_modifier(Modifier::DIM)
        }
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = self.border_style();
        let title = if self.pending {
            format!("{} · waiting", role_label(self.turn.role))
        } else {
            role_label(self.turn.role).to_string()
        };

        let block = Block::bordered()
            .title(title)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(area);
        block.render(area, buf);
        Self::body(self.turn).render(inner, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn calculate_height_empty_content_returns_border_height() {
        let turn = ChatTurn::user("   \n\t  ");
        assert_eq!(Message::calculate_height(&turn, 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let turn = ChatTurn::user("Hello world");
        assert_eq!(Message::calculate_height(&turn, 0), 1);
        assert_eq!(Message::calculate_height(&turn, HORIZONTAL_OVERHEAD), 1);
    }

    #[test]
    fn calculate_height_single_line_fits() {
        let turn = ChatTurn::assistant("Hello");
        assert_eq!(Message::calculate_height(&turn, 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_counts_markdown_paragraphs() {
        let turn = ChatTurn::assistant("First.\n\nSecond.");
        // "First." | blank | "Second."
        assert_eq!(Message::calculate_height(&turn, 80), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_wraps_long_questions() {
        let turn = ChatTurn::user("Hello world");
        // width 9 → content width 5: "Hello" | "world"
        assert_eq!(Message::calculate_height(&turn, 9), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn questions_render_markdown_like_answers() {
        let question = ChatTurn::user("Is **this** it?\n\nOr that?");
        let answer = ChatTurn::assistant("Is **this** it?\n\nOr that?");
        assert_eq!(Message::calculate_height(&question, 80), 3 + VERTICAL_OVERHEAD);
        assert_eq!(
            Message::calculate_height(&question, 80),
            Message::calculate_height(&answer, 80)
        );

        let backend = TestBackend::new(40, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                Component::render(&mut Message::new(&question, false, 0.0), f, area);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Is this it?"));
        assert!(!text.contains("**"));
        // "this" starts after the left border, padding and "Is "
        assert!(buffer[(5, 1)].modifier.contains(Modifier::BOLD));
        assert!(!buffer[(2, 1)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn pending_border_follows_pulse() {
        let turn = ChatTurn::user("q");
        let calm = Message::new(&turn, true, 0.0).border_style();
        let bright = Message::new(&turn, true, 0.9).border_style();
        assert!(calm.add_modifier.contains(Modifier::DIM));
        assert!(bright.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn settled_border_is_dim_regardless_of_pulse() {
        let turn = ChatTurn::assistant("a");
        let style = Message::new(&turn, false, 0.9).border_style();
        assert!(style.add_modifier.contains(Modifier::DIM));
        assert!(!style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn renders_role_title_and_pending_marker() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let turn = ChatTurn::user("What is this?");

        terminal
            .draw(|f| {
                let area = f.area();
                Component::render(&mut Message::new(&turn, true, 0.5), f, area);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("you · waiting"));
        assert!(text.contains("What is this?"));
    }
}
