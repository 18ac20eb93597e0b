//! # TitleBar Component
//!
//! Single-line bar at the top of the screen.
//!
//! Purely presentational: the status comes from the session, the "↓ New"
//! hint from the message list's scroll position. Formats, in priority order:
//!
//! 1. `"Apollo · example.com | Waiting for response... | ↓ New"`
//! 2. `"Apollo · example.com | Ready"`
//! 3. `"Apollo | Ready"` when no website is set

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

pub struct TitleBar {
    /// Website being asked about; blank when unset.
    pub target: String,
    pub status_message: String,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(target: String, status_message: String, has_unseen_content: bool) -> Self {
        Self {
            target,
            status_message,
            has_unseen_content,
        }
    }

    fn text(&self) -> String {
        let mut title = String::from("Apollo");
        let target = self.target.trim();
        if !target.is_empty() {
            title.push_str(" · ");
            title.push_str(target);
        }
        if !self.status_message.is_empty() {
            title.push_str(" | ");
            title.push_str(&self.status_message);
        }
        if self.has_unseen_content {
            title.push_str(" | ↓ New");
        }
        title
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default().add_modifier(Modifier::BOLD);
        frame.render_widget(Span::styled(self.text(), style), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
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
    fn test_title_bar_with_unseen_content() {
        let mut title_bar = TitleBar::new(
            "https://example.com".to_string(),
            "Waiting for response...".to_string(),
            true,
        );
        let text = rendered(&mut title_bar);

        assert!(text.contains("Apollo · https://example.com"));
        assert!(text.contains("Waiting for response..."));
        assert!(text.contains("↓ New"));
    }

    #[test]
    fn test_title_bar_without_target() {
        let mut title_bar = TitleBar::new("  ".to_string(), "Ready".to_string(), false);
        assert_eq!(title_bar.text(), "Apollo | Ready");
        assert!(!rendered(&mut title_bar).contains("↓ New"));
    }

    #[test]
    fn test_title_bar_no_status() {
        let title_bar = TitleBar::new("example.com".to_string(), String::new(), false);
        assert_eq!(title_bar.text(), "Apollo · example.com");
    }
}
