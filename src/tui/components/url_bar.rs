//! # UrlBar Component
//!
//! One-line field holding the website the questions are about.
//!
//! The buffer is internal state; every edit is reported as
//! `UrlEvent::Changed` so the parent can forward it to the session as the
//! new target. Enter hands focus back to the question field.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const URL_PLACEHOLDER: &str = "https://example.com";

/// Height of the bar, borders included.
pub const URL_BAR_HEIGHT: u16 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlEvent {
    Changed(String),
    /// Enter: done editing.
    Confirm,
}

#[derive(Debug, Default)]
pub struct UrlBarState {
    pub buffer: String,
}

impl UrlBarState {
    pub fn new(initial: &str) -> Self {
        Self {
            buffer: initial.to_string(),
        }
    }
}

impl EventHandler for UrlBarState {
    type Event = UrlEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                Some(UrlEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Paste(text) => {
                // A URL is a single line
                self.buffer
                    .extend(text.chars().filter(|c| !c.is_control()));
                Some(UrlEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Backspace => self
                .buffer
                .pop()
                .map(|_| UrlEvent::Changed(self.buffer.clone())),
            TuiEvent::Submit | TuiEvent::Newline => Some(UrlEvent::Confirm),
            _ => None,
        }
    }
}

/// Transient renderer for `UrlBarState`.
pub struct UrlBar<'a> {
    pub state: &'a UrlBarState,
    pub focused: bool,
}

impl<'a> UrlBar<'a> {
    pub fn new(state: &'a UrlBarState, focused: bool) -> Self {
        Self { state, focused }
    }
}

impl<'a> Component for UrlBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::DIM)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("Website")
            .padding(Padding::horizontal(1));

        let inner_width = area.width.saturating_sub(4) as usize;
        let paragraph = if self.state.buffer.is_empty() {
            Paragraph::new(URL_PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            // Long URLs scroll so the end stays visible
            let width = self.state.buffer.width();
            let scroll = width.saturating_sub(inner_width.saturating_sub(1)) as u16;
            Paragraph::new(self.state.buffer.as_str())
                .style(Style::default().fg(Color::Cyan))
                .scroll((0, scroll))
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused {
            let col = self.state.buffer.width().min(inner_width.saturating_sub(1)) as u16;
            frame.set_cursor_position((area.x + 2 + col, area.y + 1));
        }
    }
}
