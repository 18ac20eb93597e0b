//! # MessageList Component
//!
//! Scrollable view of the message log.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the log (props).
//! Since `Component::render` takes `&mut self`, the layout cache and scroll
//! state are refreshed during the render pass, the same way a ratatui
//! `StatefulWidget` would.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::conversation::{MessageLog, Role};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Whether content exists below the visible window.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.scroll_state.offset().y < self.max_offset()
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub log: &'a MessageLog,
    pub is_loading: bool,
    pub pulse_value: f32,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        log: &'a MessageLog,
        is_loading: bool,
        pulse_value: f32,
    ) -> Self {
        Self {
            state,
            log,
            is_loading,
            pulse_value,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let turns = self.log.turns();

        // 1. Measure whatever the cache can't vouch for
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(turns.len(), content_width);
        layout.heights.truncate(reusable);
        for turn in turns.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(Message::calculate_height(turn, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(turns.len(), content_width);

        let total_height = self.state.layout.total_height();

        // 2. Clamp scroll offset to prevent overscrolling past content
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        // When pinned, cull against where the view is about to land
        let scroll_offset = if self.state.stick_to_bottom {
            total_height.saturating_sub(area.height)
        } else {
            self.state.scroll_state.offset().y
        };
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible turns into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        let last = turns.len().saturating_sub(1);
        for i in visible_range {
            let turn = &turns[i];
            let height = self.state.layout.heights[i];
            // The question being answered is always the last turn while loading
            let pending = self.is_loading && i == last && turn.role == Role::User;
            let pulse = if pending { self.pulse_value } else { 0.0 };

            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(Message::new(turn, pending, pulse), rect);
            y_offset = y_offset.saturating_add(height);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler lives on `MessageListState` because `MessageList` is
/// recreated every frame and can't hold the scroll position.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached per-turn heights.
///
/// The log is append-only, so every cached height stays valid until the
/// width changes.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    turn_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            turn_count: 0,
            content_width: 0,
        }
    }

    pub fn reusable_count(&self, turn_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || turn_count < self.turn_count {
            return 0;
        }
        self.heights.len().min(turn_count)
    }

    pub fn update_metadata(&mut self, turn_count: usize, content_width: u16) {
        self.turn_count = turn_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Indices of turns that intersect the viewport, padded by half a screen.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::ChatTurn;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn cache_with(heights: &[u16], width: u16) -> LayoutCache {
        let mut cache = LayoutCache::new();
        cache.heights = heights.to_vec();
        cache.rebuild_prefix_heights();
        cache.update_metadata(heights.len(), width);
        cache
    }

    #[test]
    fn test_layout_cache_reusable() {
        let cache = cache_with(&[1; 5], 80);

        assert_eq!(cache.reusable_count(5, 80), 5);
        // A new turn only needs its own height measured
        assert_eq!(cache.reusable_count(6, 80), 5);
        // Width changed: everything re-wraps
        assert_eq!(cache.reusable_count(5, 40), 0);
        // Fewer turns than cached means a different log
        assert_eq!(cache.reusable_count(2, 80), 0);
    }

    #[test]
    fn test_visible_range_skips_offscreen_turns() {
        let cache = cache_with(&[10, 10, 10, 10, 10], 80);
        // Viewport rows 30..34, buffered to 28..36
        assert_eq!(cache.visible_range(30, 4), 2..4);
        assert_eq!(cache.visible_range(0, 4), 0..1);
    }

    #[test]
    fn test_scroll_up_detaches_and_bottom_reattaches() {
        let mut state = MessageListState::new();
        state.layout = cache_with(&[10, 10, 10], 80);
        state.viewport_height = 5;
        state.scroll_state.set_offset(Position { x: 0, y: 25 });

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        assert!(state.has_unseen_content());

        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
        assert!(!state.has_unseen_content());
    }

    #[test]
    fn test_scroll_down_past_end_repins() {
        let mut state = MessageListState::new();
        state.layout = cache_with(&[10, 10], 80);
        state.viewport_height = 5;
        state.stick_to_bottom = false;
        state.scroll_state.set_offset(Position { x: 0, y: 15 });

        state.handle_event(&TuiEvent::ScrollDown);
        assert!(state.stick_to_bottom);
        assert_eq!(state.scroll_state.offset().y, 15);
    }

    #[test]
    fn test_render_with_overflowing_heights_does_not_panic() {
        // One content column keeps the u16::MAX-tall scroll buffer small
        let backend = TestBackend::new(2, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut log = MessageLog::new("Hi there!");
        log.push(ChatTurn::user("What is this page about?"));
        log.push(ChatTurn::assistant("It is an example domain."));

        // Cached heights whose running sum exceeds u16::MAX
        let mut state = MessageListState::new();
        state.layout = cache_with(&[u16::MAX - 2, 3, 3], 1);
        state.stick_to_bottom = false;
        state.scroll_state.set_offset(Position { x: 0, y: u16::MAX - 4 });

        terminal
            .draw(|f| {
                MessageList::new(&mut state, &log, false, 0.0).render(f, f.area());
            })
            .unwrap();

        assert_eq!(state.layout.total_height(), u16::MAX);
    }

    #[test]
    fn test_render_shows_latest_turn() {
        let backend = TestBackend::new(40, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut log = MessageLog::new("Hi there!");
        log.push(ChatTurn::user("What is this page about?"));
        log.push(ChatTurn::assistant("It is an example domain."));
        let mut state = MessageListState::new();

        terminal
            .draw(|f| {
                MessageList::new(&mut state, &log, false, 0.0).render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("It is an example domain."));
        assert_eq!(state.layout.heights.len(), 3);
    }
}
