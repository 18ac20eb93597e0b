use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// Something that can draw itself into a region of the frame.
///
/// Props are struct fields set by the parent; `render` takes `&mut self` so
/// stateful components can refresh caches (scroll bounds, measured heights)
/// during the draw pass.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to terminal events and reports what happened.
pub trait EventHandler {
    /// The high-level event this component emits.
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
