use crate::core::state::Session;
use crate::tui::component::Component;
use crate::tui::components::{
    InputBox, MessageList, TitleBar, URL_BAR_HEIGHT, UrlBar,
};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

/// Split the screen into title, website, messages and question areas.
pub fn layout_areas(area: Rect, input_height: u16) -> [Rect; 4] {
    use Constraint::{Length, Min};
    Layout::vertical([
        Length(1),
        Length(URL_BAR_HEIGHT),
        Min(0),
        Length(input_height),
    ])
    .areas(area)
}

pub fn draw_ui(frame: &mut Frame, session: &Session, tui: &mut TuiState) {
    let area = frame.area();
    let input_height = InputBox::calculate_height(&session.input, area.width);
    let [title_area, url_area, main_area, input_area] = layout_areas(area, input_height);

    MessageList::new(
        &mut tui.message_list,
        &session.log,
        session.is_loading,
        tui.pulse_value,
    )
    .render(frame, main_area);

    // After the list so the unseen hint reflects this frame's scroll position
    TitleBar::new(
        session.target_ref.clone(),
        session.status_message.clone(),
        tui.message_list.has_unseen_content(),
    )
    .render(frame, title_area);

    UrlBar::new(&tui.url_bar, tui.focus == Focus::Website).render(frame, url_area);

    InputBox::new(
        &session.input,
        tui.focus == Focus::Question,
        session.is_loading,
    )
    .render(frame, input_area);
}
