//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod result_panel;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Rows reserved for the action panel (three buttons plus borders)
const ACTION_PANEL_HEIGHT: u16 = 3 * components::BUTTON_HEIGHT + 2;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let screen = layout::create_layout(frame.area());

    forms::draw_form(frame, screen.form, app);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ACTION_PANEL_HEIGHT),
            Constraint::Min(0),
        ])
        .split(screen.side);
    forms::draw_action_panel(frame, side[0], app);
    result_panel::draw(frame, side[1], app);

    layout::draw_status_bar(frame, screen.status, app);

    // Remote errors are shown on top of everything else
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    }
}
