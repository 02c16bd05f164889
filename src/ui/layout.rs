//! Layout components (form area, side panel, status bar)

use crate::app::App;
use crate::state::forms::SubmitStatus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of the side panel holding actions and the result
pub const SIDE_PANEL_WIDTH: u16 = 34;

/// Areas of the single application screen
pub struct ScreenLayout {
    pub form: Rect,
    pub side: Rect,
    pub status: Rect,
}

/// Split the screen into form, side panel and status bar
pub fn create_layout(area: Rect) -> ScreenLayout {
    // Reserve bottom line for status bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),                   // Form area
            Constraint::Length(SIDE_PANEL_WIDTH), // Actions and result
        ])
        .split(rows[0]);

    ScreenLayout {
        form: columns[0],
        side: columns[1],
        status: rows[1],
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Request indicator
    let indicator = match app.state.form.status() {
        SubmitStatus::Submitting => Span::styled(" ◌ ", Style::default().fg(Color::Yellow)),
        SubmitStatus::Failed => Span::styled(" ● ", Style::default().fg(Color::Red)),
        SubmitStatus::Succeeded => Span::styled(" ● ", Style::default().fg(Color::Green)),
        SubmitStatus::Idle => Span::styled(" ○ ", Style::default().fg(Color::Gray)),
    };
    spans.push(indicator);

    let hints = if app.state.current_error().is_some() {
        "Enter/Esc:dismiss"
    } else if app.state.is_action_panel_active() {
        "Tab:fields  j/k:button  Enter:press  ^L:sample  ^R:clear"
    } else {
        "Tab:next  Enter:predict  ^L:sample  ^R:clear"
    };
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Cyan)));
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        app.endpoint.as_str(),
        Style::default().fg(Color::Blue),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Render quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}
