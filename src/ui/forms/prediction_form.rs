//! Prediction form rendering (input grid and action panel)

use super::field_renderer::draw_field;
use crate::app::App;
use crate::state::forms::{all_fields, FIELD_COUNT};
use crate::state::ActionButton;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Minimum width of one input column
const MIN_COLUMN_WIDTH: u16 = 34;

/// Input row height (top border + value + bottom border)
const FIELD_HEIGHT: u16 = 3;

/// Number of input columns that fit in `width`
pub fn form_columns(width: u16) -> usize {
    ((width / MIN_COLUMN_WIDTH) as usize).clamp(1, 3)
}

/// Draw every schema field as a grid of inputs, in Tab order
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let form_focused = !app.state.is_action_panel_active();
    let border_color = if form_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Patient measurements ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = form_columns(inner.width);
    let rows = FIELD_COUNT.div_ceil(columns);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            std::iter::repeat(Constraint::Length(FIELD_HEIGHT))
                .take(rows)
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(inner);

    let form = &app.state.form;
    let error = form.error();

    for (index, definition) in all_fields().iter().enumerate() {
        let row_area = row_areas[index / columns];
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(row_area);

        let violation = error.and_then(|e| e.violation_for(definition.id));
        draw_field(
            frame,
            cells[index % columns],
            definition,
            form.value(definition.id),
            app.state.active_form_field == index,
            violation.as_deref(),
        );
    }
}

/// Draw the action panel with its buttons
pub fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.state.is_action_panel_active();
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let submitting = app.state.form.is_submitting();

    for (i, button) in ActionButton::ALL.iter().enumerate() {
        let y = inner_area.y + i as u16 * BUTTON_HEIGHT;
        if y + BUTTON_HEIGHT > inner_area.y + inner_area.height {
            break;
        }
        let button_area = Rect {
            x: inner_area.x,
            y,
            width: inner_area.width,
            height: BUTTON_HEIGHT,
        };

        let (label, enabled) = match button {
            ActionButton::Submit if submitting => ("Predicting...", false),
            other => (other.label(), true),
        };
        let is_selected = is_focused && app.state.selected_button == *button;
        render_button(frame, button_area, label, is_selected, enabled);
    }
}
