//! Result panel showing the last prediction or error

use crate::app::App;
use crate::state::forms::SubmitStatus;
use crate::state::{Classification, ErrorKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines: Vec<Line> = match form.status() {
        SubmitStatus::Idle => vec![
            Line::from("Fill in all fields, then press"),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::raw(" to request a prediction."),
            ]),
        ],
        SubmitStatus::Submitting => vec![Line::from(Span::styled(
            "Waiting for the prediction service...",
            Style::default().fg(Color::Yellow),
        ))],
        SubmitStatus::Succeeded => match form.result() {
            Some(classification) => {
                let color = match classification {
                    Classification::Positive => Color::Red,
                    Classification::Negative => Color::Green,
                };
                vec![
                    Line::from(Span::styled(
                        classification.label(),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("Class {}", classification.class_number()),
                        dim,
                    )),
                ]
            }
            None => Vec::new(),
        },
        SubmitStatus::Failed => match form.error() {
            Some(error) => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        error.kind.to_string(),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(error.message.as_str()),
                ];
                if error.kind == ErrorKind::ValidationError {
                    lines.extend(error.field_violations.iter().map(|(id, violation)| {
                        Line::from(vec![
                            Span::styled(format!("{id}: "), Style::default().fg(Color::Red)),
                            Span::raw(violation.to_string()),
                        ])
                    }));
                }
                lines
            }
            None => Vec::new(),
        },
    };

    if let Some(at) = form.completed_at() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("at {}", at.format("%H:%M:%S")),
            dim,
        )));
    }

    let block = Block::default()
        .title(" Result ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
