//! Field rendering utilities for forms

use crate::state::{FieldCheck, FormField, Tone};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Field box height in rows
pub const FIELD_HEIGHT: u16 = 3;

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Neutral => Color::Gray,
        Tone::Success => Color::Green,
        Tone::Danger => Color::Red,
    }
}

/// Draw a form field using FormField from the domain layer
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let border_style = if field.is_invalid() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = field.display_value();
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_str, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Rows needed to show the given messages; a message may span several lines
pub fn message_height(messages: &[&FieldCheck]) -> u16 {
    let lines: usize = messages.iter().map(|check| check.message.lines().count()).sum();
    u16::try_from(lines).unwrap_or(u16::MAX)
}

/// Draw the messages under a field, coloured by tone
pub fn draw_messages(frame: &mut Frame, area: Rect, messages: &[&FieldCheck]) {
    let lines: Vec<Line> = messages
        .iter()
        .flat_map(|check| {
            let style = Style::default().fg(tone_color(check.tone));
            check
                .message
                .lines()
                .map(move |line| Line::from(Span::styled(format!(" {line}"), style)))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}
