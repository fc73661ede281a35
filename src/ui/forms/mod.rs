//! Form rendering module
//!
//! Every form is drawn the same way from the [`Form`] trait: one box per
//! field, its messages underneath, an optional notice, then the submit
//! button.

mod field_renderer;

use crate::state::{Form, FormPhase};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use field_renderer::{draw_field, draw_messages, message_height, FIELD_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Widest a form is drawn
const MAX_FORM_WIDTH: u16 = 64;

/// Draw a form centred in the given area
pub fn draw_form(frame: &mut Frame, area: Rect, form: &dyn Form) {
    let area = centered(area, MAX_FORM_WIDTH);
    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let submit_index = form.submit_index();
    let notice_height = u16::from(form.notice().is_some());

    let mut constraints = Vec::with_capacity(submit_index * 2 + 3);
    for index in 0..submit_index {
        constraints.push(Constraint::Length(FIELD_HEIGHT));
        constraints.push(Constraint::Length(message_height(&form.messages(index))));
    }
    constraints.push(Constraint::Length(notice_height));
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(inner);

    let active = form.active_field();
    for index in 0..submit_index {
        if let Some(field) = form.get_field(index) {
            draw_field(frame, chunks[index * 2], field, active == index);
        }
        draw_messages(frame, chunks[index * 2 + 1], &form.messages(index));
    }

    let notice_area = chunks[submit_index * 2];
    if let Some(notice) = form.notice() {
        let paragraph =
            Paragraph::new(Line::from(format!(" {notice}"))).style(Style::default().fg(Color::Red));
        frame.render_widget(paragraph, notice_area);
    }

    let label = match form.phase() {
        FormPhase::Submitting => "Sending...",
        FormPhase::Validating => "Checking...",
        FormPhase::Editing | FormPhase::Submittable => form.submit_label(),
    };
    let button_area = chunks[submit_index * 2 + 1];
    let button_area = Rect {
        width: button_area.width.min(24),
        ..button_area
    };
    render_button(
        frame,
        button_area,
        label,
        form.is_submit_active(),
        form.can_submit(),
    );
}

fn centered(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
