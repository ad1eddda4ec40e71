//! Login, register, and forgot-password screens

use super::widgets::centered_rect;
use crate::app::App;
use crate::state::{Form, FormField, FormState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;

/// Draw whichever auth form is active, centered on screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    match &app.form {
        FormState::Login(form) => draw_auth_form(
            frame,
            area,
            "Sign In",
            &[&form.email, &form.password],
            form.active_field(),
        ),
        FormState::Register(form) => draw_auth_form(
            frame,
            area,
            "Create Account",
            &[&form.name, &form.email, &form.password],
            form.active_field(),
        ),
        FormState::ForgotPassword(form) => draw_auth_form(
            frame,
            area,
            "Forgot Password",
            &[&form.email],
            form.active_field(),
        ),
        _ => {}
    }
}

fn draw_auth_form(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    fields: &[&FormField],
    active: usize,
) {
    let box_height = fields.len() as u16 * FIELD_HEIGHT + 4;
    let dialog_area = centered_rect(48, box_height, area);

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let mut constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (idx, field) in fields.iter().enumerate() {
        draw_field(frame, chunks[idx], field, idx == active);
    }

    // Brand footer
    let footer = Paragraph::new(Line::from(Span::styled(
        "estima",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
    .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(footer, chunks[fields.len()]);
}

/// Bordered single-line input; the active field gets a cyan border and cursor
pub(super) fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut value = field.display_value();
    if is_active {
        value.push('█');
    }

    let widget = Paragraph::new(value).block(
        Block::default()
            .title(format!(" {} ", field.label))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(widget, area);
}
