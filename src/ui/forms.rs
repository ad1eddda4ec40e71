//! Project and estimation create/edit forms

use super::auth::draw_field;
use super::format_currency;
use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::state::{
    EstimationFocus, EstimationForm, Form, FormField, FormState, ItemColumn, ProjectForm,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the project create/edit form
pub fn draw_project_form(frame: &mut Frame, area: Rect, app: &App) {
    let FormState::Project(form) = &app.form else {
        return;
    };

    let title = if form.id.is_some() {
        " Edit Project "
    } else {
        " Add New Project "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items: Vec<ListItem> = (0..form.field_count())
        .map(|idx| ListItem::new(project_form_line(form, idx)))
        .collect();

    let list = List::new(items);
    render_scrollable_list(frame, inner, list, form.active_field());
}

fn project_form_line(form: &ProjectForm, idx: usize) -> Line<'static> {
    let is_active = idx == form.active_field();
    let label_style = if is_active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    match form.get_field(idx) {
        Some(field) => {
            let mut value = field.display_value();
            if is_active {
                value.push('█');
            }
            Line::from(vec![
                Span::styled(format!("{:<24}", field.label), label_style),
                Span::raw(value),
            ])
        }
        // The status selector row
        None => Line::from(vec![
            Span::styled(format!("{:<24}", "Status"), label_style),
            Span::styled(
                form.status.label().to_string(),
                Style::default().fg(super::projects::status_color(form.status)),
            ),
            Span::styled(
                if is_active { "  ◂ Space ▸" } else { "" },
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    }
}

/// Draw the estimation create/edit form with its section/item editor
pub fn draw_estimation_form(frame: &mut Frame, area: Rect, app: &App) {
    let FormState::Estimation(form) = &app.form else {
        return;
    };

    let title = if form.id.is_some() {
        " Edit Estimates "
    } else {
        " Add New Estimates "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let error_lines = form.errors.len().min(3) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // Header fields
            Constraint::Min(0),                  // Sections and items
            Constraint::Length(3 + error_lines), // Summary panel
        ])
        .split(inner);

    draw_header_fields(frame, chunks[0], form);
    draw_sections(frame, chunks[1], form);
    draw_summary(frame, chunks[2], form);
}

fn draw_header_fields(frame: &mut Frame, area: Rect, form: &EstimationForm) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(area);

    draw_field(
        frame,
        columns[0],
        &form.project,
        form.focus == EstimationFocus::Project,
    );
    draw_field(
        frame,
        columns[1],
        &form.client,
        form.focus == EstimationFocus::Client,
    );

    // Status selector
    let status_active = form.focus == EstimationFocus::Status;
    let border_style = if status_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let status = Paragraph::new(Line::from(vec![
        Span::styled(
            form.status.label().to_string(),
            Style::default().fg(super::estimations::status_color(form.status)),
        ),
        Span::styled(
            if status_active { " ◂▸" } else { "" },
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .title(" Status ")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(status, columns[2]);

    let version = Paragraph::new(form.version.clone()).block(
        Block::default()
            .title(" Version ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(version, columns[3]);
}

/// Render a cell with fixed width, highlighting the focused one
fn cell(field: &FormField, width: usize, focused: bool) -> Span<'static> {
    let mut text = field.display_value();
    if focused {
        text.push('█');
    }
    let style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Span::styled(format!("{:<width$.width$} ", text, width = width), style)
}

fn draw_sections(frame: &mut Frame, area: Rect, form: &EstimationForm) {
    let mut lines: Vec<Line> = Vec::new();
    let mut focused_line = 0usize;

    for (s_idx, section) in form.sections.iter().enumerate() {
        // Section header
        let name_focused = form.focus == EstimationFocus::SectionName(s_idx);
        if name_focused {
            focused_line = lines.len();
        }
        let mut name = section.name.display_value();
        if name_focused {
            name.push('█');
        }
        let section_total: f64 = section.items.iter().map(|i| i.to_item().total).sum();
        lines.push(Line::from(vec![
            Span::styled(
                format!("▪ {name}"),
                if name_focused {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                },
            ),
            Span::styled(
                format!("  {}", format_currency(section_total)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        // Column captions
        lines.push(Line::from(Span::styled(
            format!(
                "    {:<16} {:<18} {:<6} {:<8} {:<10} {:<8} {:>12}",
                "ITEM", "DESCRIPTION", "UNIT", "QTY", "PRICE", "MARGIN%", "TOTAL"
            ),
            Style::default().fg(Color::DarkGray),
        )));

        for (i_idx, item) in section.items.iter().enumerate() {
            let focus_col = match form.focus {
                EstimationFocus::Item(s, i, column) if s == s_idx && i == i_idx => Some(column),
                _ => None,
            };
            if focus_col.is_some() {
                focused_line = lines.len();
            }

            let widths = [
                (ItemColumn::Title, 16),
                (ItemColumn::Description, 18),
                (ItemColumn::Unit, 6),
                (ItemColumn::Quantity, 8),
                (ItemColumn::Price, 10),
                (ItemColumn::Margin, 8),
            ];
            let mut spans = vec![Span::raw("    ")];
            for (column, width) in widths {
                spans.push(cell(item.field(column), width, focus_col == Some(column)));
            }
            spans.push(Span::styled(
                format!("{:>12}", format_currency(item.total)),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
    }

    let items: Vec<ListItem> = lines.into_iter().map(ListItem::new).collect();
    let list = List::new(items);
    render_scrollable_list(frame, area, list, focused_line);
}

fn draw_summary(frame: &mut Frame, area: Rect, form: &EstimationForm) {
    // Recomputed from the raw fields on every draw
    let summary = form.summary();

    let mut lines = vec![Line::from(vec![
        Span::styled("Sub Total: ", Style::default().fg(Color::Gray)),
        Span::raw(format_currency(summary.sub_total)),
        Span::styled("    Margin: ", Style::default().fg(Color::Gray)),
        Span::raw(format_currency(summary.margin_total)),
        Span::styled("    Total: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format_currency(summary.grand_total),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ])];

    for error in form.errors.iter().take(3) {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(panel, area);
}
