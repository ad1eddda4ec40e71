//! Estimations list view

use super::widgets::{draw_confirm_dialog, page_footer, render_scrollable_list};
use super::format_currency;
use crate::app::App;
use crate::pricing;
use crate::state::{ConfirmDelete, EstimationStatus, FilterInput};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub(super) fn status_color(status: EstimationStatus) -> Color {
    match status {
        EstimationStatus::Created => Color::Blue,
        EstimationStatus::Processing => Color::Cyan,
        EstimationStatus::OnHold => Color::Yellow,
        EstimationStatus::InTransit => Color::Magenta,
        EstimationStatus::Rejected => Color::Red,
    }
}

/// Draw the estimations list
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let total = app.state.estimations.len();

    let block = Block::default()
        .title(" Estimations ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Filter / sort header
            Constraint::Length(1), // Column header
            Constraint::Min(0),    // Rows
            Constraint::Length(1), // Pagination footer
        ])
        .split(block.inner(area));
    frame.render_widget(block, area);

    draw_filter_header(frame, chunks[0], app);
    draw_column_header(frame, chunks[1]);

    if total == 0 {
        let message = Paragraph::new("No estimations found.\nPress 'n' to add an estimation.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(message, chunks[2]);
    } else {
        draw_rows(frame, chunks[2], app);
        let footer = Paragraph::new(page_footer(
            app.state.page,
            app.state.page_count(total),
            total,
        ));
        frame.render_widget(footer, chunks[3]);
    }

    if matches!(app.state.confirm_delete, Some(ConfirmDelete::Estimation(_))) {
        draw_confirm_dialog(frame, area, "Delete this estimation?");
    }
}

fn draw_filter_header(frame: &mut Frame, area: Rect, app: &App) {
    let filters = &app.state.estimation_filters;
    let mut spans = vec![
        Span::styled(
            format!("Sort: {} {}", filters.sort_field.label(), filters.sort_direction.symbol()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" [s]cycle [S]dir", Style::default().fg(Color::DarkGray)),
        Span::raw(" | "),
    ];

    let searching = app.state.filter_input == FilterInput::Search;
    let search_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut search_text = format!("Search: {}", filters.search);
    if searching {
        search_text.push('█');
    }
    spans.push(Span::styled(search_text, search_style));

    spans.push(Span::raw(" | "));
    let status_text = match filters.status {
        Some(status) => format!("Status: {}", status.label()),
        None => "Status: all".to_string(),
    };
    spans.push(Span::styled(status_text, Style::default().fg(Color::Gray)));
    spans.push(Span::styled(" [f]cycle", Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_column_header(frame: &mut Frame, area: Rect) {
    let header = Line::from(Span::styled(
        format!(
            "  {:<8} {:<24.24} {:<26.26} {:<12} {:<12} {:>14}",
            "VERSION", "PROJECT", "CLIENT", "MODIFIED", "STATUS", "TOTAL"
        ),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(header), area);
}

fn draw_rows(frame: &mut Frame, area: Rect, app: &App) {
    let total = app.state.estimations.len();
    let range = app.state.page_range(total);

    let items: Vec<ListItem> = app.state.estimations[range]
        .iter()
        .enumerate()
        .map(|(idx, estimation)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let row_style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            // The row total is recomputed from raw fields, never the cache
            let amount = pricing::estimation_total(&estimation.sections);

            let line = Line::from(vec![
                Span::styled(prefix, row_style),
                Span::styled(format!("{:<8} ", estimation.version), row_style),
                Span::styled(format!("{:<24.24} ", estimation.project), row_style),
                Span::styled(format!("{:<26.26} ", estimation.client), row_style),
                Span::styled(format!("{:<12} ", estimation.last_modified), row_style),
                Span::styled(
                    format!("{:<12} ", estimation.status.label()),
                    row_style.fg(status_color(estimation.status)),
                ),
                Span::styled(
                    format!("{:>14}", format_currency(amount)),
                    row_style.add_modifier(Modifier::BOLD),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items);
    render_scrollable_list(frame, area, list, app.state.selected_index);
}
