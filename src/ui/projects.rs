//! Projects list view

use super::widgets::{centered_rect, draw_confirm_dialog, page_footer, render_scrollable_list};
use crate::app::App;
use crate::state::{ConfirmDelete, FilterInput, ProjectStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

pub(super) fn status_color(status: ProjectStatus) -> Color {
    match status {
        ProjectStatus::Processing => Color::Cyan,
        ProjectStatus::Completed => Color::Green,
        ProjectStatus::OnHold => Color::Yellow,
        ProjectStatus::InTransit => Color::Magenta,
        ProjectStatus::Rejected => Color::Red,
    }
}

/// Draw the projects list
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let total = app.state.projects.len();

    let block = Block::default()
        .title(" Projects ")
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
        let message = Paragraph::new("No projects found.\nPress 'n' to add a project.")
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

    if let Some(picker) = &app.state.status_picker {
        draw_status_picker(frame, area, picker);
    }
    if matches!(app.state.confirm_delete, Some(ConfirmDelete::Project(_))) {
        draw_confirm_dialog(frame, area, "Delete this project?");
    }
}

fn draw_filter_header(frame: &mut Frame, area: Rect, app: &App) {
    let filters = &app.state.project_filters;
    let mut spans = vec![
        Span::styled(
            format!("Sort: {} {}", filters.sort_field.label(), filters.sort_direction.symbol()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" [s]cycle [S]dir", Style::default().fg(Color::DarkGray)),
        Span::raw(" | "),
    ];

    // Search box
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

    // Due date filter
    spans.push(Span::raw(" | "));
    let dating = app.state.filter_input == FilterInput::DueDate;
    let date_style = if dating {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let date_text = if dating {
        format!("Due: {}█", app.state.due_date_input)
    } else {
        match filters.due_date {
            Some(due) => format!("Due: {due}"),
            None => "Due: any".to_string(),
        }
    };
    spans.push(Span::styled(date_text, date_style));

    // Status filter summary
    spans.push(Span::raw(" | "));
    let status_text = if filters.statuses.is_empty() {
        "Status: all".to_string()
    } else {
        let labels: Vec<&str> = filters.statuses.iter().map(|s| s.label()).collect();
        format!("Status: {}", labels.join(","))
    };
    spans.push(Span::styled(status_text, Style::default().fg(Color::Gray)));
    spans.push(Span::styled(" [f]", Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_column_header(frame: &mut Frame, area: Rect) {
    let header = Line::from(Span::styled(
        format!(
            "  {:<20.20} {:<20.20} {:<18.18} {:<12.12} {:<12} {:<12}",
            "CUSTOMER", "PROJECT NAME", "REF NUMBER", "NUMBER", "DUE DATE", "STATUS"
        ),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(header), area);
}

fn draw_rows(frame: &mut Frame, area: Rect, app: &App) {
    let total = app.state.projects.len();
    let range = app.state.page_range(total);

    let items: Vec<ListItem> = app.state.projects[range]
        .iter()
        .enumerate()
        .map(|(idx, project)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let row_style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            let line = Line::from(vec![
                Span::styled(prefix, row_style),
                Span::styled(format!("{:<20.20} ", project.customer), row_style),
                Span::styled(format!("{:<20.20} ", project.project_name), row_style),
                Span::styled(format!("{:<18.18} ", project.ref_number), row_style),
                Span::styled(format!("{:<12.12} ", project.project_number), row_style),
                Span::styled(format!("{:<12} ", project.due_date), row_style),
                Span::styled(
                    format!("{:<12}", project.status.label()),
                    row_style.fg(status_color(project.status)),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items);
    render_scrollable_list(frame, area, list, app.state.selected_index);
}

fn draw_status_picker(frame: &mut Frame, area: Rect, picker: &crate::state::StatusPicker) {
    let picker_area = centered_rect(30, ProjectStatus::ALL.len() as u16 + 2, area);
    frame.render_widget(Clear, picker_area);

    let items: Vec<ListItem> = ProjectStatus::ALL
        .iter()
        .enumerate()
        .map(|(idx, status)| {
            let mark = if picker.checked[idx] { "[x]" } else { "[ ]" };
            let style = if idx == picker.cursor {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(
                format!("{mark} {}", status.label()),
                style,
            )))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Filter by Status ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(list, picker_area);
}
