//! Dashboard view: stat cards and recent estimations

use super::format_currency;
use crate::app::App;
use crate::pricing;
use crate::state::ProjectStatus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the dashboard
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Stat cards
            Constraint::Min(0),    // Recent estimations
        ])
        .split(area);

    draw_stat_cards(frame, chunks[0], app);
    draw_recent_estimations(frame, chunks[1], app);
}

fn draw_stat_cards(frame: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let total_projects = app.state.projects.len();
    let active_projects = app
        .state
        .projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Processing)
        .count();
    let total_estimations = app.state.estimations.len();
    // Revenue always recomputes from raw item fields
    let total_revenue: f64 = app
        .state
        .estimations
        .iter()
        .map(|e| pricing::estimation_total(&e.sections))
        .sum();

    draw_card(frame, cards[0], "Total Projects", &total_projects.to_string());
    draw_card(
        frame,
        cards[1],
        "Active Projects",
        &active_projects.to_string(),
    );
    draw_card(
        frame,
        cards[2],
        "Total Estimations",
        &total_estimations.to_string(),
    );
    draw_card(
        frame,
        cards[3],
        "Total Revenue",
        &format_currency(total_revenue),
    );
}

/// Draw a single stat card
fn draw_card(frame: &mut Frame, area: Rect, title: &str, value: &str) {
    let card = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(ratatui::layout::Alignment::Center)
    .block(
        Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(card, area);
}

fn draw_recent_estimations(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Recent Estimations ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if app.state.estimations.is_empty() {
        let message = Paragraph::new("No estimations yet.\nPress 3 to open the estimations list.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let mut recent: Vec<_> = app.state.estimations.iter().collect();
    recent.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

    let items: Vec<ListItem> = recent
        .iter()
        .take(5)
        .map(|estimation| {
            let total = pricing::estimation_total(&estimation.sections);
            let line = Line::from(vec![
                Span::styled(
                    format!("{:<8}", estimation.version),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(format!("{:<28.28}", estimation.project)),
                Span::styled(
                    format!("{:<12}", estimation.status.label()),
                    Style::default().fg(super::estimations::status_color(estimation.status)),
                ),
                Span::styled(
                    format!("{:>14}", format_currency(total)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("   modified {}", estimation.last_modified),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
