//! Reusable UI widget helpers

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListState, Paragraph},
    Frame,
};

/// Render a scrollable list that automatically keeps the selected item visible.
///
/// This is the preferred way to render lists in the app. It wraps
/// `render_stateful_widget` with a `ListState`, ensuring the list scrolls to
/// keep the selected item in view.
pub fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected_index: usize) {
    let mut list_state = ListState::default().with_selected(Some(selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Centered rectangle of the given size, clamped to the parent area
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Modal yes/no confirmation dialog
pub fn draw_confirm_dialog(frame: &mut Frame, area: Rect, message: &str) {
    let dialog_area = centered_rect((message.len() as u16 + 6).max(30), 5, area);
    frame.render_widget(Clear, dialog_area);

    let dialog = Paragraph::new(vec![
        Line::from(Span::raw(message)),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" delete    "),
            Span::styled("[n]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ]),
    ])
    .alignment(ratatui::layout::Alignment::Center)
    .block(
        Block::default()
            .title(" Confirm ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(dialog, dialog_area);
}

/// One-line "Page X of Y (N records)" footer
pub fn page_footer(page: usize, page_count: usize, total: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("Page {} of {}", page + 1, page_count),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("  ({total} records)"),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled("  h/l:page", Style::default().fg(Color::DarkGray)),
    ])
}
