//! Layout components (sidebar, status bar)

use crate::app::App;
use crate::state::{FilterInput, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Sidebar items
const SIDEBAR_ITEMS: &[&str] = &["Dashboard", "Projects", "Estimations"];
const BUTTON_HEIGHT: u16 = 3;

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Sidebar content
            Constraint::Length(1), // Status bar continuation
        ])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Create full-width layout without sidebar (for the auth screens)
pub fn create_layout_no_sidebar(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Dashboard
            Constraint::Length(BUTTON_HEIGHT), // Projects
            Constraint::Length(BUTTON_HEIGHT), // Estimations
            Constraint::Min(0),                // Bottom padding (flex)
        ])
        .split(area);

    for (idx, label) in SIDEBAR_ITEMS.iter().enumerate() {
        let is_selected = match idx {
            0 => matches!(app.state.current_view, View::Dashboard),
            1 => matches!(
                app.state.current_view,
                View::Projects | View::ProjectCreate | View::ProjectEdit
            ),
            2 => matches!(
                app.state.current_view,
                View::Estimations | View::EstimationCreate | View::EstimationEdit
            ),
            _ => false,
        };

        let (border_style, text_style) = if is_selected {
            (
                Style::default().fg(Color::Cyan),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::Gray),
            )
        };

        let hotkey = format!("{} {}", idx + 1, label);
        let button = Paragraph::new(Line::from(Span::styled(hotkey, text_style)))
            .alignment(ratatui::layout::Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );
        frame.render_widget(button, chunks[idx]);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Session indicator
    let session_dot = if app.state.session.is_some() {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::DarkGray))
    };
    spans.push(session_dot);

    // View-specific hints
    let hints = get_view_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    if app.state.loading {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Loading…", Style::default().fg(Color::Yellow)));
    }

    if let Some(msg) = &app.state.error_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Red)));
    } else if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    if let Some(session) = &app.state.session {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{} <{}>", session.name, session.email),
            Style::default().fg(Color::Blue),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> String {
    if app.state.status_picker.is_some() {
        return "j/k:nav  Space:toggle  Enter:apply  Esc:close".to_string();
    }
    if app.state.confirm_delete.is_some() {
        return "y:confirm delete  n:cancel".to_string();
    }
    match app.state.filter_input {
        FilterInput::Search => return "type to search  Enter:apply  Esc:clear".to_string(),
        FilterInput::DueDate => {
            return "type YYYY-MM-DD  Enter:apply  Esc:clear".to_string();
        }
        FilterInput::None => {}
    }

    match app.state.current_view {
        View::Login => "Tab:next  Enter:sign in  ^R:register  ^F:forgot password".to_string(),
        View::Register => "Tab:next  Enter:create account  Esc:back".to_string(),
        View::ForgotPassword => "Enter:send reset link  Esc:back".to_string(),
        View::Dashboard => "1/2/3:views  r:refresh  q:quit".to_string(),
        View::Projects => {
            "j/k:nav  h/l:page  /:search  D:due  f:status  s/S:sort  n:new  Enter:edit  d:delete"
                .to_string()
        }
        View::Estimations => {
            "j/k:nav  h/l:page  /:search  f:status  s/S:sort  n:new  Enter:edit  d:delete"
                .to_string()
        }
        View::ProjectCreate | View::ProjectEdit => {
            "Tab:next  Space:status  ^W:save  Esc:cancel".to_string()
        }
        View::EstimationCreate | View::EstimationEdit => {
            "Tab:next  ^A:+item  ^S:+section  ^D:-item  ^X:-section  ^W:save  Esc:cancel"
                .to_string()
        }
    }
}
