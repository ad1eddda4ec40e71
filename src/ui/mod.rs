//! UI module for rendering the TUI

mod auth;
mod dashboard;
mod estimations;
mod forms;
mod layout;
mod projects;
mod widgets;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Auth screens render full-width, no sidebar
    if app.state.current_view.is_auth() {
        let content = layout::create_layout_no_sidebar(area);
        auth::draw(frame, content, app);
        layout::draw_status_bar(frame, app);
        return;
    }

    let (sidebar_area, main_area) = layout::create_layout(area);
    layout::draw_sidebar(frame, sidebar_area, app);

    match &app.state.current_view {
        View::Dashboard => dashboard::draw(frame, main_area, app),
        View::Projects => projects::draw(frame, main_area, app),
        View::Estimations => estimations::draw(frame, main_area, app),
        View::ProjectCreate | View::ProjectEdit => forms::draw_project_form(frame, main_area, app),
        View::EstimationCreate | View::EstimationEdit => {
            forms::draw_estimation_form(frame, main_area, app)
        }
        // Auth views handled above
        _ => {}
    }

    layout::draw_status_bar(frame, app);
}

/// Format an amount as dollars with thousands separators and two decimals.
///
/// Non-finite values render literally; producing them is an input bug the
/// calculator does not trap.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${amount}");
    }
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u128;
    let dollars = cents / 100;
    let fraction = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{fraction:02}")
}
