//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod login;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let content_area = layout::create_layout(frame.area());

    match app.state.current_view {
        View::Signup => forms::draw_signup(frame, content_area, app),
        View::Login => login::draw(frame, content_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Alerts overlay everything else
    if let Some(message) = app.state.current_error() {
        components::render_alert_dialog(frame, message, app.state.error_count());
    }
}
