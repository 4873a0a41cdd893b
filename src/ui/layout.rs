//! Layout components (centered card, status bar)

use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Widest the form card grows on large terminals
const CARD_MAX_WIDTH: u16 = 64;

/// Split the screen into content and the one-line status bar
pub fn create_layout(area: Rect) -> Rect {
    // Reserve bottom line for status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Horizontally center a card of at most `CARD_MAX_WIDTH` columns
pub fn centered_card(area: Rect) -> Rect {
    let [card] = Layout::horizontal([Constraint::Max(CARD_MAX_WIDTH)])
        .flex(Flex::Center)
        .areas(area);
    card
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

    // Request status
    if app.state.submitting {
        spans.push(Span::styled(" ◌ Submitting… ", Style::default().fg(Color::Yellow)));
    } else {
        spans.push(Span::styled(" ● ", Style::default().fg(Color::Green)));
    }

    // View-specific hints
    let hints = get_view_hints(&app.state.current_view);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Render quit hint on the right
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: &View) -> String {
    match view {
        View::Signup => format!(
            "Tab:next  Enter:next/submit  {}:submit  {}:sign in  Esc:quit",
            crate::platform::SUBMIT_SHORTCUT,
            crate::platform::SIGN_IN_SHORTCUT
        ),
        View::Login => "Esc:back to signup".to_string(),
    }
}
