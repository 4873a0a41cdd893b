//! Signup form rendering

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::state::SignupField;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use crate::ui::layout::centered_card;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the account creation form
pub fn draw_signup(frame: &mut Frame, area: Rect, app: &App) {
    let card = centered_card(area);
    let form = &app.state.form;

    let block = Block::default()
        .title(" Create Account ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, card);

    let mut constraints = vec![Constraint::Length(2)]; // Header
    constraints.extend(SignupField::ALL.iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.push(Constraint::Length(BUTTON_HEIGHT)); // Submit
    constraints.push(Constraint::Length(1)); // Help text
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(card);

    draw_header(frame, chunks[0]);

    for field in SignupField::ALL {
        draw_field(
            frame,
            chunks[field.index() + 1],
            field,
            form.data.get(field),
            form.errors.get(field),
            form.active() == Some(field),
        );
    }

    let button_idx = SignupField::ALL.len() + 1;
    let label = if app.state.submitting {
        "Signing up…"
    } else {
        "Sign Up"
    };
    render_button(
        frame,
        chunks[button_idx],
        label,
        form.is_submit_active(),
        !app.state.submitting,
    );

    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(": next field  "),
        Span::styled(
            crate::platform::SUBMIT_SHORTCUT,
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(": submit  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(": quit"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[button_idx + 1]);
}

/// Subtitle with the sign-in link
fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Already have an account? ",
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            "Sign in",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        ),
        Span::styled(
            format!(" ({})", crate::platform::SIGN_IN_SHORTCUT),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(header, area);
}
