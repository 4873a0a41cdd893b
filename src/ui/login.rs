//! Login view, the destination of a successful signup

use crate::app::App;
use crate::ui::layout::centered_card;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the login view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let card = centered_card(area);

    let mut lines = Vec::new();
    if let Some(notice) = &app.state.login_notice {
        lines.push(Line::from(Span::styled(
            notice.as_str(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::raw("Sign in at "),
        Span::styled(app.login_url.as_str(), Style::default().fg(Color::Cyan)),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Esc to create another account.",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Sign In ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(paragraph, card);
}
