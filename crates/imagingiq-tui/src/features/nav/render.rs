use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::NavState;
use crate::common::truncate_with_ellipsis;
use crate::state::Route;

/// Renders the one-line header: brand, route, user badge.
pub fn render_header(frame: &mut Frame, area: Rect, nav: &NavState, route: Route) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(40)])
        .split(area);

    let brand = Line::from(vec![
        Span::styled(
            " ImagingIQ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {route}"), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(brand), chunks[0]);

    // Room for the status dot and trailing space.
    let email_width = usize::from(chunks[1].width.saturating_sub(3));
    let badge = match &nav.user {
        Some(user) => Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Green)),
            Span::styled(
                truncate_with_ellipsis(&user.email, email_width),
                Style::default().fg(Color::White),
            ),
            Span::raw(" "),
        ]),
        None => Line::from(Span::styled(
            "Signed out ",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(badge).alignment(Alignment::Right), chunks[1]);
}
