use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::render_utils::{InputHint, render_hints, render_overlay};

pub fn render_logout(frame: &mut Frame, area: Rect) {
    let inner = render_overlay(frame, area, "Sign Out", Color::Red, 48, 7);
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "Are you sure you want to end your session?",
            Style::default().fg(Color::White),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
    let hints = [InputHint::new("y", "sign out"), InputHint::new("n/Esc", "cancel")];
    render_hints(frame, inner, &hints, Color::Red);
}
