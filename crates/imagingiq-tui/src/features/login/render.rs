use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{LoginField, LoginForm};
use crate::overlays::render_utils::{
    InputHint, InputLine, calculate_overlay_area, render_hints, render_input_line,
    render_overlay_container,
};

/// Renders the sign-in card centered in `area`.
pub fn render_login(frame: &mut Frame, area: Rect, form: &LoginForm) {
    let card = calculate_overlay_area(area, area.height, 56, 12);
    render_overlay_container(frame, card, "Practitioner Sign In", Color::Cyan);

    let inner = Rect::new(
        card.x + 2,
        card.y + 1,
        card.width.saturating_sub(4),
        card.height.saturating_sub(2),
    );

    let password = form.masked_password();
    let fields = [
        (LoginField::Email, "Email", form.email.as_str(), "you@hospital.org"),
        (LoginField::Password, "Password", password.as_str(), ""),
    ];
    for (row, (field, label, value, placeholder)) in fields.into_iter().enumerate() {
        let y = inner.y + row as u16 * 3;
        let focused = form.focus == field;
        let label_color = if focused { Color::Cyan } else { Color::DarkGray };
        frame.render_widget(
            Paragraph::new(Span::styled(label, Style::default().fg(label_color))),
            Rect::new(inner.x, y, inner.width, 1),
        );
        let cursor_color = if focused { Color::Cyan } else { Color::Reset };
        render_input_line(
            frame,
            Rect::new(inner.x, y + 1, inner.width, 1),
            &InputLine {
                value,
                placeholder: (!placeholder.is_empty()).then_some(placeholder),
                prompt: "> ",
                prompt_color: Color::DarkGray,
                text_color: Color::White,
                placeholder_color: Color::DarkGray,
                cursor_color,
            },
        );
    }

    let status = if form.submitting {
        Line::from(Span::styled(
            "Signing in...",
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = &form.error {
        Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red)))
    } else {
        Line::default()
    };
    frame.render_widget(
        Paragraph::new(status),
        Rect::new(inner.x, inner.y + 6, inner.width, 1),
    );

    let hints = [
        InputHint::new("Tab", "switch field"),
        InputHint::new("Enter", "sign in"),
        InputHint::new("Esc", "home"),
    ];
    render_hints(frame, inner, &hints, Color::Cyan);
}
