use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::DemoRequestForm;
use crate::common::truncate_with_ellipsis;
use crate::overlays::render_utils::{InputLine, render_input_line};

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the demo-request form, or its confirmation, into `area`.
pub fn render_demo_request(
    frame: &mut Frame,
    area: Rect,
    form: &DemoRequestForm,
    spinner_frame: usize,
) {
    if area.height < 4 {
        return;
    }
    if form.submitted.is_visible() {
        render_confirmation(frame, area, form);
        return;
    }

    let label_color = if form.editing { Color::Cyan } else { Color::DarkGray };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Request a demo", Style::default().fg(label_color)),
            Span::styled("  (r)", Style::default().fg(Color::DarkGray)),
        ])),
        Rect::new(area.x, area.y, area.width, 1),
    );

    let cursor_color = if form.editing { Color::Cyan } else { Color::Reset };
    render_input_line(
        frame,
        Rect::new(area.x, area.y + 1, area.width, 1),
        &InputLine {
            value: &form.email,
            placeholder: Some("Enter your email"),
            prompt: "> ",
            prompt_color: Color::DarkGray,
            text_color: Color::White,
            placeholder_color: Color::DarkGray,
            cursor_color,
        },
    );

    let status = if form.submitting {
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        Line::from(Span::styled(
            format!("{spinner} Processing..."),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = &form.error {
        Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red)))
    } else {
        Line::from(Span::styled(
            "Get Demo with Enter",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(
        Paragraph::new(status),
        Rect::new(area.x, area.y + 2, area.width, 1),
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            "No spam. Unsubscribe anytime.",
            Style::default().fg(Color::DarkGray),
        )),
        Rect::new(area.x, area.y + 3, area.width, 1),
    );
}

fn render_confirmation(frame: &mut Frame, area: Rect, form: &DemoRequestForm) {
    let email_width = usize::from(area.width.saturating_sub(40));
    let lines = vec![
        Line::from(Span::styled(
            "✓ Success! We will contact you",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                "A demo specialist will reach out to ",
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                truncate_with_ellipsis(&form.email, email_width),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(Span::styled(
            "within 24 hours.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled("r", Style::default().fg(Color::Cyan)),
            Span::styled(
                " request another demo",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
