use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::common::truncate_start_with_ellipsis;

/// Calculates the area for an overlay, centered within `area` and the
/// first `available_height` rows.
pub fn calculate_overlay_area(area: Rect, available_height: u16, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(available_height.saturating_sub(2));

    let overlay_x = area.x + (area.width.saturating_sub(width)) / 2;
    let overlay_y = area.y + (available_height.saturating_sub(height)) / 2;
    Rect::new(overlay_x, overlay_y, width, height)
}

/// Renders the base container for an overlay (clears background, draws border and title).
pub fn render_overlay_container(frame: &mut Frame, area: Rect, title: &str, border_color: Color) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

/// Renders a centered overlay container and returns its inner area.
pub fn render_overlay(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    width: u16,
    height: u16,
) -> Rect {
    let popup = calculate_overlay_area(area, area.height, width, height);
    render_overlay_container(frame, popup, title, border_color);
    Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    )
}

/// Helper struct for keyboard hints.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Configuration for rendering a prompt input line.
pub struct InputLine<'a> {
    pub value: &'a str,
    pub placeholder: Option<&'a str>,
    pub prompt: &'a str,
    pub prompt_color: Color,
    pub text_color: Color,
    pub placeholder_color: Color,
    pub cursor_color: Color,
}

/// Renders a prompt-style input line: "> <text>█".
pub fn render_input_line(frame: &mut Frame, area: Rect, input: &InputLine<'_>) {
    let is_placeholder = input.value.is_empty() && input.placeholder.is_some();
    let max_text_width = area.width.saturating_sub(input.prompt.len() as u16 + 1) as usize;

    let display_text = match input.placeholder {
        Some(placeholder) if is_placeholder => {
            truncate_start_with_ellipsis(placeholder, max_text_width)
        }
        _ => truncate_start_with_ellipsis(input.value, max_text_width),
    };

    let mut spans = vec![Span::styled(
        input.prompt,
        Style::default().fg(input.prompt_color),
    )];
    if is_placeholder {
        spans.push(Span::styled("█", Style::default().fg(input.cursor_color)));
        spans.push(Span::styled(
            display_text,
            Style::default().fg(input.placeholder_color),
        ));
    } else {
        spans.push(Span::styled(
            display_text,
            Style::default().fg(input.text_color),
        ));
        spans.push(Span::styled("█", Style::default().fg(input.cursor_color)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders a line of keyboard hints on the last row of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight_color: Color) {
    let hints_y = area.y + area.height.saturating_sub(1);
    let hints_area = Rect::new(area.x, hints_y, area.width, 1);

    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight_color)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}
