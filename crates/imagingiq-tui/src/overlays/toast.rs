//! Corner toasts: the one-time welcome and shell notices.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::common::truncate_with_ellipsis;
use crate::nav::{Notice, NoticeLevel};

const TOAST_WIDTH: u16 = 44;

fn toast_area(area: Rect, row: u16) -> Rect {
    let width = TOAST_WIDTH.min(area.width);
    Rect::new(
        area.x + area.width.saturating_sub(width),
        area.y + row,
        width,
        4.min(area.height.saturating_sub(row)),
    )
}

fn render_toast(frame: &mut Frame, area: Rect, color: Color, title: &str, text: &str, hint: &str) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let lines = vec![
        Line::from(vec![
            Span::styled(
                title.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {hint}"), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(truncate_with_ellipsis(text, width)),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Welcome toast, top-right.
pub fn render_welcome(frame: &mut Frame, area: Rect, name: &str) {
    render_toast(
        frame,
        toast_area(area, 0),
        Color::Green,
        "Login Successful",
        &format!("Welcome back, {name}"),
        "w dismiss",
    );
}

/// Notice toast, below the welcome slot.
pub fn render_notice(frame: &mut Frame, area: Rect, notice: &Notice) {
    let (color, title) = match notice.level {
        NoticeLevel::Success => (Color::Green, "Success"),
        NoticeLevel::Error => (Color::Red, "Error"),
    };
    render_toast(
        frame,
        toast_area(area, 4),
        color,
        title,
        &notice.text,
        "x dismiss",
    );
}
