use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::render_utils::{InputHint, render_hints, render_overlay};
use crate::scan::ScanReport;

/// Renders the scan result panel.
pub fn render_result(frame: &mut Frame, area: Rect, report: &ScanReport) {
    let height = report.findings.len() as u16 + 8;
    let inner = render_overlay(frame, area, "Analysis Result", Color::Green, 60, height);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Model: ", Style::default().fg(Color::DarkGray)),
            Span::raw(report.model),
        ]),
        Line::from(vec![
            Span::styled("Confidence: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:.1}%", report.confidence_pct),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
        Line::from(Span::styled(
            report.summary,
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    lines.extend(
        report
            .findings
            .iter()
            .map(|finding| Line::from(format!("  • {finding}"))),
    );
    frame.render_widget(Paragraph::new(lines), inner);
    render_hints(frame, inner, &[InputHint::new("Esc", "dismiss")], Color::Green);
}
