//! Scan zone view.

use tokio::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use super::{SCAN_STAGES, ScanPhase, ScanState};

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the upload/scan zone of the diagnostic terminal.
pub fn render_scan_zone(
    frame: &mut Frame,
    area: Rect,
    scan: &ScanState,
    now: Instant,
    spinner_frame: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Scan ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match scan.phase {
        ScanPhase::Idle => render_idle(frame, inner),
        ScanPhase::Scanning { .. } => render_scanning(frame, inner, scan, now, spinner_frame),
        ScanPhase::Complete => render_complete(frame, inner),
    }
}

fn render_idle(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Drop a study here to begin",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "DICOM, PNG or JPEG",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::styled(" begin analysis", Style::default().fg(Color::DarkGray)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_scanning(
    frame: &mut Frame,
    area: Rect,
    scan: &ScanState,
    now: Instant,
    spinner_frame: usize,
) {
    let progress = scan.progress(now);
    let current = ScanState::stage(progress);
    let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                            // Heading
            Constraint::Length(1),                            // Gauge
            Constraint::Length(1),                            // Gap
            Constraint::Length(SCAN_STAGES.len() as u16),     // Stages
            Constraint::Min(0),
        ])
        .split(area);

    let heading = Line::from(vec![
        Span::styled(format!("{spinner} "), Style::default().fg(Color::Cyan)),
        Span::styled(
            "Analyzing...",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(heading), chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(progress)
        .label(format!("{:.0}%", progress * 100.0));
    frame.render_widget(gauge, chunks[1]);

    let mut reached = true;
    let stages: Vec<Line<'static>> = SCAN_STAGES
        .iter()
        .map(|stage| {
            let is_current = *stage == current;
            let (marker, color) = if is_current {
                reached = false;
                ("▸", Color::Yellow)
            } else if reached {
                ("✓", Color::Green)
            } else {
                ("·", Color::DarkGray)
            };
            Line::from(Span::styled(
                format!("{marker} {stage}"),
                Style::default().fg(color),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(stages), chunks[3]);
}

fn render_complete(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Analysis complete",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
