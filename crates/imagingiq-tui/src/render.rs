//! Pure view/render functions for the shell.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::gate::SessionState;
use crate::overlays::render_utils::{InputHint, render_hints};
use crate::overlays::{self, ActiveOverlay};
use crate::state::{AppState, Route, ViewState};
use crate::update::active_overlay;
use crate::{demo, login, nav, scan};

/// Shown alone while a protected view waits for its session query.
pub const LOADING_TEXT: &str = "Securing medical environment...";

const HEADER_HEIGHT: u16 = 1;
const HINTS_HEIGHT: u16 = 1;
const DEMO_FORM_WIDTH: u16 = 64;
const DEMO_FORM_HEIGHT: u16 = 4;

/// Renders the entire shell to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let view = &app.view;

    // Protected views render nothing but the loading indicator until the
    // gate resolves, and nothing at all once refused.
    match &view.gate {
        Some(SessionState::Pending) => {
            if view.route == Route::Dashboard {
                render_loading(frame, area);
            }
            return;
        }
        Some(SessionState::Unauthorized) => return,
        Some(SessionState::Authorized(_)) | None => {}
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Header
            Constraint::Min(1),                // View body
            Constraint::Length(HINTS_HEIGHT),  // Key hints
        ])
        .split(area);

    nav::render_header(frame, chunks[0], &app.nav, view.route);
    match view.route {
        Route::Home => render_home(frame, chunks[1], app),
        Route::Login => login::render_login(frame, chunks[1], &view.login),
        Route::Dashboard => render_dashboard(frame, chunks[1], app),
        Route::Profile => render_profile(frame, chunks[1], view),
    }
    render_view_hints(frame, chunks[2], app);

    render_overlays(frame, area, app);
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let y = area.y + area.height / 2;
    let line = Line::from(Span::styled(LOADING_TEXT, Style::default().fg(Color::Cyan)));
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, 1),
    );
}

fn render_home(frame: &mut Frame, area: Rect, app: &AppState) {
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "AI-assisted medical imaging diagnostics",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    let status = match &app.nav.user {
        Some(user) => format!("Signed in as {}", user.display_name()),
        None => "Not signed in".to_string(),
    };
    lines.push(Line::from(Span::styled(
        status,
        Style::default().fg(Color::DarkGray),
    )));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(lines.len() as u16 + 1),
            Constraint::Length(DEMO_FORM_HEIGHT),
            Constraint::Min(0),
        ])
        .split(area);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        chunks[0],
    );

    let width = DEMO_FORM_WIDTH.min(area.width);
    let form_area = Rect::new(
        area.x + (area.width - width) / 2,
        chunks[1].y,
        width,
        chunks[1].height,
    );
    demo::render_demo_request(frame, form_area, &app.view.demo, app.spinner_frame);
}

fn render_dashboard(frame: &mut Frame, area: Rect, app: &AppState) {
    let view = &app.view;
    let Some(session) = view.session() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    let heading = vec![
        Line::from(Span::styled(
            " Diagnostic Terminal",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" Logged in as ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Dr. {}", session.user.short_name()),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(heading), chunks[0]);

    scan::render_scan_zone(frame, chunks[1], &view.scan, app.now, app.spinner_frame);
}

fn render_profile(frame: &mut Frame, area: Rect, view: &ViewState) {
    let Some(session) = view.session() else {
        return;
    };
    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(Span::styled(
            " Practitioner Profile",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled(" Name:  ", label),
            Span::raw(session.user.display_name().to_string()),
        ]),
        Line::from(vec![
            Span::styled(" Email: ", label),
            Span::raw(session.user.email.clone()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_view_hints(frame: &mut Frame, area: Rect, app: &AppState) {
    let hints: Vec<InputHint<'_>> = match app.view.route {
        Route::Home if app.view.demo.editing => vec![
            InputHint::new("Enter", "get demo"),
            InputHint::new("Esc", "done"),
        ],
        Route::Home => {
            let mut hints = vec![
                InputHint::new("r", "request demo"),
                InputHint::new("f/t/e/a", "info"),
                InputHint::new("d", "dashboard"),
            ];
            if app.nav.is_signed_in() {
                hints.push(InputHint::new("o", "sign out"));
            } else {
                hints.push(InputHint::new("l", "sign in"));
            }
            hints.push(InputHint::new("q", "quit"));
            hints
        }
        // The login card draws its own hints.
        Route::Login => return,
        Route::Dashboard => vec![
            InputHint::new("Enter", "analyze"),
            InputHint::new("p", "profile"),
            InputHint::new("h", "home"),
            InputHint::new("o", "sign out"),
            InputHint::new("q", "quit"),
        ],
        Route::Profile => vec![
            InputHint::new("b", "dashboard"),
            InputHint::new("o", "sign out"),
            InputHint::new("q", "quit"),
        ],
    };
    render_hints(frame, area, &hints, Color::Cyan);
}

fn render_overlays(frame: &mut Frame, area: Rect, app: &AppState) {
    let view = &app.view;
    if view.welcome.is_visible()
        && let Some(session) = view.session()
    {
        overlays::render_welcome(frame, area, session.user.display_name());
    }
    if let Some(notice) = app.nav.visible_notice() {
        overlays::render_notice(frame, area, notice);
    }

    match active_overlay(app) {
        Some(ActiveOverlay::Logout) => overlays::render_logout(frame, area),
        Some(ActiveOverlay::Info(topic)) => overlays::render_info(frame, area, topic),
        Some(ActiveOverlay::Result) => {
            if let Some(report) = &view.scan.report {
                overlays::render_result(frame, area, report);
            }
        }
        None => {}
    }
}
