//! Shell reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::{TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::{DemoInput, LoginInput, UiEvent};
use crate::overlays::{ActiveOverlay, InfoTopic};
use crate::state::{AppState, Route, ViewState};
use crate::{demo, gate, login, nav, scan};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Mount(route) => mount(app, route),
        UiEvent::QuitRequested => {
            app.should_quit = true;
            vec![UiEffect::Quit]
        }

        UiEvent::BeginAnalysis => {
            let duration = app.config.scan_duration();
            scan::begin_analysis(
                &mut app.view,
                &mut app.tasks,
                &mut app.task_seq,
                duration,
                app.now,
            )
        }
        UiEvent::DismissResult => scan::dismiss_result(&mut app.view, &mut app.tasks),
        UiEvent::DismissWelcome => app.view.welcome.dismiss(&mut app.tasks),
        UiEvent::DismissNotice => nav::dismiss_notice(&mut app.nav, &mut app.tasks),
        UiEvent::RequestLogout => {
            let signed_in = app.nav.is_signed_in() || app.view.is_authorized();
            nav::request_logout(&mut app.nav, signed_in, &mut app.tasks, &mut app.task_seq)
        }
        UiEvent::ConfirmLogout => {
            nav::confirm_logout(&mut app.nav, &mut app.tasks, &mut app.task_seq)
        }
        UiEvent::CancelLogout => nav::cancel_logout(&mut app.nav, &mut app.tasks),
        UiEvent::OpenInfo(topic) => {
            nav::open_info(&mut app.nav, topic);
            vec![]
        }
        UiEvent::CloseInfo => {
            nav::close_info(&mut app.nav);
            vec![]
        }
        UiEvent::LoginInput(input) => {
            login::apply_input(&mut app.view, input);
            vec![]
        }
        UiEvent::SubmitLogin => login::submit(&mut app.view, &mut app.tasks, &mut app.task_seq),
        UiEvent::FocusDemoRequest => {
            demo::focus(&mut app.view);
            vec![]
        }
        UiEvent::BlurDemoRequest => {
            demo::blur(&mut app.view);
            vec![]
        }
        UiEvent::DemoInput(input) => {
            demo::apply_input(&mut app.view, input);
            vec![]
        }
        UiEvent::SubmitDemoRequest => {
            let after = app.config.demo_request_duration();
            demo::submit(&mut app.view, &mut app.tasks, &mut app.task_seq, after)
        }
        UiEvent::ResetDemoRequest => demo::reset(&mut app.view, &mut app.tasks),
        UiEvent::GoTo(route) => {
            if route == app.view.route {
                vec![]
            } else {
                vec![UiEffect::Navigate { to: route }]
            }
        }

        UiEvent::TaskStarted { kind, started } => {
            if app.tasks.state_mut(kind).on_started(&started) {
                vec![]
            } else {
                // Cancelled before the spawn was reported.
                tracing::debug!(?kind, task = ?started.id, "stopping stale task");
                vec![UiEffect::CancelTask {
                    kind,
                    token: started.cancel,
                }]
            }
        }
        UiEvent::SessionResolved { task, result } => gate::handle_session_resolved(
            &mut app.view,
            &mut app.tab,
            &mut app.tasks,
            &mut app.task_seq,
            task,
            result,
        ),
        UiEvent::TimerElapsed { kind, task } => handle_timer(app, kind, task),
        UiEvent::SignInFinished { task, result } => login::handle_sign_in_finished(
            &mut app.view,
            &mut app.nav,
            &mut app.tasks,
            &mut app.task_seq,
            task,
            result,
        ),
        UiEvent::SignOutFinished { task, result } => nav::handle_sign_out_finished(
            &mut app.nav,
            &mut app.tasks,
            &mut app.task_seq,
            task,
            result,
        ),
        UiEvent::SessionChanged(user) => {
            nav::session_changed(&mut app.nav, user);
            vec![]
        }
    }
}

/// Unmounts the current view and mounts `route`.
///
/// Every view-scoped task of the old view is cancelled first, so nothing it
/// started can mutate the new view.
fn mount(app: &mut AppState, route: Route) -> Vec<UiEffect> {
    let mut effects = app.tasks.cancel_view_tasks();
    effects.extend(app.nav.logout.dismiss(&mut app.tasks));
    app.nav.info = None;

    let id = app.next_mount_id();
    app.view = ViewState::new(route, id, &app.config);
    let (gate, gate_effects) = gate::mount(route, &mut app.tasks, &mut app.task_seq);
    app.view.gate = gate;
    effects.extend(gate_effects);

    tracing::info!(route = %route, mount = id.0, "view mounted");
    effects
}

fn handle_timer(app: &mut AppState, kind: TaskKind, task: TaskId) -> Vec<UiEffect> {
    match kind {
        TaskKind::ScanTimer => {
            scan::handle_scan_timer(&mut app.view, &mut app.tasks, &mut app.task_seq, task)
        }
        TaskKind::WelcomeTimer => {
            app.view.welcome.on_timer(&mut app.tasks, task);
            vec![]
        }
        TaskKind::NoticeTimer => {
            nav::handle_notice_timer(&mut app.nav, &mut app.tasks, task);
            vec![]
        }
        TaskKind::DemoRequest => {
            demo::handle_demo_timer(&mut app.view, &mut app.tasks, &mut app.task_seq, task)
        }
        TaskKind::SessionQuery | TaskKind::SignIn | TaskKind::SignOut => {
            tracing::debug!(?kind, "timer event for a non-timer task");
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match map_key(app, key) {
            Some(intent) => update(app, intent),
            None => vec![],
        },
        _ => vec![],
    }
}

/// Which overlay currently owns the keyboard.
///
/// Logout confirmation wins over informational overlays, which win over the
/// scan result panel.
pub fn active_overlay(app: &AppState) -> Option<ActiveOverlay> {
    if app.nav.logout.is_visible() {
        Some(ActiveOverlay::Logout)
    } else if let Some(topic) = app.nav.info {
        Some(ActiveOverlay::Info(topic))
    } else if app.view.scan.result.is_visible() {
        Some(ActiveOverlay::Result)
    } else {
        None
    }
}

/// Translates a key press into an intent for the current view.
fn map_key(app: &AppState, key: KeyEvent) -> Option<UiEvent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(UiEvent::QuitRequested);
    }

    if let Some(overlay) = active_overlay(app) {
        return match (overlay, key.code) {
            (ActiveOverlay::Logout, KeyCode::Char('y') | KeyCode::Enter) => {
                Some(UiEvent::ConfirmLogout)
            }
            (ActiveOverlay::Logout, KeyCode::Char('n') | KeyCode::Esc) => {
                Some(UiEvent::CancelLogout)
            }
            (ActiveOverlay::Info(_), KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) => {
                Some(UiEvent::CloseInfo)
            }
            (ActiveOverlay::Result, KeyCode::Esc | KeyCode::Enter) => Some(UiEvent::DismissResult),
            _ => None,
        };
    }

    match app.view.route {
        Route::Login => map_login_key(key, ctrl),
        Route::Home if app.view.demo.editing => map_demo_key(key, ctrl),
        Route::Home => map_home_key(app, key),
        Route::Dashboard | Route::Profile if !app.view.is_authorized() => {
            // Pending or refused: nothing but quitting is reachable.
            (key.code == KeyCode::Char('q')).then_some(UiEvent::QuitRequested)
        }
        Route::Dashboard => map_dashboard_key(app, key),
        Route::Profile => map_profile_key(key),
    }
}

fn map_login_key(key: KeyEvent, ctrl: bool) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::GoTo(Route::Home)),
        KeyCode::Enter => Some(UiEvent::SubmitLogin),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            Some(UiEvent::LoginInput(LoginInput::ToggleFocus))
        }
        KeyCode::Backspace => Some(UiEvent::LoginInput(LoginInput::Backspace)),
        KeyCode::Char(c) if !ctrl => Some(UiEvent::LoginInput(LoginInput::Char(c))),
        _ => None,
    }
}

fn map_home_key(app: &AppState, key: KeyEvent) -> Option<UiEvent> {
    let KeyCode::Char(c) = key.code else {
        return None;
    };
    if let Some(topic) = InfoTopic::from_key(c) {
        return Some(UiEvent::OpenInfo(topic));
    }
    match c {
        'r' if app.view.demo.submitted.is_visible() => Some(UiEvent::ResetDemoRequest),
        'r' => Some(UiEvent::FocusDemoRequest),
        'l' if !app.nav.is_signed_in() => Some(UiEvent::GoTo(Route::Login)),
        'o' => Some(UiEvent::RequestLogout),
        'd' => Some(UiEvent::GoTo(Route::Dashboard)),
        'x' => Some(UiEvent::DismissNotice),
        'q' => Some(UiEvent::QuitRequested),
        _ => None,
    }
}

/// Keys while the demo-request email field has focus.
fn map_demo_key(key: KeyEvent, ctrl: bool) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::BlurDemoRequest),
        KeyCode::Enter => Some(UiEvent::SubmitDemoRequest),
        KeyCode::Backspace => Some(UiEvent::DemoInput(DemoInput::Backspace)),
        KeyCode::Char(c) if !ctrl => Some(UiEvent::DemoInput(DemoInput::Char(c))),
        _ => None,
    }
}

fn map_dashboard_key(app: &AppState, key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(UiEvent::BeginAnalysis),
        KeyCode::Esc if app.view.welcome.is_visible() => Some(UiEvent::DismissWelcome),
        KeyCode::Char('w') => Some(UiEvent::DismissWelcome),
        KeyCode::Char('p') => Some(UiEvent::GoTo(Route::Profile)),
        KeyCode::Char('h') => Some(UiEvent::GoTo(Route::Home)),
        KeyCode::Char('o') => Some(UiEvent::RequestLogout),
        KeyCode::Char('x') => Some(UiEvent::DismissNotice),
        KeyCode::Char('q') => Some(UiEvent::QuitRequested),
        _ => None,
    }
}

fn map_profile_key(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('b') => Some(UiEvent::GoTo(Route::Dashboard)),
        KeyCode::Char('h') => Some(UiEvent::GoTo(Route::Home)),
        KeyCode::Char('o') => Some(UiEvent::RequestLogout),
        KeyCode::Char('x') => Some(UiEvent::DismissNotice),
        KeyCode::Char('q') => Some(UiEvent::QuitRequested),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use imagingiq_core::config::Config;
    use imagingiq_core::error::ProviderError;
    use imagingiq_core::session::{Session, SessionUser};

    use super::*;
    use crate::gate::SessionState;

    fn app() -> AppState {
        AppState::new(Config::default())
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn dana() -> Session {
        Session::active(SessionUser::new("dana.lee@imagingiq.dev", Some("Dana Lee".into())))
    }

    fn active_query(app: &AppState) -> TaskId {
        app.tasks.session_query.active.expect("session query running")
    }

    /// Mounts the dashboard and answers its session query with `result`.
    fn dashboard_with(
        app: &mut AppState,
        result: Result<Option<Session>, ProviderError>,
    ) -> Vec<UiEffect> {
        update(app, UiEvent::Mount(Route::Dashboard));
        let task = active_query(app);
        update(app, UiEvent::SessionResolved { task, result })
    }

    fn started_scan(app: &mut AppState) -> TaskId {
        let effects = update(app, key(KeyCode::Enter));
        let [UiEffect::StartTimer { task, .. }] = effects.as_slice() else {
            panic!("expected the scan timer, got {effects:?}");
        };
        *task
    }

    #[test]
    fn test_mount_protected_route_issues_one_query() {
        let mut app = app();
        let effects = update(&mut app, UiEvent::Mount(Route::Dashboard));

        let queries = effects
            .iter()
            .filter(|e| matches!(e, UiEffect::ResolveSession { .. }))
            .count();
        assert_eq!(queries, 1);
        assert_eq!(app.view.gate, Some(SessionState::Pending));
    }

    #[test]
    fn test_pending_view_ignores_intents() {
        let mut app = app();
        update(&mut app, UiEvent::Mount(Route::Dashboard));

        assert!(update(&mut app, key(KeyCode::Enter)).is_empty());
        assert!(update(&mut app, UiEvent::BeginAnalysis).is_empty());
        assert!(app.view.scan.is_idle());
        assert!(!app.tasks.scan_timer.is_running());
    }

    #[test]
    fn test_unauthorized_redirects_once() {
        let mut app = app();
        let effects = dashboard_with(&mut app, Ok(None));

        let redirects: Vec<_> = effects
            .iter()
            .filter(|e| matches!(e, UiEffect::Navigate { .. }))
            .collect();
        assert!(matches!(
            redirects.as_slice(),
            [UiEffect::Navigate { to: Route::Login }]
        ));
        assert!(!app.view.is_authorized());
    }

    #[test]
    fn test_unmount_cancels_view_tasks_and_drops_late_results() {
        let mut app = app();
        dashboard_with(&mut app, Ok(Some(dana())));
        let scan_task = started_scan(&mut app);
        assert!(app.tasks.welcome_timer.is_running());

        let effects = update(&mut app, UiEvent::Mount(Route::Home));

        let cancelled: Vec<TaskKind> = effects
            .iter()
            .filter_map(|e| match e {
                UiEffect::CancelTask { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect();
        assert!(cancelled.contains(&TaskKind::ScanTimer));
        assert!(cancelled.contains(&TaskKind::WelcomeTimer));

        let late = update(
            &mut app,
            UiEvent::TimerElapsed {
                kind: TaskKind::ScanTimer,
                task: scan_task,
            },
        );
        assert!(late.is_empty());
        assert!(app.view.scan.is_idle());
        assert!(!app.view.scan.result.is_visible());
    }

    #[test]
    fn test_late_session_result_from_previous_mount_is_ignored() {
        let mut app = app();
        update(&mut app, UiEvent::Mount(Route::Dashboard));
        let first = active_query(&app);
        update(&mut app, UiEvent::Mount(Route::Dashboard));

        let effects = update(
            &mut app,
            UiEvent::SessionResolved {
                task: first,
                result: Ok(None),
            },
        );

        assert!(effects.is_empty());
        assert_eq!(app.view.gate, Some(SessionState::Pending));
    }

    #[test]
    fn test_welcome_shows_once_per_process() {
        let mut app = app();
        dashboard_with(&mut app, Ok(Some(dana())));
        assert!(app.view.welcome.is_visible());

        update(&mut app, UiEvent::Mount(Route::Home));
        let effects = dashboard_with(&mut app, Ok(Some(dana())));

        assert!(app.view.is_authorized());
        assert!(!app.view.welcome.is_visible());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_second_scan_trigger_is_noop() {
        let mut app = app();
        dashboard_with(&mut app, Ok(Some(dana())));
        let task = started_scan(&mut app);

        assert!(update(&mut app, key(KeyCode::Enter)).is_empty());
        assert_eq!(app.tasks.scan_timer.active, Some(task));
    }

    #[test]
    fn test_result_panel_owns_keys_until_dismissed() {
        let mut app = app();
        dashboard_with(&mut app, Ok(Some(dana())));
        let task = started_scan(&mut app);
        update(
            &mut app,
            UiEvent::TimerElapsed {
                kind: TaskKind::ScanTimer,
                task,
            },
        );
        assert_eq!(active_overlay(&app), Some(ActiveOverlay::Result));

        // View keys are swallowed by the panel.
        update(&mut app, key(KeyCode::Char('p')));
        assert_eq!(app.view.route, Route::Dashboard);

        update(&mut app, key(KeyCode::Esc));
        assert!(app.view.scan.is_idle());
        assert_eq!(active_overlay(&app), None);
    }

    #[test]
    fn test_logout_modal_outranks_info_overlay() {
        let mut app = app();
        app.nav.user = Some(SessionUser::new("a@b.com", None));
        update(&mut app, UiEvent::Mount(Route::Home));

        update(&mut app, key(KeyCode::Char('f')));
        assert_eq!(active_overlay(&app), Some(ActiveOverlay::Info(InfoTopic::Features)));

        update(&mut app, UiEvent::RequestLogout);
        assert_eq!(active_overlay(&app), Some(ActiveOverlay::Logout));

        let effects = update(&mut app, key(KeyCode::Char('y')));
        assert!(matches!(effects.as_slice(), [UiEffect::SignOut { .. }]));
    }

    #[test]
    fn test_stale_task_started_is_cancelled() {
        use tokio_util::sync::CancellationToken;

        use crate::common::TaskStarted;

        let mut app = app();
        let token = CancellationToken::new();
        let effects = update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::ScanTimer,
                started: TaskStarted {
                    id: TaskId(42),
                    cancel: Some(token),
                },
            },
        );
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CancelTask {
                kind: TaskKind::ScanTimer,
                token: Some(_)
            }]
        ));
    }

    #[test]
    fn test_login_keys_edit_and_submit() {
        let mut app = app();
        update(&mut app, UiEvent::Mount(Route::Login));
        for c in "a@b.com".chars() {
            update(&mut app, key(KeyCode::Char(c)));
        }
        update(&mut app, key(KeyCode::Tab));
        for c in "pw".chars() {
            update(&mut app, key(KeyCode::Char(c)));
        }

        let effects = update(&mut app, key(KeyCode::Enter));

        assert!(matches!(effects.as_slice(), [UiEffect::SignIn { email, password, .. }]
            if email == "a@b.com" && password == "pw"));
        assert!(app.view.login.submitting);
    }

    #[test]
    fn test_demo_request_keys_type_submit_and_reset() {
        let mut app = app();
        update(&mut app, UiEvent::Mount(Route::Home));

        update(&mut app, key(KeyCode::Char('r')));
        assert!(app.view.demo.editing);
        // Shortcut letters are typed, not triggered, while the field has focus.
        for c in "dana@clinic".chars() {
            update(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.view.demo.email, "dana@clinic");
        assert_eq!(app.nav.info, None);
        assert!(!app.should_quit);

        assert!(update(&mut app, key(KeyCode::Enter)).is_empty());
        assert_eq!(
            app.view.demo.error.as_deref(),
            Some("Please enter a valid email address (e.g., name@example.com)")
        );

        for c in ".org".chars() {
            update(&mut app, key(KeyCode::Char(c)));
        }
        assert!(app.view.demo.error.is_none());
        let effects = update(&mut app, key(KeyCode::Enter));
        let [UiEffect::StartTimer { kind: TaskKind::DemoRequest, task, .. }] = effects.as_slice()
        else {
            panic!("expected the demo timer, got {effects:?}");
        };
        update(
            &mut app,
            UiEvent::TimerElapsed {
                kind: TaskKind::DemoRequest,
                task: *task,
            },
        );
        assert!(app.view.demo.submitted.is_visible());

        update(&mut app, key(KeyCode::Char('r')));
        assert!(!app.view.demo.submitted.is_visible());
        assert!(app.view.demo.email.is_empty());
    }

    #[test]
    fn test_leaving_home_cancels_demo_request() {
        let mut app = app();
        update(&mut app, UiEvent::Mount(Route::Home));
        app.view.demo.email = "name@example.com".to_string();
        let effects = update(&mut app, UiEvent::SubmitDemoRequest);
        let [UiEffect::StartTimer { task, .. }] = effects.as_slice() else {
            panic!("expected the demo timer");
        };
        let task = *task;

        let effects = update(&mut app, UiEvent::Mount(Route::Login));
        assert!(effects.iter().any(|e| matches!(
            e,
            UiEffect::CancelTask {
                kind: TaskKind::DemoRequest,
                ..
            }
        )));

        update(&mut app, UiEvent::Mount(Route::Home));
        update(
            &mut app,
            UiEvent::TimerElapsed {
                kind: TaskKind::DemoRequest,
                task,
            },
        );
        assert!(!app.view.demo.submitted.is_visible());
        assert!(app.view.demo.email.is_empty());
    }

    #[test]
    fn test_ctrl_c_quits_from_any_view() {
        let mut app = app();
        update(&mut app, UiEvent::Mount(Route::Login));
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(app.should_quit);
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }
}
