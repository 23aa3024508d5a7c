//! Application state composition.
//!
//! ## State Hierarchy
//!
//! ```text
//! AppState
//! ├── view: ViewState          (rebuilt on every mount)
//! │   ├── route, mount
//! │   ├── gate: Option<SessionState>  (protected routes only)
//! │   ├── scan: ScanState
//! │   ├── welcome: TransientFlag
//! │   └── login: LoginForm
//! ├── nav: NavState            (shell chrome, survives navigation)
//! ├── tab: TabSession          (process lifetime)
//! ├── task_seq: TaskSeq
//! └── tasks: Tasks
//! ```
//!
//! `ViewState` is thrown away on unmount; nothing in it can be reached by a
//! task result from an earlier mount because task ids are never reused.

use std::fmt;
use std::str::FromStr;

use imagingiq_core::config::Config;
use imagingiq_core::session::Session;
use tokio::time::Instant;

use crate::common::{TaskKind, TaskSeq, Tasks, TransientFlag};
use crate::demo::DemoRequestForm;
use crate::gate::SessionState;
use crate::login::LoginForm;
use crate::nav::NavState;
use crate::scan::ScanState;

// ============================================================================
// Route
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Public home (navigation chrome, info overlays).
    Home,
    /// Sign-in form; target of gate redirects.
    Login,
    /// Protected diagnostic terminal with the scan workflow.
    Dashboard,
    /// Protected practitioner profile.
    Profile,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::Login, Route::Dashboard, Route::Profile];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Profile => "/profile",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Login => "login",
            Route::Dashboard => "dashboard",
            Route::Profile => "profile",
        }
    }

    /// Protected routes go through the session gate on every mount.
    pub fn is_protected(self) -> bool {
        matches!(self, Route::Dashboard | Route::Profile)
    }

    /// Whether a successful gate resolution may show the welcome toast.
    pub fn arms_welcome(self) -> bool {
        matches!(self, Route::Dashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().trim_start_matches('/').to_ascii_lowercase();
        if needle.is_empty() {
            return Ok(Route::Home);
        }
        Route::ALL
            .into_iter()
            .find(|route| route.name() == needle)
            .ok_or_else(|| {
                let names: Vec<&str> = Route::ALL.iter().map(|r| r.name()).collect();
                format!("unknown route '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// Identity of one view mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountId(pub u64);

// ============================================================================
// TabSession
// ============================================================================

/// State scoped to the process (the "browser tab" of the shell).
#[derive(Debug, Default)]
pub struct TabSession {
    welcome_shown: bool,
}

impl TabSession {
    /// Returns `true` exactly once per process.
    pub fn take_first_welcome(&mut self) -> bool {
        !std::mem::replace(&mut self.welcome_shown, true)
    }

    pub fn welcome_shown(&self) -> bool {
        self.welcome_shown
    }
}

// ============================================================================
// ViewState
// ============================================================================

/// State of the mounted view. Rebuilt from scratch on every mount.
#[derive(Debug)]
pub struct ViewState {
    pub route: Route,
    pub mount: MountId,
    /// Gate state; `None` on public routes.
    pub gate: Option<SessionState>,
    pub scan: ScanState,
    pub welcome: TransientFlag,
    pub login: LoginForm,
    pub demo: DemoRequestForm,
}

impl ViewState {
    pub fn new(route: Route, mount: MountId, config: &Config) -> Self {
        Self {
            route,
            mount,
            gate: None,
            scan: ScanState::new(),
            welcome: TransientFlag::timed(TaskKind::WelcomeTimer, config.welcome_duration()),
            login: LoginForm::default(),
            demo: DemoRequestForm::default(),
        }
    }

    /// The session, once the gate has authorized this view.
    pub fn session(&self) -> Option<&Session> {
        self.gate.as_ref().and_then(SessionState::session)
    }

    pub fn is_authorized(&self) -> bool {
        self.session().is_some()
    }
}

// ============================================================================
// AppState
// ============================================================================

/// Combined application state for the shell.
#[derive(Debug)]
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    pub config: Config,
    /// The mounted view.
    pub view: ViewState,
    /// Navigation chrome (user badge, logout, info overlays, notices).
    pub nav: NavState,
    pub tab: TabSession,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
    /// Clock reading taken by the runtime before each event.
    pub now: Instant,
    next_mount: u64,
}

impl AppState {
    /// Creates the shell with an unmounted placeholder view.
    ///
    /// The runtime mounts the start route right after construction.
    pub fn new(config: Config) -> Self {
        let view = ViewState::new(Route::Home, MountId(0), &config);
        Self {
            should_quit: false,
            view,
            nav: NavState::new(config.notice_duration()),
            tab: TabSession::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
            now: Instant::now(),
            next_mount: 1,
            config,
        }
    }

    /// Allocates the id for the next view mount.
    pub fn next_mount_id(&mut self) -> MountId {
        let id = MountId(self.next_mount);
        self.next_mount += 1;
        id
    }
}
