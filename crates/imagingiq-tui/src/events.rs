//! UI events consumed by the reducer.
//!
//! Three sources feed `update`:
//! - the terminal (keys, resize) and the tick clock
//! - user intents, either translated from keys or dispatched directly
//! - task results delivered through the runtime inbox

use crossterm::event::Event;
use imagingiq_core::error::ProviderError;
use imagingiq_core::session::{Session, SessionUser};

use crate::common::{TaskId, TaskKind, TaskStarted};
use crate::overlays::InfoTopic;
use crate::state::Route;

/// Edits applied to the focused login field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginInput {
    Char(char),
    Backspace,
    ToggleFocus,
}

/// Edits applied to the demo-request email field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoInput {
    Char(char),
    Backspace,
}

#[derive(Debug)]
pub enum UiEvent {
    /// Animation clock.
    Tick,
    /// Raw terminal input.
    Terminal(Event),

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------
    /// Unmount the current view and mount `route`.
    Mount(Route),
    /// Request to leave the app.
    QuitRequested,

    // ------------------------------------------------------------------
    // Intents
    // ------------------------------------------------------------------
    BeginAnalysis,
    DismissResult,
    DismissWelcome,
    DismissNotice,
    RequestLogout,
    ConfirmLogout,
    CancelLogout,
    OpenInfo(InfoTopic),
    CloseInfo,
    LoginInput(LoginInput),
    SubmitLogin,
    FocusDemoRequest,
    BlurDemoRequest,
    DemoInput(DemoInput),
    SubmitDemoRequest,
    ResetDemoRequest,
    /// Leave for another route (user-driven, not a gate redirect).
    GoTo(Route),

    // ------------------------------------------------------------------
    // Task lifecycle
    // ------------------------------------------------------------------
    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },
    SessionResolved {
        task: TaskId,
        result: Result<Option<Session>, ProviderError>,
    },
    TimerElapsed {
        kind: TaskKind,
        task: TaskId,
    },
    SignInFinished {
        task: TaskId,
        result: Result<Session, ProviderError>,
    },
    SignOutFinished {
        task: TaskId,
        result: Result<(), ProviderError>,
    },
    /// Pushed by the provider subscription.
    SessionChanged(Option<SessionUser>),
}
