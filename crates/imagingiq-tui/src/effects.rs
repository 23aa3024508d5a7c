//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O, timers and navigation only (no direct UI mutations).
//!
//! ## Cancellation Effects
//!
//! Cancellation is initiated from the reducer via `UiEffect::CancelTask`.
//! The runtime executes these by calling `token.cancel()` on the provided token.
//! The reducer decides when to cancel, the runtime executes.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};
use crate::state::Route;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Query the session provider for the mounted protected view.
    ResolveSession { task: TaskId },

    /// Fire `UiEvent::TimerElapsed` for `task` after `after`.
    StartTimer {
        kind: TaskKind,
        task: TaskId,
        after: Duration,
    },

    /// Exchange credentials for a session.
    SignIn {
        task: TaskId,
        email: String,
        password: String,
    },

    /// End the provider session.
    SignOut { task: TaskId },

    /// Unmount the current view and mount `to`.
    Navigate { to: Route },

    /// Cancel an in-progress task.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}
