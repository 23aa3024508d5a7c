//! Effect handlers.
//!
//! Each handler is a plain async function that races its work against the
//! task's cancellation token. A cancelled handler returns `None` and sends
//! nothing; otherwise it returns the event carrying its result.

use std::sync::Arc;
use std::time::Duration;

use imagingiq_core::session::{SessionProvider, SessionUser};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::inbox::UiEventSender;
use crate::common::{TaskId, TaskKind};
use crate::events::UiEvent;

/// Queries the provider for the mounted view's session gate.
pub async fn resolve_session(
    provider: Arc<dyn SessionProvider>,
    task: TaskId,
    cancel: CancellationToken,
) -> Option<UiEvent> {
    tokio::select! {
        () = cancel.cancelled() => {
            tracing::debug!(?task, "session query cancelled");
            None
        }
        result = provider.get_session() => Some(UiEvent::SessionResolved { task, result }),
    }
}

/// Sleeps for `after` and reports the elapsed timer.
pub async fn timer(
    kind: TaskKind,
    task: TaskId,
    after: Duration,
    cancel: CancellationToken,
) -> Option<UiEvent> {
    tokio::select! {
        () = cancel.cancelled() => None,
        () = tokio::time::sleep(after) => Some(UiEvent::TimerElapsed { kind, task }),
    }
}

pub async fn sign_in(
    provider: Arc<dyn SessionProvider>,
    task: TaskId,
    email: String,
    password: String,
    cancel: CancellationToken,
) -> Option<UiEvent> {
    tokio::select! {
        () = cancel.cancelled() => None,
        result = provider.sign_in(&email, &password) => {
            Some(UiEvent::SignInFinished { task, result })
        }
    }
}

pub async fn sign_out(
    provider: Arc<dyn SessionProvider>,
    task: TaskId,
    cancel: CancellationToken,
) -> Option<UiEvent> {
    tokio::select! {
        () = cancel.cancelled() => None,
        result = provider.sign_out() => Some(UiEvent::SignOutFinished { task, result }),
    }
}

/// Forwards provider session changes to the inbox until `shutdown`.
///
/// The current value is sent first so the chrome starts in sync.
pub async fn forward_session_changes(
    mut changes: watch::Receiver<Option<SessionUser>>,
    tx: UiEventSender,
    shutdown: CancellationToken,
) {
    let initial = changes.borrow_and_update().clone();
    if tx.send(UiEvent::SessionChanged(initial)).is_err() {
        return;
    }
    loop {
        tokio::select! {
            () = shutdown.cancelled() => break,
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let user = changes.borrow_and_update().clone();
                if tx.send(UiEvent::SessionChanged(user)).is_err() {
                    break;
                }
            }
        }
    }
}
