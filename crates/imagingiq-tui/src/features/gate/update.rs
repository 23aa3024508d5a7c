//! Session gate reducer.

use imagingiq_core::error::ProviderError;
use imagingiq_core::session::{self, Session};

use super::SessionState;
use crate::common::{TaskId, TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::state::{Route, TabSession, ViewState};

/// Starts the gate for a freshly mounted view.
///
/// Public routes get no gate. Protected routes start `Pending` and issue
/// exactly one session query.
pub fn mount(
    route: Route,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
) -> (Option<SessionState>, Vec<UiEffect>) {
    if !route.is_protected() {
        return (None, vec![]);
    }
    let task = seq.next_id();
    tasks.state_mut(TaskKind::SessionQuery).begin(task);
    (
        Some(SessionState::Pending),
        vec![UiEffect::ResolveSession { task }],
    )
}

/// Applies the provider's answer to the mounted view's gate.
///
/// Results for any task other than the active query (an earlier mount, or a
/// query already answered) are dropped without touching state.
pub fn handle_session_resolved(
    view: &mut ViewState,
    tab: &mut TabSession,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    task: TaskId,
    result: Result<Option<Session>, ProviderError>,
) -> Vec<UiEffect> {
    if !tasks.state_mut(TaskKind::SessionQuery).finish_if_active(task) {
        tracing::debug!(?task, "discarding stale session result");
        return vec![];
    }
    let Some(gate) = view.gate.as_mut() else {
        return vec![];
    };

    match session::classify(result) {
        Ok(session) => {
            tracing::debug!(route = %view.route, email = %session.user.email, "session gate authorized");
            *gate = SessionState::Authorized(session);
            if view.route.arms_welcome() && tab.take_first_welcome() {
                view.welcome.show(tasks, seq)
            } else {
                vec![]
            }
        }
        Err(err) => {
            tracing::debug!(route = %view.route, error = %err, "session gate failed closed");
            *gate = SessionState::Unauthorized;
            vec![UiEffect::Navigate { to: Route::Login }]
        }
    }
}
