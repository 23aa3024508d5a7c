//! Demo-request reducer.

use std::time::Duration;

use imagingiq_core::validation::validate_demo_email;

use crate::common::{TaskId, TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::events::DemoInput;
use crate::state::{Route, ViewState};

/// Moves keyboard focus into the email field.
pub fn focus(view: &mut ViewState) {
    if view.route == Route::Home && !view.demo.is_locked() {
        view.demo.editing = true;
    }
}

pub fn blur(view: &mut ViewState) {
    view.demo.editing = false;
}

/// Edits the email field. Locked while in flight and once confirmed.
pub fn apply_input(view: &mut ViewState, input: DemoInput) {
    if view.route != Route::Home || !view.demo.editing || view.demo.is_locked() {
        return;
    }
    view.demo.apply(input);
}

/// Validates the address and starts the simulated request.
pub fn submit(
    view: &mut ViewState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    after: Duration,
) -> Vec<UiEffect> {
    if view.route != Route::Home {
        return vec![];
    }
    let form = &mut view.demo;
    if form.is_locked() {
        tracing::debug!(submitting = form.submitting, "demo request ignored");
        return vec![];
    }
    form.error = None;
    if let Err(err) = validate_demo_email(&form.email) {
        form.error = Some(err.to_string());
        return vec![];
    }

    form.submitting = true;
    let task = seq.next_id();
    tasks.state_mut(TaskKind::DemoRequest).begin(task);
    vec![UiEffect::StartTimer {
        kind: TaskKind::DemoRequest,
        task,
        after,
    }]
}

/// Completes the simulated request and shows the confirmation.
pub fn handle_demo_timer(
    view: &mut ViewState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    task: TaskId,
) -> Vec<UiEffect> {
    if !tasks.state_mut(TaskKind::DemoRequest).finish_if_active(task) {
        tracing::debug!(?task, "discarding stale demo request");
        return vec![];
    }
    let form = &mut view.demo;
    form.submitting = false;
    form.editing = false;
    tracing::info!(email = %form.email, "demo requested");
    form.submitted.show(tasks, seq)
}

/// Clears the form back to an empty, editable state.
pub fn reset(view: &mut ViewState, tasks: &mut Tasks) -> Vec<UiEffect> {
    let form = &mut view.demo;
    if form.submitting {
        return vec![];
    }
    form.email.clear();
    form.error = None;
    form.submitted.dismiss(tasks)
}
