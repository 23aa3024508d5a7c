//! Self-expiring visibility flags (toasts, notices, modals).
//!
//! A flag is `hidden ⇄ visible` with one of two close policies:
//! - manual: hides only on explicit dismissal
//! - timed: also hides after a fixed delay
//!
//! The auto-close timer is an ordinary task of the flag's `TaskKind`, so it
//! is cancelled on dismissal and on unmount like any other task. Manual-only
//! flags own no task kind and never touch `Tasks`.

use std::time::Duration;

use crate::common::{TaskId, TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosePolicy {
    Manual,
    Timed(Duration),
}

#[derive(Debug, Clone)]
pub struct TransientFlag {
    visible: bool,
    policy: ClosePolicy,
    timer: Option<TaskKind>,
}

impl TransientFlag {
    /// Flag closed only by the user.
    pub fn manual() -> Self {
        Self {
            visible: false,
            policy: ClosePolicy::Manual,
            timer: None,
        }
    }

    /// Flag that also closes `after` the last `show`, timed by tasks of `timer`.
    pub fn timed(timer: TaskKind, after: Duration) -> Self {
        Self {
            visible: false,
            policy: ClosePolicy::Timed(after),
            timer: Some(timer),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn policy(&self) -> ClosePolicy {
        self.policy
    }

    /// Switches the policy for the next `show`.
    ///
    /// Has no effect on a flag built with `manual`, which owns no timer.
    pub fn set_policy(&mut self, policy: ClosePolicy) {
        if self.timer.is_some() {
            self.policy = policy;
        }
    }

    /// Makes the flag visible, (re)starting the auto-close timer if timed.
    pub fn show(&mut self, tasks: &mut Tasks, seq: &mut TaskSeq) -> Vec<UiEffect> {
        self.visible = true;
        let Some(kind) = self.timer else {
            return vec![];
        };
        let mut effects: Vec<UiEffect> = tasks.cancel(kind).into_iter().collect();
        if let ClosePolicy::Timed(after) = self.policy {
            let task = seq.next_id();
            tasks.state_mut(kind).begin(task);
            effects.push(UiEffect::StartTimer { kind, task, after });
        }
        effects
    }

    /// Hides the flag on explicit user action.
    ///
    /// A pending auto-close timer is cancelled so it cannot fire later.
    pub fn dismiss(&mut self, tasks: &mut Tasks) -> Vec<UiEffect> {
        self.visible = false;
        self.timer
            .and_then(|kind| tasks.cancel(kind))
            .into_iter()
            .collect()
    }

    /// Applies an elapsed auto-close timer. Stale timers are ignored.
    ///
    /// Returns whether the flag was hidden by this call.
    pub fn on_timer(&mut self, tasks: &mut Tasks, task: TaskId) -> bool {
        let Some(kind) = self.timer else {
            return false;
        };
        if !tasks.state_mut(kind).finish_if_active(task) {
            return false;
        }
        let was_visible = self.visible;
        self.visible = false;
        was_visible
    }
}
