use tokio_util::sync::CancellationToken;

use crate::effects::UiEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

/// Monotonic task id source.
///
/// Lives at shell level so ids never repeat across view mounts; a result
/// carrying an id from a previous mount can never match an active task.
#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Session gate query for the mounted protected view.
    SessionQuery,
    /// Simulated scan delay.
    ScanTimer,
    /// Welcome toast auto-close.
    WelcomeTimer,
    /// Sign-in request from the login form.
    SignIn,
    /// Provider sign-out after logout confirmation.
    SignOut,
    /// Timed notice auto-close.
    NoticeTimer,
    /// Simulated demo-request round trip on the home view.
    DemoRequest,
}

impl TaskKind {
    pub const ALL: [TaskKind; 7] = [
        TaskKind::SessionQuery,
        TaskKind::ScanTimer,
        TaskKind::WelcomeTimer,
        TaskKind::SignIn,
        TaskKind::SignOut,
        TaskKind::NoticeTimer,
        TaskKind::DemoRequest,
    ];

    /// View-scoped tasks die with the view that started them.
    ///
    /// Shell-scoped tasks (sign-out, notices) outlive navigation and are only
    /// cancelled at shutdown.
    pub fn is_view_scoped(self) -> bool {
        matches!(
            self,
            TaskKind::SessionQuery
                | TaskKind::ScanTimer
                | TaskKind::WelcomeTimer
                | TaskKind::SignIn
                | TaskKind::DemoRequest
        )
    }
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Marks `id` as the active task before the runtime has spawned it.
    pub fn begin(&mut self, id: TaskId) {
        self.active = Some(id);
        self.cancel = None;
    }

    /// Records the cancel token once the runtime reports the spawn.
    ///
    /// Returns `false` if `started` is not the active task anymore.
    pub fn on_started(&mut self, started: &TaskStarted) -> bool {
        let ok = self.active == Some(started.id);
        if ok {
            self.cancel.clone_from(&started.cancel);
        }
        ok
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.clear();
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.cancel = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub session_query: TaskState,
    pub scan_timer: TaskState,
    pub welcome_timer: TaskState,
    pub sign_in: TaskState,
    pub sign_out: TaskState,
    pub notice_timer: TaskState,
    pub demo_request: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::SessionQuery => &self.session_query,
            TaskKind::ScanTimer => &self.scan_timer,
            TaskKind::WelcomeTimer => &self.welcome_timer,
            TaskKind::SignIn => &self.sign_in,
            TaskKind::SignOut => &self.sign_out,
            TaskKind::NoticeTimer => &self.notice_timer,
            TaskKind::DemoRequest => &self.demo_request,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::SessionQuery => &mut self.session_query,
            TaskKind::ScanTimer => &mut self.scan_timer,
            TaskKind::WelcomeTimer => &mut self.welcome_timer,
            TaskKind::SignIn => &mut self.sign_in,
            TaskKind::SignOut => &mut self.sign_out,
            TaskKind::NoticeTimer => &mut self.notice_timer,
            TaskKind::DemoRequest => &mut self.demo_request,
        }
    }

    pub fn is_any_running(&self) -> bool {
        TaskKind::ALL.iter().any(|kind| self.state(*kind).is_running())
    }

    /// Stops tracking a running task and returns the effect that cancels it.
    ///
    /// Returns `None` when no task of `kind` is active.
    pub fn cancel(&mut self, kind: TaskKind) -> Option<UiEffect> {
        let state = self.state_mut(kind);
        if !state.is_running() {
            return None;
        }
        let token = state.cancel.take();
        state.clear();
        Some(UiEffect::CancelTask { kind, token })
    }

    /// Cancels every running view-scoped task (used on unmount).
    pub fn cancel_view_tasks(&mut self) -> Vec<UiEffect> {
        TaskKind::ALL
            .into_iter()
            .filter(|kind| kind.is_view_scoped())
            .filter_map(|kind| self.cancel(kind))
            .collect()
    }
}
