//! Headless shell driver.
//!
//! Owns the state, the inbox, and the provider, and executes effects. The
//! terminal runtime wraps it with input polling and rendering; tests use it
//! directly under a paused tokio clock.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use imagingiq_core::config::Config;
use imagingiq_core::session::SessionProvider;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::handlers;
use super::inbox::{UiEventReceiver, UiEventSender};
use crate::common::{TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, Route};
use crate::update;

pub struct Driver {
    pub state: AppState,
    provider: Arc<dyn SessionProvider>,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    /// Every navigation executed, in order (including the start route).
    history: Vec<Route>,
    /// Parent of every task token; cancelled on quit and drop.
    shutdown: CancellationToken,
}

impl Driver {
    pub fn new(config: Config, provider: Arc<dyn SessionProvider>) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(config),
            provider,
            inbox_tx,
            inbox_rx,
            history: Vec::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Subscribes to session changes and mounts `route`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, route: Route) {
        let changes = self.provider.subscribe();
        tokio::spawn(handlers::forward_session_changes(
            changes,
            self.inbox_tx.clone(),
            self.shutdown.child_token(),
        ));
        self.execute_effects(vec![UiEffect::Navigate { to: route }]);
    }

    pub fn route(&self) -> Route {
        self.state.view.route
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    /// Runs `event` through the reducer and executes the resulting effects.
    pub fn dispatch(&mut self, event: UiEvent) {
        self.state.now = Instant::now();
        let effects = update::update(&mut self.state, event);
        self.execute_effects(effects);
    }

    /// Dispatches every event already waiting in the inbox.
    ///
    /// Returns how many events were processed.
    pub fn drain_inbox(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.inbox_rx.try_recv() {
            self.dispatch(event);
            processed += 1;
        }
        processed
    }

    /// Processes inbox events as they arrive until `span` has elapsed.
    pub async fn run_for(&mut self, span: Duration) {
        let deadline = Instant::now() + span;
        loop {
            tokio::select! {
                biased;
                event = self.inbox_rx.recv() => match event {
                    Some(event) => self.dispatch(event),
                    None => break,
                },
                () = tokio::time::sleep_until(deadline) => break,
            }
        }
    }

    /// Cancels every outstanding task, view-scoped or not.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        // Navigation feeds new effects back in; keep them in order.
        let mut queue: VecDeque<UiEffect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            queue.extend(self.execute_effect(effect));
        }
    }

    /// Executes a single effect, returning follow-up effects from navigation.
    fn execute_effect(&mut self, effect: UiEffect) -> Vec<UiEffect> {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
                self.shutdown();
            }
            UiEffect::Navigate { to } => {
                self.history.push(to);
                return update::update(&mut self.state, UiEvent::Mount(to));
            }
            UiEffect::CancelTask { token, .. } => {
                if let Some(cancel) = token {
                    cancel.cancel();
                }
            }
            UiEffect::ResolveSession { task } => {
                let provider = Arc::clone(&self.provider);
                self.spawn_task(TaskKind::SessionQuery, task, move |cancel| {
                    handlers::resolve_session(provider, task, cancel)
                });
            }
            UiEffect::StartTimer { kind, task, after } => {
                self.spawn_task(kind, task, move |cancel| {
                    handlers::timer(kind, task, after, cancel)
                });
            }
            UiEffect::SignIn {
                task,
                email,
                password,
            } => {
                let provider = Arc::clone(&self.provider);
                self.spawn_task(TaskKind::SignIn, task, move |cancel| {
                    handlers::sign_in(provider, task, email, password, cancel)
                });
            }
            UiEffect::SignOut { task } => {
                let provider = Arc::clone(&self.provider);
                self.spawn_task(TaskKind::SignOut, task, move |cancel| {
                    handlers::sign_out(provider, task, cancel)
                });
            }
        }
        vec![]
    }

    /// Spawns a task with the `TaskStarted` / result lifecycle.
    ///
    /// `TaskStarted` goes through the inbox ahead of the result, so the
    /// reducer always records the token before it can see the outcome.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Option<UiEvent>> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = self.shutdown.child_token();
        let started = TaskStarted {
            id,
            cancel: Some(cancel.clone()),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        let fut = f(cancel);
        tokio::spawn(async move {
            if let Some(event) = fut.await {
                let _ = tx.send(event);
            }
        });
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
