//! Sign-in form reducer.

use imagingiq_core::error::ProviderError;
use imagingiq_core::session::Session;
use imagingiq_core::validation::validate_credentials;

use crate::common::{TaskId, TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::events::LoginInput;
use crate::nav::{self, NavState, Notice};
use crate::state::{Route, ViewState};

pub const LOGIN_SUCCEEDED: &str = "Login successful. Welcome back.";

/// Edits the form. Inputs are locked while a request is in flight.
pub fn apply_input(view: &mut ViewState, input: LoginInput) {
    if view.route != Route::Login || view.login.submitting {
        return;
    }
    view.login.apply(input);
}

/// Validates locally and sends one sign-in request.
pub fn submit(view: &mut ViewState, tasks: &mut Tasks, seq: &mut TaskSeq) -> Vec<UiEffect> {
    if view.route != Route::Login {
        return vec![];
    }
    let form = &mut view.login;
    if form.submitting {
        tracing::debug!("sign-in already in flight");
        return vec![];
    }
    if let Err(err) = validate_credentials(&form.email, &form.password) {
        form.error = Some(err.to_string());
        return vec![];
    }

    form.error = None;
    form.submitting = true;
    let task = seq.next_id();
    tasks.state_mut(TaskKind::SignIn).begin(task);
    vec![UiEffect::SignIn {
        task,
        email: form.email.trim().to_string(),
        password: form.password.clone(),
    }]
}

/// Applies the provider's answer to a sign-in request.
pub fn handle_sign_in_finished(
    view: &mut ViewState,
    nav: &mut NavState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    task: TaskId,
    result: Result<Session, ProviderError>,
) -> Vec<UiEffect> {
    if !tasks.state_mut(TaskKind::SignIn).finish_if_active(task) {
        tracing::debug!(?task, "discarding stale sign-in result");
        return vec![];
    }
    view.login.submitting = false;

    match result {
        Ok(session) => {
            tracing::info!(email = %session.user.email, "signed in");
            nav.user = Some(session.user);
            let mut effects = nav::show_notice(nav, tasks, seq, Notice::success(LOGIN_SUCCEEDED));
            effects.push(UiEffect::Navigate { to: Route::Home });
            effects
        }
        Err(err) => {
            tracing::info!(error = %err, "sign-in rejected");
            view.login.error = Some(format!("Login failed: {err}"));
            view.login.password.clear();
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use imagingiq_core::config::Config;
    use imagingiq_core::session::SessionUser;

    use super::*;
    use crate::state::MountId;

    fn login_view(email: &str, password: &str) -> ViewState {
        let mut view = ViewState::new(Route::Login, MountId(1), &Config::default());
        view.login.email = email.to_string();
        view.login.password = password.to_string();
        view
    }

    fn submitted(view: &mut ViewState, tasks: &mut Tasks, seq: &mut TaskSeq) -> TaskId {
        let effects = submit(view, tasks, seq);
        let [UiEffect::SignIn { task, email, .. }] = effects.as_slice() else {
            panic!("expected one sign-in, got {effects:?}");
        };
        assert_eq!(email, view.login.email.trim());
        *task
    }

    #[test]
    fn test_invalid_input_shows_inline_error() {
        let cases = [
            ("", "pw", "Email is required."),
            ("not-an-email", "pw", "Enter a valid email address."),
            ("a@b.com", "", "Password is required."),
        ];
        for (email, password, message) in cases {
            let mut view = login_view(email, password);
            let mut tasks = Tasks::default();

            let effects = submit(&mut view, &mut tasks, &mut TaskSeq::default());

            assert!(effects.is_empty());
            assert_eq!(view.login.error.as_deref(), Some(message));
            assert!(!view.login.submitting);
            assert!(!tasks.sign_in.is_running());
        }
    }

    #[test]
    fn test_repeated_submit_sends_one_request() {
        let mut view = login_view("a@b.com", "pw");
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();
        submitted(&mut view, &mut tasks, &mut seq);

        assert!(submit(&mut view, &mut tasks, &mut seq).is_empty());
        assert!(view.login.submitting);
    }

    #[test]
    fn test_success_notifies_and_goes_home() {
        let mut view = login_view("a@b.com", "pw");
        let mut nav = NavState::new(Duration::from_secs(4));
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();
        let task = submitted(&mut view, &mut tasks, &mut seq);

        let session = Session::active(SessionUser::new("a@b.com", None));
        let effects =
            handle_sign_in_finished(&mut view, &mut nav, &mut tasks, &mut seq, task, Ok(session));

        assert!(matches!(
            effects.as_slice(),
            [
                UiEffect::StartTimer {
                    kind: TaskKind::NoticeTimer,
                    ..
                },
                UiEffect::Navigate { to: Route::Home }
            ]
        ));
        assert!(nav.is_signed_in());
        assert_eq!(
            nav.visible_notice().map(|n| n.text.as_str()),
            Some(LOGIN_SUCCEEDED)
        );
    }

    #[test]
    fn test_failure_keeps_form_with_reason() {
        let mut view = login_view("a@b.com", "wrong");
        let mut nav = NavState::new(Duration::from_secs(4));
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();
        let task = submitted(&mut view, &mut tasks, &mut seq);

        let effects = handle_sign_in_finished(
            &mut view,
            &mut nav,
            &mut tasks,
            &mut seq,
            task,
            Err(ProviderError::InvalidCredentials),
        );

        assert!(effects.is_empty());
        assert!(!view.login.submitting);
        assert_eq!(
            view.login.error.as_deref(),
            Some("Login failed: Invalid login credentials")
        );
        assert_eq!(view.login.email, "a@b.com");
        assert!(!nav.is_signed_in());
    }

    #[test]
    fn test_inputs_locked_while_submitting() {
        let mut view = login_view("a@b.com", "pw");
        let mut tasks = Tasks::default();
        submitted(&mut view, &mut tasks, &mut TaskSeq::default());

        apply_input(&mut view, LoginInput::Char('x'));

        assert_eq!(view.login.password, "pw");
    }
}
