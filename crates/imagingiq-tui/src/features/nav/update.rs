//! Navigation chrome reducer.

use imagingiq_core::error::{ProviderError, SignOutError};
use imagingiq_core::session::SessionUser;

use super::{NavState, Notice, NoticeLevel};
use crate::common::{ClosePolicy, TaskId, TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::overlays::InfoTopic;
use crate::state::Route;

pub const SIGN_OUT_FAILED: &str = "Error signing out. Please try again.";

/// Opens the logout confirmation.
///
/// Ignored when nobody is signed in or a sign-out is already in flight.
pub fn request_logout(
    nav: &mut NavState,
    signed_in: bool,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
) -> Vec<UiEffect> {
    if !signed_in || tasks.sign_out.is_running() {
        tracing::debug!(signed_in, "logout request ignored");
        return vec![];
    }
    nav.info = None;
    nav.logout.show(tasks, seq)
}

pub fn cancel_logout(nav: &mut NavState, tasks: &mut Tasks) -> Vec<UiEffect> {
    nav.logout.dismiss(tasks)
}

/// Hides the modal and asks the provider to end the session.
pub fn confirm_logout(nav: &mut NavState, tasks: &mut Tasks, seq: &mut TaskSeq) -> Vec<UiEffect> {
    if !nav.logout.is_visible() {
        return vec![];
    }
    let mut effects = nav.logout.dismiss(tasks);
    if tasks.sign_out.is_running() {
        return effects;
    }
    let task = seq.next_id();
    tasks.state_mut(TaskKind::SignOut).begin(task);
    effects.push(UiEffect::SignOut { task });
    effects
}

/// Clears the local session and goes home, whatever the provider said.
///
/// A failure is logged and surfaced as a notice that stays until dismissed.
pub fn handle_sign_out_finished(
    nav: &mut NavState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    task: TaskId,
    result: Result<(), ProviderError>,
) -> Vec<UiEffect> {
    if !tasks.state_mut(TaskKind::SignOut).finish_if_active(task) {
        tracing::debug!(?task, "discarding stale sign-out result");
        return vec![];
    }

    nav.user = None;
    let mut effects = vec![];
    match result.map_err(SignOutError::from) {
        Ok(()) => tracing::info!("signed out"),
        Err(err) => {
            tracing::warn!(error = %err, "sign-out failed; clearing local session anyway");
            effects.extend(show_notice(nav, tasks, seq, Notice::error(SIGN_OUT_FAILED)));
        }
    }
    effects.push(UiEffect::Navigate { to: Route::Home });
    effects
}

/// Opens `topic`, replacing any other informational overlay.
pub fn open_info(nav: &mut NavState, topic: InfoTopic) {
    nav.info = Some(topic);
}

pub fn close_info(nav: &mut NavState) {
    nav.info = None;
}

/// Shows `notice`. Success notices close on their own, errors wait for the user.
pub fn show_notice(
    nav: &mut NavState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    notice: Notice,
) -> Vec<UiEffect> {
    let policy = match notice.level {
        NoticeLevel::Success => ClosePolicy::Timed(nav.notice_after),
        NoticeLevel::Error => ClosePolicy::Manual,
    };
    nav.notice.set_policy(policy);
    nav.notice_content = Some(notice);
    nav.notice.show(tasks, seq)
}

pub fn dismiss_notice(nav: &mut NavState, tasks: &mut Tasks) -> Vec<UiEffect> {
    nav.notice_content = None;
    nav.notice.dismiss(tasks)
}

pub fn handle_notice_timer(nav: &mut NavState, tasks: &mut Tasks, task: TaskId) {
    if nav.notice.on_timer(tasks, task) {
        nav.notice_content = None;
    }
}

/// Applies a change pushed by the provider subscription.
pub fn session_changed(nav: &mut NavState, user: Option<SessionUser>) {
    tracing::debug!(signed_in = user.is_some(), "session changed");
    nav.user = user;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const NOTICE: Duration = Duration::from_secs(4);

    fn signed_in_nav() -> NavState {
        let mut nav = NavState::new(NOTICE);
        nav.user = Some(SessionUser::new("a@b.com", None));
        nav
    }

    fn confirm(nav: &mut NavState, tasks: &mut Tasks, seq: &mut TaskSeq) -> TaskId {
        request_logout(nav, true, tasks, seq);
        assert!(nav.logout.is_visible());
        let effects = confirm_logout(nav, tasks, seq);
        let [UiEffect::SignOut { task }] = effects.as_slice() else {
            panic!("expected one sign-out, got {effects:?}");
        };
        assert!(!nav.logout.is_visible());
        *task
    }

    #[test]
    fn test_logout_requires_a_user() {
        let mut nav = NavState::new(NOTICE);
        let mut tasks = Tasks::default();
        request_logout(&mut nav, false, &mut tasks, &mut TaskSeq::default());
        assert!(!nav.logout.is_visible());
    }

    #[test]
    fn test_cancel_logout_keeps_session() {
        let mut nav = signed_in_nav();
        let mut tasks = Tasks::default();
        request_logout(&mut nav, true, &mut tasks, &mut TaskSeq::default());

        cancel_logout(&mut nav, &mut tasks);

        assert!(!nav.logout.is_visible());
        assert!(nav.is_signed_in());
        assert!(!tasks.sign_out.is_running());
    }

    #[test]
    fn test_sign_out_success_redirects_home() {
        let mut nav = signed_in_nav();
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();
        let task = confirm(&mut nav, &mut tasks, &mut seq);

        let effects = handle_sign_out_finished(&mut nav, &mut tasks, &mut seq, task, Ok(()));

        assert!(!nav.is_signed_in());
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::Navigate { to: Route::Home }]
        ));
        assert!(nav.visible_notice().is_none());
    }

    #[test]
    fn test_sign_out_failure_still_clears_and_shows_notice() {
        let mut nav = signed_in_nav();
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();
        let task = confirm(&mut nav, &mut tasks, &mut seq);

        let effects = handle_sign_out_finished(
            &mut nav,
            &mut tasks,
            &mut seq,
            task,
            Err(ProviderError::Unavailable("offline".to_string())),
        );

        assert!(!nav.is_signed_in());
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::Navigate { to: Route::Home }]
        ));
        let notice = nav.visible_notice().expect("error notice");
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.text, SIGN_OUT_FAILED);
        // Manual: no auto-close timer.
        assert!(!tasks.notice_timer.is_running());

        dismiss_notice(&mut nav, &mut tasks);
        assert!(nav.visible_notice().is_none());
    }

    #[test]
    fn test_success_notice_auto_closes() {
        let mut nav = NavState::new(NOTICE);
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();

        let effects = show_notice(&mut nav, &mut tasks, &mut seq, Notice::success("ok"));
        let [UiEffect::StartTimer { task, after, .. }] = effects.as_slice() else {
            panic!("expected notice timer, got {effects:?}");
        };
        assert_eq!(*after, NOTICE);

        handle_notice_timer(&mut nav, &mut tasks, *task);
        assert!(nav.visible_notice().is_none());
    }

    #[test]
    fn test_info_topics_are_exclusive() {
        let mut nav = NavState::new(NOTICE);
        open_info(&mut nav, InfoTopic::Features);
        open_info(&mut nav, InfoTopic::About);
        assert_eq!(nav.info, Some(InfoTopic::About));
        close_info(&mut nav);
        assert_eq!(nav.info, None);
    }

    #[test]
    fn test_session_changed_updates_badge() {
        let mut nav = NavState::new(NOTICE);
        session_changed(&mut nav, Some(SessionUser::new("a@b.com", None)));
        assert!(nav.is_signed_in());
        session_changed(&mut nav, None);
        assert!(!nav.is_signed_in());
    }
}
