//! Scan workflow reducer.

use std::time::Duration;

use tokio::time::Instant;

use super::{ScanPhase, ScanReport};
use crate::common::{TaskId, TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::state::ViewState;

/// Handles the begin-analysis intent.
///
/// Only an authorized view in `Idle` starts a scan. Anything else is a
/// no-op and schedules nothing, so a repeated trigger can never stack timers.
/// `now` stamps the start of the progress bar.
pub fn begin_analysis(
    view: &mut ViewState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    duration: Duration,
    now: Instant,
) -> Vec<UiEffect> {
    if !view.is_authorized() {
        tracing::debug!(route = %view.route, "begin analysis ignored: view not authorized");
        return vec![];
    }
    if !view.scan.is_idle() {
        tracing::debug!(phase = view.scan.phase.name(), "begin analysis ignored");
        return vec![];
    }

    let task = seq.next_id();
    tasks.state_mut(TaskKind::ScanTimer).begin(task);
    view.scan.phase = ScanPhase::Scanning {
        started_at: now,
        duration,
    };
    tracing::info!(?duration, "scan started");

    vec![UiEffect::StartTimer {
        kind: TaskKind::ScanTimer,
        task,
        after: duration,
    }]
}

/// Moves `Scanning → Complete` when the scan timer fires.
pub fn handle_scan_timer(
    view: &mut ViewState,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    task: TaskId,
) -> Vec<UiEffect> {
    if !tasks.state_mut(TaskKind::ScanTimer).finish_if_active(task) {
        tracing::debug!(?task, "discarding stale scan timer");
        return vec![];
    }
    if !view.scan.is_scanning() {
        return vec![];
    }

    view.scan.phase = ScanPhase::Complete;
    view.scan.report = Some(ScanReport::simulated());
    tracing::info!("scan complete");
    view.scan.result.show(tasks, seq)
}

/// Closes the result panel and resets the workflow to `Idle`.
pub fn dismiss_result(view: &mut ViewState, tasks: &mut Tasks) -> Vec<UiEffect> {
    if !view.scan.is_complete() {
        return vec![];
    }
    let effects = view.scan.result.dismiss(tasks);
    view.scan.phase = ScanPhase::Idle;
    view.scan.report = None;
    effects
}

#[cfg(test)]
mod tests {
    use imagingiq_core::config::Config;
    use imagingiq_core::session::{Session, SessionUser};

    use super::*;
    use crate::gate::SessionState;
    use crate::state::{MountId, Route};

    const SCAN: Duration = Duration::from_secs(6);

    fn authorized_view() -> ViewState {
        let mut view = ViewState::new(Route::Dashboard, MountId(1), &Config::default());
        view.gate = Some(SessionState::Authorized(Session::active(SessionUser::new(
            "a@b.com", None,
        ))));
        view
    }

    fn start(view: &mut ViewState, tasks: &mut Tasks, seq: &mut TaskSeq) -> TaskId {
        let effects = begin_analysis(view, tasks, seq, SCAN, Instant::now());
        let [UiEffect::StartTimer { task, after, .. }] = effects.as_slice() else {
            panic!("expected one scan timer, got {effects:?}");
        };
        assert_eq!(*after, SCAN);
        *task
    }

    #[test]
    fn test_phase_sequence_idle_scanning_complete() {
        let mut view = authorized_view();
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();
        assert!(view.scan.is_idle());

        let task = start(&mut view, &mut tasks, &mut seq);
        assert!(view.scan.is_scanning());
        assert!(!view.scan.result.is_visible());

        handle_scan_timer(&mut view, &mut tasks, &mut seq, task);
        assert!(view.scan.is_complete());
        assert!(view.scan.result.is_visible());
        assert_eq!(view.scan.report, Some(ScanReport::simulated()));
    }

    #[test]
    fn test_progress_runs_from_supplied_start() {
        let mut view = authorized_view();
        let mut tasks = Tasks::default();
        let at = Instant::now();

        begin_analysis(&mut view, &mut tasks, &mut TaskSeq::default(), SCAN, at);

        assert_eq!(
            view.scan.phase,
            ScanPhase::Scanning {
                started_at: at,
                duration: SCAN
            }
        );
        assert!(view.scan.progress(at).abs() < f64::EPSILON);
        assert!((view.scan.progress(at + SCAN / 2) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_begin_while_scanning_is_noop() {
        let mut view = authorized_view();
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();
        let task = start(&mut view, &mut tasks, &mut seq);

        let effects = begin_analysis(&mut view, &mut tasks, &mut seq, SCAN, Instant::now());

        assert!(effects.is_empty());
        assert!(view.scan.is_scanning());
        assert_eq!(tasks.scan_timer.active, Some(task));
    }

    #[test]
    fn test_begin_requires_authorized_gate() {
        let mut view = ViewState::new(Route::Dashboard, MountId(1), &Config::default());
        view.gate = Some(SessionState::Pending);
        let mut tasks = Tasks::default();

        let effects = begin_analysis(
            &mut view,
            &mut tasks,
            &mut TaskSeq::default(),
            SCAN,
            Instant::now(),
        );

        assert!(effects.is_empty());
        assert!(view.scan.is_idle());
        assert!(!tasks.scan_timer.is_running());
    }

    #[test]
    fn test_begin_while_complete_is_noop() {
        let mut view = authorized_view();
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();
        let task = start(&mut view, &mut tasks, &mut seq);
        handle_scan_timer(&mut view, &mut tasks, &mut seq, task);

        assert!(begin_analysis(&mut view, &mut tasks, &mut seq, SCAN, Instant::now()).is_empty());
        assert!(view.scan.is_complete());
    }

    #[test]
    fn test_stale_timer_does_not_complete() {
        let mut view = authorized_view();
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();
        start(&mut view, &mut tasks, &mut seq);

        handle_scan_timer(&mut view, &mut tasks, &mut seq, TaskId(999));

        assert!(view.scan.is_scanning());
    }

    #[test]
    fn test_dismiss_result_resets_to_idle() {
        let mut view = authorized_view();
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();
        let task = start(&mut view, &mut tasks, &mut seq);
        handle_scan_timer(&mut view, &mut tasks, &mut seq, task);

        dismiss_result(&mut view, &mut tasks);

        assert!(view.scan.is_idle());
        assert!(!view.scan.result.is_visible());
        assert!(view.scan.report.is_none());
        // A fresh scan can start again.
        start(&mut view, &mut tasks, &mut seq);
        assert!(view.scan.is_scanning());
    }
}
