//! Simulated scan workflow (`idle → scanning → complete`).
//!
//! The scan is latency-bound and payload independent: a fixed timer moves it
//! to `complete` and the report is always the same.

mod render;
mod state;
mod update;

pub use render::render_scan_zone;
pub use state::{SCAN_STAGES, ScanPhase, ScanReport, ScanState};
pub use update::{begin_analysis, dismiss_result, handle_scan_timer};
