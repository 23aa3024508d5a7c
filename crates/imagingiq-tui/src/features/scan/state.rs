use std::time::Duration;

use tokio::time::Instant;

use crate::common::TransientFlag;

/// Stage labels shown while scanning, in order.
pub const SCAN_STAGES: [&str; 5] = [
    "Pre-processing",
    "Neural Network Analysis",
    "Pattern Recognition",
    "Confidence Scoring",
    "Report Generation",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Scanning {
        started_at: Instant,
        duration: Duration,
    },
    Complete,
}

impl ScanPhase {
    pub fn name(&self) -> &'static str {
        match self {
            ScanPhase::Idle => "idle",
            ScanPhase::Scanning { .. } => "scanning",
            ScanPhase::Complete => "complete",
        }
    }
}

/// Fixed outcome of a simulated scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub model: &'static str,
    pub summary: &'static str,
    pub confidence_pct: f32,
    pub findings: &'static [&'static str],
}

impl ScanReport {
    /// The report every simulated run produces. No input is inspected.
    pub fn simulated() -> Self {
        Self {
            model: "Deep Learning v4.2",
            summary: "No acute abnormality detected",
            confidence_pct: 99.2,
            findings: &[
                "No fracture or dislocation identified",
                "No focal lesion above detection threshold",
                "Heatmap attention within normal anatomical bounds",
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanState {
    pub phase: ScanPhase,
    /// Result panel; manual close only.
    pub result: TransientFlag,
    pub report: Option<ScanReport>,
}

impl Default for ScanState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanState {
    pub fn new() -> Self {
        Self {
            phase: ScanPhase::Idle,
            result: TransientFlag::manual(),
            report: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, ScanPhase::Idle)
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self.phase, ScanPhase::Scanning { .. })
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, ScanPhase::Complete)
    }

    /// Fraction of the scan delay elapsed at `now`, in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f64 {
        match self.phase {
            ScanPhase::Idle => 0.0,
            ScanPhase::Complete => 1.0,
            ScanPhase::Scanning {
                started_at,
                duration,
            } => {
                if duration.is_zero() {
                    return 1.0;
                }
                let elapsed = now.saturating_duration_since(started_at);
                (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
            }
        }
    }

    /// Label of the stage matching `progress`.
    pub fn stage(progress: f64) -> &'static str {
        let last = SCAN_STAGES.len() - 1;
        let index = (progress * SCAN_STAGES.len() as f64) as usize;
        SCAN_STAGES[index.min(last)]
    }
}
