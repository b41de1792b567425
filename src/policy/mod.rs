//! Pass/fail policy and exit codes
//!
//! The badge color and the process exit code are both derived from the
//! same [`Verdict`], so they cannot disagree.

use serde::{Deserialize, Serialize};

/// Outcome of a run against the failure threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Failure ratio below the threshold
    Pass,
    /// Failure ratio at or above the threshold
    Fail,
}

impl Verdict {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Verdict::Pass => ExitCode::Success,
            Verdict::Fail => ExitCode::Failure,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Judge a failure ratio against the threshold
pub fn evaluate(failure_ratio: f64, threshold: f64) -> Verdict {
    if failure_ratio >= threshold {
        Verdict::Fail
    } else {
        Verdict::Pass
    }
}

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ExitCode {
    /// Ratio below threshold, including empty catalogs
    #[default]
    Success = 0,
    /// Threshold breached, or the run could not complete
    Failure = 1,
}

impl ExitCode {
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExitCode::Success)
    }
}
