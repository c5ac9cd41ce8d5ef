//! Stage outcome type produced by the executor.

use serde::{Deserialize, Serialize};

use crate::utils::iso_timestamp;

/// The recorded result of one stage invocation.
///
/// Owned by the run that produced it; discarded with the run context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageOutcome {
    /// Name of the stage that produced this outcome.
    pub stage_name: String,

    /// Whether the stage produced usable output.
    pub success: bool,

    /// The stage's output, or the substituted fallback after a failure.
    pub output: String,

    /// Failure detail when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,

    /// Wall-clock duration of the capability call in milliseconds.
    pub duration_ms: f64,

    /// When the outcome was recorded (ISO 8601).
    pub finished_at: String,
}

impl StageOutcome {
    /// Creates a successful outcome.
    #[must_use]
    pub fn ok(stage_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            stage_name: stage_name.into(),
            success: true,
            output: output.into(),
            error_detail: None,
            duration_ms: 0.0,
            finished_at: iso_timestamp(),
        }
    }

    /// Creates a failed outcome with empty output.
    ///
    /// The output stays empty until the orchestrator substitutes the stage's
    /// fallback.
    #[must_use]
    pub fn failed(stage_name: impl Into<String>, error_detail: impl Into<String>) -> Self {
        Self {
            stage_name: stage_name.into(),
            success: false,
            output: String::new(),
            error_detail: Some(error_detail.into()),
            duration_ms: 0.0,
            finished_at: iso_timestamp(),
        }
    }

    /// Sets the capability call duration.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Substitutes `fallback` as the downstream-visible output.
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.output = fallback.into();
        self
    }

    /// Returns true if the stage failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.success
    }
}
