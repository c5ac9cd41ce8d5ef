//! Progress events and the sinks that deliver them.
//!
//! A run owns one point-to-point event channel: the orchestrator is the
//! single producer and events must reach the consumer in emission order.
//! Events are fire-and-forget; there is no acknowledgment.

mod sink;

pub use sink::{event_stream, ChannelSink, CollectingSink, LoggingSink, NoOpSink, ProgressSink};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pipeline::FinalReport;

/// An ordered notification that a stage is about to execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// 1-based position of the stage in the run.
    pub sequence_index: usize,
    /// Total number of stages in the run.
    pub total_stages: usize,
    /// Name of the stage that is starting.
    pub label: String,
    /// Human-readable description of the work.
    pub detail: String,
}

impl ProgressEvent {
    /// Creates a new progress event.
    #[must_use]
    pub fn new(
        sequence_index: usize,
        total_stages: usize,
        label: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            sequence_index,
            total_stages,
            label: label.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}/{}] {}",
            self.sequence_index, self.total_stages, self.detail
        )
    }
}

/// Everything the orchestrator pushes to a run's sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    /// A stage is about to execute.
    Progress(ProgressEvent),
    /// The aggregated final report; the run's one terminal success event.
    Report(FinalReport),
    /// The run ended without a report.
    RunFailed {
        /// Why the run ended.
        reason: String,
    },
}

impl RunEvent {
    /// Returns true for the events after which a run emits nothing more.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Report(_) | Self::RunFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn progress_event_display() {
        let event = ProgressEvent::new(1, 5, "Structure", "Analyzing show structure...");
        assert_eq!(event.to_string(), "[1/5] Analyzing show structure...");
    }

    #[test]
    fn run_event_terminality() {
        let progress = RunEvent::Progress(ProgressEvent::new(2, 5, "Route-format", "..."));
        assert!(!progress.is_terminal());

        let failed = RunEvent::RunFailed {
            reason: "empty request".to_string(),
        };
        assert!(failed.is_terminal());
    }

    #[test]
    fn run_event_serializes_with_tag() {
        let event = RunEvent::RunFailed {
            reason: "sink closed".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "run_failed");
        assert_eq!(json["reason"], "sink closed");
    }

    #[test]
    fn progress_event_round_trip() {
        let event = ProgressEvent::new(3, 5, "Define-speakers", "Creating speaker profiles...");
        let json = serde_json::to_string(&event).unwrap();
        let round_trip: ProgressEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event, round_trip);
    }
}
