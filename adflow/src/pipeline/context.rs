//! Per-run request and accumulated context.

use serde::{Deserialize, Serialize};

use crate::stages::StageOutcome;
use crate::utils::is_blank;

/// The raw input text submitted by a caller.
///
/// Immutable once accepted: created at submission, consumed by the first
/// stage, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRequest {
    text: String,
}

impl PipelineRequest {
    /// Wraps submitted text as a request.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the submitted text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true when there is nothing to generate from.
    ///
    /// Whitespace-only input counts as empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_blank(&self.text)
    }
}

impl From<&str> for PipelineRequest {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for PipelineRequest {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Accumulated state of one pipeline run.
///
/// Exclusively owned by its run; never shared across concurrent runs.
/// Outcomes are recorded in stage order.
#[derive(Debug, Clone)]
pub struct RunContext {
    request: PipelineRequest,
    outcomes: Vec<StageOutcome>,
}

impl RunContext {
    /// Creates the context for a freshly accepted request.
    #[must_use]
    pub fn new(request: PipelineRequest) -> Self {
        Self {
            request,
            outcomes: Vec::new(),
        }
    }

    /// Returns the originating request.
    #[must_use]
    pub fn request(&self) -> &PipelineRequest {
        &self.request
    }

    /// Records the outcome of the stage that just ran.
    pub fn record(&mut self, outcome: StageOutcome) {
        self.outcomes.push(outcome);
    }

    /// Returns all recorded outcomes, in stage order.
    #[must_use]
    pub fn outcomes(&self) -> &[StageOutcome] {
        &self.outcomes
    }

    /// Looks up an outcome by stage name.
    #[must_use]
    pub fn outcome(&self, stage_name: &str) -> Option<&StageOutcome> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.stage_name == stage_name)
    }

    /// Returns the names of failed stages, in stage order.
    #[must_use]
    pub fn failed_stage_names(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.is_failure())
            .map(|outcome| outcome.stage_name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_request_is_empty() {
        assert!(PipelineRequest::new("").is_empty());
        assert!(PipelineRequest::new("  \n\t ").is_empty());
        assert!(!PipelineRequest::new("EP 12 log").is_empty());
    }

    #[test]
    fn request_from_conversions() {
        let from_str: PipelineRequest = "show log".into();
        let from_string: PipelineRequest = String::from("show log").into();
        assert_eq!(from_str, from_string);
    }

    #[test]
    fn context_records_in_order() {
        let mut context = RunContext::new(PipelineRequest::new("log"));
        context.record(StageOutcome::ok("Structure", "S1"));
        context.record(StageOutcome::failed("Route-format", "boom").with_fallback("F2"));

        assert_eq!(context.outcomes().len(), 2);
        assert_eq!(context.outcome("Structure").map(|o| o.output.as_str()), Some("S1"));
        assert_eq!(context.failed_stage_names(), vec!["Route-format"]);
    }

    #[test]
    fn unknown_stage_lookup_is_none() {
        let context = RunContext::new(PipelineRequest::new("log"));
        assert!(context.outcome("Validate").is_none());
    }
}
