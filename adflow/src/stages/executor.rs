//! Failure-isolating wrapper around single stage invocations.
//!
//! The executor is the boundary that keeps a failure in stage *k* from
//! aborting stages *k+1..n*: it never returns an error, converting every
//! capability failure and every blank output into a failed
//! [`StageOutcome`]. It applies no fallback and performs no retries - both
//! are the orchestrator's decisions.

use std::time::Instant;
use tracing::{debug, info, warn};

use super::{StageBinding, StageOutcome};
use crate::utils::{is_blank, strip_code_fences, truncate_for_log};

/// Executes stages against their bound capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageExecutor;

impl StageExecutor {
    /// Creates a new executor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Runs one stage to a [`StageOutcome`].
    pub async fn execute(&self, binding: &StageBinding, input: &str) -> StageOutcome {
        let stage = binding.definition.name;
        debug!(stage, input = %truncate_for_log(input, 50), "Executing stage");

        let started = Instant::now();
        let result = binding.capability.generate(input).await;
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(text) => {
                let text = strip_code_fences(&text);
                if is_blank(&text) {
                    warn!(stage, duration_ms, "Stage returned blank output");
                    StageOutcome::failed(stage, "capability returned blank output")
                        .with_duration_ms(duration_ms)
                } else {
                    info!(stage, duration_ms, output_chars = text.len(), "Stage completed");
                    StageOutcome::ok(stage, text).with_duration_ms(duration_ms)
                }
            }
            Err(err) => {
                warn!(stage, duration_ms, error = %err, "Stage failed");
                StageOutcome::failed(stage, err.to_string()).with_duration_ms(duration_ms)
            }
        }
    }
}
