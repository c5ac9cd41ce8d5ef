//! Error taxonomy for the ad-script pipeline.
//!
//! Three layers of failure are kept distinct: capability errors (one
//! generation call), sink errors (event delivery), and run-level errors
//! (conditions that terminate the whole run). Stage-level failures are not
//! errors at all; they are folded into `StageOutcome` at the executor
//! boundary and never propagate.

use thiserror::Error;
use uuid::Uuid;

use crate::task::TaskStatus;

/// Errors produced by a generation capability.
///
/// The capability performs no retries; every variant describes a single
/// failed attempt.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The capability did not answer within its deadline.
    #[error("generation timed out after {seconds}s")]
    Timeout {
        /// The deadline that was exceeded.
        seconds: f64,
    },

    /// The provider rejected the request for quota reasons.
    #[error("generation quota exhausted")]
    RateLimited,

    /// The provider answered with a non-success HTTP status.
    #[error("generation request failed with status {status}")]
    Http {
        /// The HTTP status code.
        status: u16,
    },

    /// The request never reached the provider.
    #[error("generation transport error: {0}")]
    Transport(String),

    /// The provider answered with a body this crate cannot interpret.
    #[error("malformed generation response: {0}")]
    MalformedResponse(String),

    /// Any other capability-internal failure.
    #[error("generation failed: {0}")]
    Other(#[from] anyhow::Error),
}

/// Errors delivering an event to a progress sink.
#[derive(Debug, Clone, Error)]
pub enum SinkError {
    /// The consumer side of the sink is gone.
    #[error("progress sink closed: {0}")]
    Closed(String),
}

/// Errors from illegal task state transitions.
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    /// The task already reached a terminal state.
    #[error("task {task_id} is already {current}")]
    AlreadyFinal {
        /// The task's id.
        task_id: Uuid,
        /// The terminal state the task is in.
        current: TaskStatus,
    },

    /// The requested status is not a terminal status.
    #[error("{requested} is not a terminal status")]
    NotTerminal {
        /// The status that was requested.
        requested: TaskStatus,
    },
}

/// Run-level errors: conditions that end a pipeline run without a report.
///
/// Individual stage failures never appear here; the orchestrator recovers
/// them with fallback substitution.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The submitted request was missing or empty.
    #[error("empty pipeline request: nothing to generate from")]
    EmptyRequest,

    /// A progress or result event could not be delivered.
    #[error("{0}")]
    SinkDelivery(#[from] SinkError),

    /// The run was cancelled between stages.
    #[error("pipeline run cancelled: {reason}")]
    Cancelled {
        /// The first cancellation reason recorded.
        reason: String,
    },

    /// A task state transition was rejected.
    #[error("{0}")]
    Task(#[from] TaskError),
}
