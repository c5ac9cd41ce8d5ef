//! The pipeline orchestrator: sequencing, fallback policy, and aggregation.

use std::sync::Arc;
use tracing::{info, warn};

use super::{FinalReport, PipelineRequest, RunContext};
use crate::cancellation::CancellationToken;
use crate::capability::GenerationCapability;
use crate::errors::{PipelineError, SinkError};
use crate::events::{ProgressEvent, ProgressSink, RunEvent};
use crate::stages::{bind_stages, standard_stages, StageBinding, StageDefinition, StageExecutor};
use crate::task::{Task, TaskStatus};

/// Owns the fixed stage sequence and drives requests through it.
///
/// Stage failures never abort a run: the failed outcome is substituted with
/// that stage's fallback so every downstream stage receives well-formed
/// text. Only run-level conditions - an empty request, a lost sink, or
/// cancellation - finalize the task as `Failed`; reaching the end of the
/// stage loop always finalizes it as `Completed`.
#[derive(Debug)]
pub struct PipelineOrchestrator {
    stages: Vec<StageBinding>,
    executor: StageExecutor,
}

impl PipelineOrchestrator {
    /// Creates an orchestrator over an explicit stage list.
    #[must_use]
    pub fn new(stages: Vec<StageBinding>) -> Self {
        Self {
            stages,
            executor: StageExecutor::new(),
        }
    }

    /// Creates the standard five-stage ad-script pipeline, binding each
    /// stage to the capability produced by `bind`.
    pub fn standard<F>(bind: F) -> Self
    where
        F: Fn(&StageDefinition) -> Arc<dyn GenerationCapability>,
    {
        Self::new(bind_stages(standard_stages(), bind))
    }

    /// Creates the standard pipeline with one capability shared by every
    /// stage.
    #[must_use]
    pub fn with_capability(capability: Arc<dyn GenerationCapability>) -> Self {
        Self::standard(|_| Arc::clone(&capability))
    }

    /// Returns the number of stages in the sequence.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Runs the pipeline to completion without cancellation.
    pub async fn run(
        &self,
        request: PipelineRequest,
        sink: &dyn ProgressSink,
        task: &Task,
    ) -> Result<FinalReport, PipelineError> {
        self.run_with_cancellation(request, sink, task, &CancellationToken::new())
            .await
    }

    /// Runs the pipeline, checking `token` between stages.
    ///
    /// An in-flight generation call is never interrupted; cancellation takes
    /// effect at the next stage boundary.
    pub async fn run_with_cancellation(
        &self,
        request: PipelineRequest,
        sink: &dyn ProgressSink,
        task: &Task,
        token: &CancellationToken,
    ) -> Result<FinalReport, PipelineError> {
        task.start()?;
        info!(task_id = %task.id(), "Pipeline run started");

        if request.is_empty() {
            warn!(task_id = %task.id(), "Rejecting empty request");
            return Err(self.fail_run(sink, task, PipelineError::EmptyRequest).await);
        }

        let total = self.stages.len();
        let mut context = RunContext::new(request);

        for (index, binding) in self.stages.iter().enumerate() {
            if token.is_cancelled() {
                let reason = token
                    .reason()
                    .unwrap_or_else(|| "cancellation requested".to_string());
                return Err(self
                    .fail_run(sink, task, PipelineError::Cancelled { reason })
                    .await);
            }

            let event = ProgressEvent::new(
                index + 1,
                total,
                binding.definition.name,
                binding.definition.progress_detail,
            );
            if let Err(err) = sink.send(RunEvent::Progress(event)).await {
                return Err(self.fail_sink_loss(task, err));
            }

            let input = self.composed_input(&context, index);
            let mut outcome = self.executor.execute(binding, &input).await;
            if outcome.is_failure() {
                outcome = outcome
                    .with_fallback(binding.definition.fallback_text(context.request().text()));
            }
            context.record(outcome);
        }

        let report = FinalReport::from_run(&context, &self.stages);
        if let Err(err) = sink.send(RunEvent::Report(report.clone())).await {
            return Err(self.fail_sink_loss(task, err));
        }

        task.finalize(TaskStatus::Completed)?;
        info!(
            task_id = %task.id(),
            warnings = report.warnings.len(),
            "Pipeline run completed"
        );
        Ok(report)
    }

    /// Composes the input for the stage at `index`.
    ///
    /// The first stage receives the raw request; every later stage receives
    /// all prior outputs, each labeled with its stage's context label.
    fn composed_input(&self, context: &RunContext, index: usize) -> String {
        if index == 0 {
            return context.request().text().to_string();
        }

        self.stages[..index]
            .iter()
            .zip(context.outcomes())
            .map(|(binding, outcome)| {
                format!("{}: {}", binding.definition.context_label, outcome.output)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Run-level failure path: one explanatory terminal event, then Failed.
    async fn fail_run(
        &self,
        sink: &dyn ProgressSink,
        task: &Task,
        error: PipelineError,
    ) -> PipelineError {
        let _ = sink
            .send(RunEvent::RunFailed {
                reason: error.to_string(),
            })
            .await;
        Self::finalize_failed(task);
        error
    }

    /// Sink loss: nothing more can be emitted; finalize and surface.
    fn fail_sink_loss(&self, task: &Task, err: SinkError) -> PipelineError {
        warn!(task_id = %task.id(), error = %err, "Progress sink lost; failing run");
        Self::finalize_failed(task);
        PipelineError::SinkDelivery(err)
    }

    fn finalize_failed(task: &Task) {
        if let Err(err) = task.finalize(TaskStatus::Failed) {
            warn!(error = %err, "Could not finalize task as failed");
        }
    }
}
