//! Mock generation capabilities.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

use crate::capability::GenerationCapability;
use crate::errors::GenerationError;

/// Replays a scripted list of results and records every input.
pub struct ScriptedCapability {
    results: Mutex<VecDeque<Result<String, GenerationError>>>,
    inputs: Mutex<Vec<String>>,
}

impl ScriptedCapability {
    /// Creates a capability that replays `responses` in order.
    ///
    /// Calls beyond the scripted responses fail as malformed.
    #[must_use]
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_results(
            responses
                .into_iter()
                .map(|response| Ok(response.into()))
                .collect(),
        )
    }

    /// Creates a capability from explicit per-call results.
    #[must_use]
    pub fn from_results(results: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            results: Mutex::new(results.into_iter().collect()),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// Returns the inputs received so far, in call order.
    #[must_use]
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().clone()
    }

    /// Returns the number of calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.inputs.lock().len()
    }
}

#[async_trait]
impl GenerationCapability for ScriptedCapability {
    async fn generate(&self, input: &str) -> Result<String, GenerationError> {
        self.inputs.lock().push(input.to_string());
        self.results.lock().pop_front().unwrap_or_else(|| {
            Err(GenerationError::MalformedResponse(
                "scripted responses exhausted".to_string(),
            ))
        })
    }
}

/// Always fails with a transport error.
pub struct FailingCapability {
    message: String,
    call_count: Mutex<usize>,
}

impl FailingCapability {
    /// Creates a capability that fails with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            call_count: Mutex::new(0),
        }
    }

    /// Returns the number of calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.call_count.lock()
    }
}

#[async_trait]
impl GenerationCapability for FailingCapability {
    async fn generate(&self, _input: &str) -> Result<String, GenerationError> {
        *self.call_count.lock() += 1;
        Err(GenerationError::Transport(self.message.clone()))
    }
}

/// Echoes its input back.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoCapability;

#[async_trait]
impl GenerationCapability for EchoCapability {
    async fn generate(&self, input: &str) -> Result<String, GenerationError> {
        Ok(input.to_string())
    }
}

/// Sleeps before echoing, to exercise the suspension point.
pub struct SlowCapability {
    delay: Duration,
}

impl SlowCapability {
    /// Creates a capability that waits `delay` before answering.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Creates a slow capability with delay in milliseconds.
    #[must_use]
    pub fn with_delay_ms(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

#[async_trait]
impl GenerationCapability for SlowCapability {
    async fn generate(&self, input: &str) -> Result<String, GenerationError> {
        tokio::time::sleep(self.delay).await;
        Ok(input.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_replays_in_order_and_records_inputs() {
        let capability = ScriptedCapability::new(["one", "two"]);

        assert_eq!(capability.generate("a").await.ok(), Some("one".to_string()));
        assert_eq!(capability.generate("b").await.ok(), Some("two".to_string()));
        assert_eq!(capability.inputs(), vec!["a", "b"]);
        assert_eq!(capability.call_count(), 2);
    }

    #[tokio::test]
    async fn scripted_fails_when_exhausted() {
        let capability = ScriptedCapability::new(Vec::<String>::new());
        assert!(capability.generate("a").await.is_err());
    }

    #[tokio::test]
    async fn failing_capability_counts_calls() {
        let capability = FailingCapability::new("boom");

        assert!(capability.generate("a").await.is_err());
        assert!(capability.generate("b").await.is_err());
        assert_eq!(capability.call_count(), 2);
    }

    #[tokio::test]
    async fn echo_capability() {
        let output = EchoCapability.generate("mirror").await;
        assert_eq!(output.ok(), Some("mirror".to_string()));
    }

    #[tokio::test]
    async fn slow_capability_waits() {
        let capability = SlowCapability::with_delay_ms(10);
        let started = std::time::Instant::now();
        let output = capability.generate("later").await;

        assert_eq!(output.ok(), Some("later".to_string()));
        assert!(started.elapsed() >= Duration::from_millis(10));
    }
}
