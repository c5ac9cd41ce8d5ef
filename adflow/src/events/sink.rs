//! Progress sink trait and implementations.

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::{ProgressEvent, RunEvent};
use crate::errors::SinkError;
use crate::pipeline::FinalReport;

/// Receives one run's ordered event stream.
///
/// Delivery order must match emission order. Sends never block indefinitely;
/// a failed send means the consumer is gone and the run cannot usefully
/// continue.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Delivers one event.
    async fn send(&self, event: RunEvent) -> Result<(), SinkError>;
}

/// A sink that discards all events.
///
/// Used as the default when no consumer is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

#[async_trait]
impl ProgressSink for NoOpSink {
    async fn send(&self, _event: RunEvent) -> Result<(), SinkError> {
        Ok(())
    }
}

/// A sink that logs events through the tracing framework.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSink;

#[async_trait]
impl ProgressSink for LoggingSink {
    async fn send(&self, event: RunEvent) -> Result<(), SinkError> {
        match &event {
            RunEvent::Progress(progress) => {
                info!(stage = %progress.label, "{progress}");
            }
            RunEvent::Report(report) => {
                info!(warnings = report.warnings.len(), "Run report ready");
            }
            RunEvent::RunFailed { reason } => {
                warn!(%reason, "Run failed");
            }
        }
        Ok(())
    }
}

/// A collecting sink for tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: RwLock<Vec<RunEvent>>,
}

impl CollectingSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<RunEvent> {
        self.events.read().clone()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Returns the collected progress events, in delivery order.
    #[must_use]
    pub fn progress_events(&self) -> Vec<ProgressEvent> {
        self.events
            .read()
            .iter()
            .filter_map(|event| match event {
                RunEvent::Progress(progress) => Some(progress.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the delivered report, if the run reached one.
    #[must_use]
    pub fn report(&self) -> Option<FinalReport> {
        self.events.read().iter().find_map(|event| match event {
            RunEvent::Report(report) => Some(report.clone()),
            _ => None,
        })
    }

    /// Returns the reasons of delivered run-failure events.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.events
            .read()
            .iter()
            .filter_map(|event| match event {
                RunEvent::RunFailed { reason } => Some(reason.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ProgressSink for CollectingSink {
    async fn send(&self, event: RunEvent) -> Result<(), SinkError> {
        self.events.write().push(event);
        Ok(())
    }
}

/// A sink that forwards events into a tokio channel.
///
/// The send is non-blocking; it fails only when the receiving half has been
/// dropped, which the orchestrator treats as a run-level failure.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<RunEvent>,
}

impl ChannelSink {
    /// Creates a sink and the receiver that drains it.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RunEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl ProgressSink for ChannelSink {
    async fn send(&self, event: RunEvent) -> Result<(), SinkError> {
        self.tx
            .send(event)
            .map_err(|_| SinkError::Closed("event channel receiver dropped".to_string()))
    }
}

/// Adapts a channel receiver into a `futures::Stream` of events.
///
/// The stream ends when every `ChannelSink` clone for the run is dropped.
pub fn event_stream(
    receiver: mpsc::UnboundedReceiver<RunEvent>,
) -> impl futures::Stream<Item = RunEvent> {
    futures::stream::unfold(receiver, |mut rx| async move {
        rx.recv().await.map(|event| (event, rx))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn progress(index: usize) -> RunEvent {
        RunEvent::Progress(ProgressEvent::new(index, 5, "Structure", "working"))
    }

    #[tokio::test]
    async fn noop_sink_accepts_everything() {
        let sink = NoOpSink;
        assert!(sink.send(progress(1)).await.is_ok());
    }

    #[tokio::test]
    async fn collecting_sink_preserves_order() {
        let sink = CollectingSink::new();
        sink.send(progress(1)).await.unwrap();
        sink.send(progress(2)).await.unwrap();

        let indexes: Vec<_> = sink
            .progress_events()
            .iter()
            .map(|event| event.sequence_index)
            .collect();
        assert_eq!(indexes, vec![1, 2]);
    }

    #[tokio::test]
    async fn channel_sink_delivers_in_order() {
        let (sink, mut rx) = ChannelSink::new();
        sink.send(progress(1)).await.unwrap();
        sink.send(progress(2)).await.unwrap();

        for expected in 1..=2 {
            match rx.recv().await {
                Some(RunEvent::Progress(event)) => assert_eq!(event.sequence_index, expected),
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn channel_sink_fails_when_receiver_dropped() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);

        let result = sink.send(progress(1)).await;
        assert!(matches!(result, Err(SinkError::Closed(_))));
    }

    #[tokio::test]
    async fn event_stream_drains_channel() {
        let (sink, rx) = ChannelSink::new();
        sink.send(progress(1)).await.unwrap();
        sink.send(progress(2)).await.unwrap();
        drop(sink);

        let events: Vec<_> = event_stream(rx).collect().await;
        assert_eq!(events.len(), 2);
    }
}
