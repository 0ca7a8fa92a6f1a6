//! Event sink trait and implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, Level};
use uuid::Uuid;

use crate::stages::StageKind;
use crate::utils::{now_utc, Timestamp};

/// A lifecycle event emitted by the pipeline runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineEvent {
    /// Event type, e.g. `stage.completed`.
    pub event_type: String,
    /// Run the event belongs to.
    pub run_id: Uuid,
    /// Stage the event refers to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<StageKind>,
    /// Event payload.
    #[serde(default)]
    pub data: serde_json::Value,
    /// When the event was created.
    pub timestamp: Timestamp,
}

impl PipelineEvent {
    /// Creates a run-level event.
    #[must_use]
    pub fn new(event_type: impl Into<String>, run_id: Uuid) -> Self {
        Self {
            event_type: event_type.into(),
            run_id,
            stage: None,
            data: serde_json::Value::Null,
            timestamp: now_utc(),
        }
    }

    /// Attaches the stage.
    #[must_use]
    pub fn with_stage(mut self, stage: StageKind) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Attaches a payload.
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// Trait for sinks that receive pipeline events.
///
/// Emission must not fail; sinks swallow their own errors.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emits an event.
    async fn emit(&self, event: &PipelineEvent);
}

/// A sink that discards all events. Used when none is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: &PipelineEvent) {}
}

/// A sink that logs events through `tracing`.
#[derive(Debug, Clone)]
pub struct LoggingEventSink {
    level: Level,
}

impl Default for LoggingEventSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingEventSink {
    /// Creates a logging sink at the given level. Anything other than
    /// `DEBUG` logs at `INFO`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level logging sink.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }
}

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn emit(&self, event: &PipelineEvent) {
        let stage = event.stage.map(|s| s.to_string()).unwrap_or_default();
        if self.level == Level::DEBUG {
            debug!(
                event_type = %event.event_type,
                run_id = %event.run_id,
                stage = %stage,
                event_data = %event.data,
                "Event: {}", event.event_type
            );
        } else {
            info!(
                event_type = %event.event_type,
                run_id = %event.run_id,
                stage = %stage,
                event_data = %event.data,
                "Event: {}", event.event_type
            );
        }
    }
}

/// A sink that keeps every event, for tests and post-run inspection.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: parking_lot::RwLock<Vec<PipelineEvent>>,
}

impl CollectingEventSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.read().clone()
    }

    /// Returns the collected event types, in order.
    #[must_use]
    pub fn event_types(&self) -> Vec<String> {
        self.events.read().iter().map(|e| e.event_type.clone()).collect()
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

    /// Returns events matching a type prefix.
    #[must_use]
    pub fn events_of_type(&self, type_prefix: &str) -> Vec<PipelineEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.event_type.starts_with(type_prefix))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn emit(&self, event: &PipelineEvent) {
        self.events.write().push(event.clone());
    }
}
