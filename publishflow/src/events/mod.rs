//! Pipeline lifecycle events.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink, PipelineEvent};
