//! # Publishflow
//!
//! A multi-agent pipeline that turns a blog post into a publish-ready
//! package using a locally hosted language model.
//!
//! Publishflow provides:
//!
//! - **Tag normalization**: exactly three lowercase, hyphenated, unique tags
//! - **Resilient JSON extraction**: whole text, fenced block, then outer braces
//! - **Structured calls**: bounded retries with a stronger guard on retry
//! - **Planner, Reviewer and Finalizer stages** run strictly in sequence
//! - **Event-driven observability** for each stage of a run
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use publishflow::prelude::*;
//! use std::sync::Arc;
//!
//! let client = OllamaClient::new(ClientConfig::default())?;
//! let pipeline = PublishPipeline::new(StructuredCaller::new(Arc::new(client)));
//!
//! let run = pipeline.run("My title", "My content").await?;
//! println!("{}", serde_json::to_string_pretty(&run.publish)?);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod client;
pub mod errors;
pub mod events;
pub mod extract;
pub mod observability;
pub mod pipeline;
pub mod stages;
pub mod testing;
pub mod text;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    #[cfg(feature = "ollama")]
    pub use crate::client::OllamaClient;
    pub use crate::client::{ClientConfig, TextGenerator};
    pub use crate::errors::{PublishflowError, TransportError};
    pub use crate::events::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::extract::{
        extract_json, StructuredCallConfig, StructuredCaller, StructuredOutcome,
    };
    pub use crate::observability::{init_tracing, LogFormat};
    pub use crate::pipeline::{PipelineConfig, PipelineRun, PublishPipeline};
    pub use crate::stages::{PublishPackage, StageKind, StageResult};
    pub use crate::text::{cap_25w, normalize_tags};
    pub use crate::utils::{generate_run_id, submission_timestamp, Timestamp};
}
