//! Pipeline execution.
//!
//! This module provides:
//! - The sequential Planner → Reviewer → Finalizer runner
//! - Run configuration
//! - Lifecycle events for each stage

mod runner;


pub use runner::{PipelineConfig, PipelineRun, PublishPipeline};
