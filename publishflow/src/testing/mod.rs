//! Testing utilities for publishflow pipelines.
//!
//! This module provides:
//! - Scripted and failing text generators
//! - Assertions for tag, summary and package invariants

mod assertions;
mod mocks;

pub use assertions::{assert_package_well_formed, assert_tags_well_formed, assert_word_count_at_most};
pub use mocks::{FailingGenerator, ScriptedGenerator};
