//! # Pipeline Module
//!
//! Orchestrates the full filtering workflow.
//!
//! ## Pipeline Stages
//! 1. **Read** - Stream posts from the archive, newest first, stopping at
//!    the lower date bound
//! 2. **Exclude** - Apply the exclusion rules in order
//! 3. **Deduplicate** - Fold corrections into their predecessor
//! 4. **Reconcile** - Resolve reply threads over the retained posts
//!
//! Everything runs on the calling thread; nothing is written until the
//! caller exports the finished result.

mod executor;

pub use executor::{Pipeline, PipelineBuilder, PipelineConfig, PipelineResult, DEFAULT_EXCLUDED_TAGS};
