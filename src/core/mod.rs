//! # Core Module
//!
//! The archive filtering engine.
//!
//! ## Modules
//! - `record` - A single post and its text escaping
//! - `similarity` - Edit distance and the correction threshold
//! - `rules` - Exclusion rules applied to every post
//! - `dedup` - Chronological correction folding
//! - `thread` - Reply-thread reconciliation
//! - `archive` - Reads posts out of the export archive
//! - `reporter` - Writes the filtered output
//! - `pipeline` - Orchestrates the full workflow

pub mod archive;
pub mod dedup;
pub mod pipeline;
pub mod record;
pub mod reporter;
pub mod rules;
pub mod similarity;
pub mod thread;

// Re-export commonly used types
pub use dedup::{CorrectedPair, RecordArena};
pub use record::{Record, RecordId};
pub use rules::{RuleCounts, RuleKind};
pub use similarity::distance;
