//! # Dedup Module
//!
//! Folds typo-fix reposts into the post they correct.
//!
//! ## How It Works
//! Posts arrive newest first. Each surviving post is compared with the
//! most recently retained one; if the texts are within the correction
//! threshold the older post is treated as a draft of the newer one and
//! folded into it instead of being retained.

mod arena;

pub use arena::RecordArena;

use crate::core::record::{Record, RecordId};
use crate::core::similarity::{distance, CorrectionStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a correction was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoldKind {
    /// Near-identical to the previously retained post
    Chronological,
    /// Near-identical to the post it replies to
    Reply,
}

/// Two posts merged by a correction fold.
///
/// `record` is the post being examined, `matched` the retained post it
/// was found to duplicate. Both are snapshots taken at fold time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectedPair {
    pub record: Record,
    pub matched: Record,
    pub distance: usize,
    pub kind: FoldKind,
}

/// What happened to a record offered to the deduplicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DedupOutcome {
    /// Kept as a new post
    Retained,
    /// Folded into the retained post with this identifier
    Folded { into: RecordId, distance: usize },
    /// Another record with the same identifier was already retained
    DuplicateId,
}

/// Chronological near-duplicate merge
pub struct Deduplicator<'a> {
    strategy: &'a dyn CorrectionStrategy,
    previous: Option<RecordId>,
    arena: RecordArena,
    corrected: Vec<CorrectedPair>,
}

impl<'a> Deduplicator<'a> {
    pub fn new(strategy: &'a dyn CorrectionStrategy) -> Self {
        Self {
            strategy,
            previous: None,
            arena: RecordArena::new(),
            corrected: Vec::new(),
        }
    }

    /// Retain `candidate` or fold it into the previously retained record.
    pub fn offer(&mut self, candidate: Record) -> DedupOutcome {
        if let Some(previous_id) = self.previous.clone() {
            if let Some(previous) = self.arena.get_mut(&previous_id) {
                let d = distance(&candidate.text, &previous.text);
                if self.strategy.is_correction(d) {
                    previous.clear_reply_target();
                    debug!(id = %candidate.id, into = %previous_id, distance = d, "folded correction");
                    self.corrected.push(CorrectedPair {
                        record: candidate,
                        matched: previous.clone(),
                        distance: d,
                        kind: FoldKind::Chronological,
                    });
                    return DedupOutcome::Folded {
                        into: previous_id,
                        distance: d,
                    };
                }
            }
        }

        let id = candidate.id.clone();
        if !self.arena.insert(candidate) {
            return DedupOutcome::DuplicateId;
        }
        self.previous = Some(id);
        DedupOutcome::Retained
    }

    /// Number of folds so far
    pub fn corrections(&self) -> usize {
        self.corrected.len()
    }

    /// Hand back the retained records and the folded pairs
    pub fn finish(self) -> (RecordArena, Vec<CorrectedPair>) {
        (self.arena, self.corrected)
    }
}
