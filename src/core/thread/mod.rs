//! # Thread Module
//!
//! Resolves reply relationships among retained posts once deduplication
//! has finished.
//!
//! A retained reply whose text is within the correction threshold of its
//! target is a late-discovered correction: the target is dropped and the
//! reply becomes a root. Any other reply is attached to its target's
//! reply list.
//!
//! Records are visited in retention order (newest first), so reply lists
//! end up newest first as well.

use crate::core::dedup::{CorrectedPair, FoldKind, RecordArena};
use crate::core::record::RecordId;
use crate::core::similarity::{distance, CorrectionStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// What one reconciliation pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileStats {
    /// Reply targets dropped as corrected drafts
    pub corrections: usize,
    /// Replies attached to their parent
    pub links: usize,
    /// Replies whose target had already been dropped in this pass
    pub skipped: usize,
}

/// Post-pass building parent → children links
pub struct ThreadReconciler<'a> {
    strategy: &'a dyn CorrectionStrategy,
}

impl<'a> ThreadReconciler<'a> {
    pub fn new(strategy: &'a dyn CorrectionStrategy) -> Self {
        Self { strategy }
    }

    /// Reconcile every retained record, appending late corrections to
    /// `corrected`.
    pub fn reconcile(
        &self,
        arena: &mut RecordArena,
        corrected: &mut Vec<CorrectedPair>,
    ) -> ReconcileStats {
        let mut stats = ReconcileStats::default();
        let mut removed: HashSet<RecordId> = HashSet::new();
        let order: Vec<RecordId> = arena.ids().to_vec();

        for id in &order {
            let Some(reply) = arena.get(id) else { continue };
            if !reply.is_reply() || reply.reply_to_id == *id {
                continue;
            }
            let target_id = reply.reply_to_id.clone();

            if removed.contains(&target_id) {
                warn!(id = %id, target = %target_id, "reply target already dropped as a draft, leaving reply as is");
                stats.skipped += 1;
                continue;
            }
            let Some(target) = arena.get(&target_id) else {
                continue;
            };

            let d = distance(&reply.text, &target.text);
            if self.strategy.is_correction(d) {
                let matched = target.clone();
                removed.insert(target_id.clone());

                let Some(reply) = arena.get_mut(id) else { continue };
                reply.clear_reply_target();
                debug!(id = %id, target = %target_id, distance = d, "reply corrects its target");
                corrected.push(CorrectedPair {
                    record: reply.clone(),
                    matched,
                    distance: d,
                    kind: FoldKind::Reply,
                });
                stats.corrections += 1;
            } else if let Some(target) = arena.get_mut(&target_id) {
                if !target.replies.contains(id) {
                    target.replies.push(id.clone());
                }
                stats.links += 1;
            }
        }

        arena.remove_all(&removed);
        stats
    }
}
