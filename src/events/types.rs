//! Event type definitions for progress reporting.

use crate::core::rules::{RuleCounts, RuleKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the filtering pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Archive reading events
    Ingest(IngestEvent),
    /// Per-record filtering decisions
    Filter(FilterEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events while reading the archive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IngestEvent {
    /// Reading has started
    Started { path: PathBuf },
    /// Another batch of records was read
    Progress { records_read: usize },
    /// A record older than the lower date bound ended the read
    StoppedAtBound { id: String },
    /// Reading completed
    Completed { records_read: usize },
}

/// Decisions taken for individual records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FilterEvent {
    /// An exclusion rule dropped the record
    Excluded { id: String, rule: RuleKind },
    /// The record was folded into a retained correction
    Folded {
        id: String,
        into: String,
        distance: usize,
    },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Pipeline has started
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// Pipeline completed successfully
    Completed { summary: PipelineSummary },
}

/// Phases of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Filtering,
    Reconciling,
}

/// Summary of pipeline results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Records read from the archive
    pub records_read: usize,
    /// Records dropped by each exclusion rule
    pub excluded: RuleCounts,
    /// Correction folds, chronological and in threads
    pub corrections: usize,
    /// Records in the final output
    pub retained: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Filtering => write!(f, "Filtering"),
            PipelinePhase::Reconciling => write!(f, "Reconciling threads"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = Event::Filter(FilterEvent::Excluded {
            id: "123".to_string(),
            rule: RuleKind::Retweet,
        });

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::Filter(FilterEvent::Excluded { id, rule }) => {
                assert_eq!(id, "123");
                assert_eq!(rule, RuleKind::Retweet);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn pipeline_summary_is_serializable() {
        let summary = PipelineSummary {
            records_read: 25_000,
            excluded: RuleCounts {
                retweets: 4000,
                ..RuleCounts::default()
            },
            corrections: 12,
            retained: 9000,
            duration_ms: 800,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("25000"));
        assert!(json.contains("\"retweets\":4000"));
    }
}
