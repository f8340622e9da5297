//! Pipeline execution implementation.

use crate::core::archive::TweetArchive;
use crate::core::dedup::{CorrectedPair, DedupOutcome, Deduplicator};
use crate::core::record::Record;
use crate::core::rules::{RuleCounts, RuleSet};
use crate::core::similarity::{ThresholdStrategy, DEFAULT_CORRECTION_THRESHOLD};
use crate::core::thread::{ReconcileStats, ThreadReconciler};
use crate::error::{ConfigError, Result};
use crate::events::{
    null_sender, Event, EventSender, FilterEvent, IngestEvent, PipelineEvent, PipelinePhase,
    PipelineSummary,
};
use chrono::NaiveDate;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Tags excluded when none are configured
pub const DEFAULT_EXCLUDED_TAGS: [&str; 2] = ["#nowplaying", "#followfriday"];

/// How often an ingest progress event is emitted
const PROGRESS_INTERVAL: usize = 1000;

/// Result of pipeline execution
#[derive(Debug)]
pub struct PipelineResult {
    /// Surviving records in retention order (newest first)
    pub retained: Vec<Record>,
    /// Every correction fold, in the order it was found
    pub corrected: Vec<CorrectedPair>,
    /// Records read from the input
    pub records_read: usize,
    /// Records dropped by each exclusion rule
    pub excluded: RuleCounts,
    /// What thread reconciliation did
    pub reconcile: ReconcileStats,
    /// Whether reading stopped at the lower date bound
    pub stopped_at_bound: bool,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl PipelineResult {
    /// Total correction folds
    pub fn corrections(&self) -> usize {
        self.corrected.len()
    }

    pub fn summary(&self) -> PipelineSummary {
        PipelineSummary {
            records_read: self.records_read,
            excluded: self.excluded,
            corrections: self.corrections(),
            retained: self.retained.len(),
            duration_ms: self.duration_ms,
        }
    }
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Account owning the archive; replies to it are kept
    pub home_account_id: String,
    /// Maximum edit distance treated as a correction
    pub correction_threshold: usize,
    /// Tags whose posts are excluded
    pub excluded_tags: Vec<String>,
    /// Stop reading at the first post dated before this day
    pub since: Option<NaiveDate>,
}

impl PipelineConfig {
    fn validate(&self) -> Result<()> {
        if self.excluded_tags.iter().any(|tag| tag.is_empty()) {
            return Err(ConfigError::EmptyTag.into());
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            home_account_id: String::new(),
            correction_threshold: DEFAULT_CORRECTION_THRESHOLD,
            excluded_tags: DEFAULT_EXCLUDED_TAGS.iter().map(|t| t.to_string()).collect(),
            since: None,
        }
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Set the archive owner's account identifier
    pub fn home_account_id(mut self, id: impl Into<String>) -> Self {
        self.config.home_account_id = id.into();
        self
    }

    /// Set the correction threshold
    pub fn correction_threshold(mut self, threshold: usize) -> Self {
        self.config.correction_threshold = threshold;
        self
    }

    /// Replace the excluded tag list
    pub fn excluded_tags(mut self, tags: Vec<String>) -> Self {
        self.config.excluded_tags = tags;
        self
    }

    /// Set the lower date bound
    pub fn since(mut self, since: Option<NaiveDate>) -> Self {
        self.config.since = since;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            config: self.config,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The archive filtering pipeline
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Filter the archive at `path` without events
    pub fn run(&self, path: &Path) -> Result<PipelineResult> {
        self.run_with_events(path, &null_sender())
    }

    /// Filter the archive at `path` with event reporting
    pub fn run_with_events(&self, path: &Path, events: &EventSender) -> Result<PipelineResult> {
        self.config.validate()?;

        let mut archive = TweetArchive::open(path)?;
        events.send(Event::Ingest(IngestEvent::Started {
            path: path.to_path_buf(),
        }));
        info!(path = %path.display(), "reading archive");

        let records = archive.records()?;
        self.process(records, events)
    }

    /// Filter an already-decoded stream of records, newest first.
    ///
    /// The first error in the stream aborts the run.
    pub fn process<I>(&self, records: I, events: &EventSender) -> Result<PipelineResult>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        self.config.validate()?;

        let start_time = Instant::now();
        let strategy = ThresholdStrategy::new(self.config.correction_threshold);
        let mut rules = RuleSet::standard(
            self.config.home_account_id.clone(),
            self.config.excluded_tags.clone(),
        );
        let mut dedup = Deduplicator::new(&strategy);
        let mut records_read = 0;
        let mut stopped_at_bound = false;

        events.send(Event::Pipeline(PipelineEvent::Started));

        // Phase 1: exclusion and chronological deduplication, streamed
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Filtering,
        }));

        for record in records {
            let record = record?;

            if let Some(since) = self.config.since {
                if record.timestamp.date_naive() < since {
                    info!(id = %record.id, %since, "reached lower date bound");
                    events.send(Event::Ingest(IngestEvent::StoppedAtBound {
                        id: record.id.clone(),
                    }));
                    stopped_at_bound = true;
                    break;
                }
            }

            records_read += 1;
            if records_read % PROGRESS_INTERVAL == 0 {
                events.send(Event::Ingest(IngestEvent::Progress { records_read }));
            }

            if let Some(rule) = rules.evaluate(&record) {
                events.send(Event::Filter(FilterEvent::Excluded {
                    id: record.id,
                    rule,
                }));
                continue;
            }

            let id = record.id.clone();
            match dedup.offer(record) {
                DedupOutcome::Retained => {}
                DedupOutcome::Folded { into, distance } => {
                    events.send(Event::Filter(FilterEvent::Folded { id, into, distance }));
                }
                DedupOutcome::DuplicateId => {
                    warn!(id = %id, "identifier seen twice, keeping the first record");
                }
            }
        }

        events.send(Event::Ingest(IngestEvent::Completed { records_read }));
        info!(
            records_read,
            excluded = rules.counts().total(),
            folded = dedup.corrections(),
            "filtering finished"
        );

        // Phase 2: thread reconciliation
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Reconciling,
        }));

        let (mut arena, mut corrected) = dedup.finish();
        let folded_before = corrected.len();
        let reconcile = ThreadReconciler::new(&strategy).reconcile(&mut arena, &mut corrected);
        for pair in &corrected[folded_before..] {
            events.send(Event::Filter(FilterEvent::Folded {
                id: pair.matched.id.clone(),
                into: pair.record.id.clone(),
                distance: pair.distance,
            }));
        }
        info!(
            links = reconcile.links,
            corrections = reconcile.corrections,
            skipped = reconcile.skipped,
            "threads reconciled"
        );

        let result = PipelineResult {
            retained: arena.into_records(),
            corrected,
            records_read,
            excluded: rules.counts(),
            reconcile,
            stopped_at_bound,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: result.summary(),
        }));

        Ok(result)
    }
}
