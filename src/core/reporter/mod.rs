//! # Reporter Module
//!
//! Hands the pipeline's result to the outside world: the filtered CSV,
//! the optional corrected-records CSV, and a short human-readable
//! account of what was dropped and why.

mod export;

pub use export::{
    corrected_records, default_corrected_path, default_output_path, export_csv, export_to_file,
    stage_export, StagedExport, CORRECTED_EXTENSION, OUTPUT_EXTENSION, OUTPUT_HEADER,
};

use crate::core::pipeline::PipelineResult;
use crate::core::rules::RuleKind;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where a run's output went, plus its statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Primary output file
    pub output: PathBuf,
    /// Corrected-records file, if one was written
    pub corrected_output: Option<PathBuf>,
    pub records_read: usize,
    pub retweets: usize,
    pub announcements: usize,
    pub replies: usize,
    pub tagged: usize,
    pub corrections: usize,
    pub retained: usize,
    pub stopped_at_bound: bool,
    pub duration_ms: u64,
}

/// Write the filtered output and, when any folds happened and a path is
/// given, the corrected records.
///
/// Both files are fully written before either is moved into place, so a
/// failure on either leaves no output behind.
pub fn write_outputs(
    result: &PipelineResult,
    output: &Path,
    corrected_output: Option<&Path>,
) -> Result<RunReport> {
    let primary = stage_export(&result.retained, output)?;

    let corrected = match corrected_output {
        Some(path) if !result.corrected.is_empty() => {
            let records = corrected_records(&result.corrected, &result.retained);
            Some((stage_export(records.iter().copied(), path)?, records.len()))
        }
        _ => None,
    };

    primary.commit()?;
    info!(path = %output.display(), records = result.retained.len(), "wrote filtered output");

    let corrected_output = match corrected {
        Some((staged, count)) => {
            let path = staged.path().to_path_buf();
            staged.commit()?;
            info!(path = %path.display(), records = count, "wrote corrected records");
            Some(path)
        }
        None => None,
    };

    Ok(RunReport {
        output: output.to_path_buf(),
        corrected_output,
        records_read: result.records_read,
        retweets: result.excluded.get(RuleKind::Retweet),
        announcements: result.excluded.get(RuleKind::Announcement),
        replies: result.excluded.get(RuleKind::Reply),
        tagged: result.excluded.get(RuleKind::Tag),
        corrections: result.corrections(),
        retained: result.retained.len(),
        stopped_at_bound: result.stopped_at_bound,
        duration_ms: result.duration_ms,
    })
}

/// One line per statistic, in rule order
pub fn summary_lines(report: &RunReport) -> Vec<String> {
    vec![
        format!("{} retweets removed", report.retweets),
        format!("{} announcements removed", report.announcements),
        format!("{} replies to others removed", report.replies),
        format!("{} tagged posts removed", report.tagged),
        format!("{} corrections folded", report.corrections),
        format!("{} of {} posts kept", report.retained, report.records_read),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dedup::{CorrectedPair, FoldKind};
    use crate::core::record::tests::record;
    use crate::core::rules::RuleCounts;
    use crate::core::thread::ReconcileStats;
    use tempfile::TempDir;

    fn result(corrected: Vec<CorrectedPair>) -> PipelineResult {
        PipelineResult {
            retained: vec![record("2", "", 1, "kept")],
            corrected,
            records_read: 4,
            excluded: RuleCounts {
                retweets: 1,
                tagged: 1,
                ..RuleCounts::default()
            },
            reconcile: ReconcileStats::default(),
            stopped_at_bound: false,
            duration_ms: 3,
        }
    }

    #[test]
    fn corrected_file_skipped_without_corrections() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.csv");
        let corrected = dir.path().join("corrected.csv");

        let report = write_outputs(&result(Vec::new()), &output, Some(corrected.as_path())).unwrap();

        assert!(output.exists());
        assert!(!corrected.exists());
        assert!(report.corrected_output.is_none());
    }

    #[test]
    fn corrected_file_written_when_folds_happened() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.csv");
        let corrected = dir.path().join("corrected.csv");
        let pair = CorrectedPair {
            record: record("1", "", 0, "kpet"),
            matched: record("2", "", 1, "kept"),
            distance: 2,
            kind: FoldKind::Chronological,
        };

        let report = write_outputs(&result(vec![pair]), &output, Some(corrected.as_path())).unwrap();

        let content = std::fs::read_to_string(&corrected).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert_eq!(report.corrections, 1);
        assert_eq!(report.corrected_output.as_deref(), Some(corrected.as_path()));
    }

    #[test]
    fn failed_corrected_write_leaves_no_primary_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.csv");
        let corrected = dir.path().join("missing").join("corrected.csv");
        let pair = CorrectedPair {
            record: record("1", "", 0, "kpet"),
            matched: record("2", "", 1, "kept"),
            distance: 2,
            kind: FoldKind::Chronological,
        };

        let result = write_outputs(&result(vec![pair]), &output, Some(corrected.as_path()));

        assert!(result.is_err());
        assert!(!output.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn summary_reports_every_rule_and_totals() {
        let dir = TempDir::new().unwrap();
        let report =
            write_outputs(&result(Vec::new()), &dir.path().join("out.csv"), None).unwrap();

        let lines = summary_lines(&report);

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "1 retweets removed");
        assert_eq!(lines[3], "1 tagged posts removed");
        assert_eq!(lines[5], "1 of 4 posts kept");
    }
}
