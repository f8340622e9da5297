//! CSV export of filtered records.
//!
//! Files are written to a temporary file beside the destination and only
//! moved into place once complete, so a failed run never leaves a
//! half-written export behind.

use crate::core::dedup::CorrectedPair;
use crate::core::record::Record;
use crate::error::ExportError;
use csv::QuoteStyle;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Header of every exported file
pub const OUTPUT_HEADER: [&str; 5] = ["id", "replyToId", "timestamp", "text", "replies"];

/// Extension replacing the input's for the primary output
pub const OUTPUT_EXTENSION: &str = "filtered.csv";

/// Extension replacing the input's for the corrected-records output
pub const CORRECTED_EXTENSION: &str = "corrected.csv";

/// Default primary output path for an input archive
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

/// Default corrected-records path for an input archive
pub fn default_corrected_path(input: &Path) -> PathBuf {
    input.with_extension(CORRECTED_EXTENSION)
}

/// Write records as CSV
///
/// CSV columns: id, replyToId, timestamp, text, replies (comma-joined)
pub fn export_csv<'a, W, I>(records: I, writer: W) -> csv::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(writer);

    csv_writer.write_record(OUTPUT_HEADER)?;
    for record in records {
        let timestamp = record.formatted_timestamp();
        let replies = record.replies.join(",");
        csv_writer.write_record([
            record.id.as_str(),
            record.reply_to_id.as_str(),
            timestamp.as_str(),
            record.text.as_str(),
            replies.as_str(),
        ])?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Every record taking part in a fold, each identifier once, in the
/// order the folds were found.
///
/// Records still in `retained` are taken from there so that reply links
/// added after the fold show up; dropped records use their fold snapshot.
pub fn corrected_records<'a>(
    pairs: &'a [CorrectedPair],
    retained: &'a [Record],
) -> Vec<&'a Record> {
    let current: HashMap<&str, &Record> = retained.iter().map(|r| (r.id.as_str(), r)).collect();
    let mut seen = HashSet::new();
    pairs
        .iter()
        .flat_map(|pair| [&pair.record, &pair.matched])
        .filter(|record| seen.insert(record.id.as_str()))
        .map(|record| current.get(record.id.as_str()).copied().unwrap_or(record))
        .collect()
}

/// A fully written export waiting in a temporary file beside its
/// destination
pub struct StagedExport {
    temp: NamedTempFile,
    path: PathBuf,
}

impl StagedExport {
    /// Destination the export will be moved to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move the export into place
    pub fn commit(self) -> Result<(), ExportError> {
        let path = self.path;
        self.temp
            .persist(&path)
            .map_err(|e| ExportError::Persist { path, source: e.error })?;
        Ok(())
    }
}

/// Write records to a temporary file next to `path` without touching
/// `path` itself. Dropping the result discards the file.
pub fn stage_export<'a, I>(records: I, path: &Path) -> Result<StagedExport, ExportError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    export_csv(records, temp.as_file_mut()).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(StagedExport {
        temp,
        path: path.to_path_buf(),
    })
}

/// Export records to `path`, replacing it atomically
pub fn export_to_file<'a, I>(records: I, path: &Path) -> Result<(), ExportError>
where
    I: IntoIterator<Item = &'a Record>,
{
    stage_export(records, path)?.commit()
}
