//! # Error Module
//!
//! Error types for the archive filter.
//!
//! ## Design Principles
//! - **Never panic** on archive data - return errors instead
//! - **Include context** - paths, column names, line numbers
//! - **Fail whole** - any error aborts the run before output is written

use std::error::Error as _;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum SiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Bad or missing arguments, detected before any I/O happens
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("Input archive not found: {path}")]
    MissingInput { path: PathBuf },

    #[error("Exclusion tags must not be empty")]
    EmptyTag,
}

/// The archive does not have the layout of a tweet export
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Archive {archive} does not contain {entry}")]
    MissingEntry { archive: PathBuf, entry: String },

    #[error("Column {column} should be '{expected}' but header has '{actual}'")]
    HeaderMismatch {
        column: usize,
        expected: String,
        actual: String,
    },

    #[error("Header has {actual} columns, expected at least {expected}")]
    TooFewColumns { expected: usize, actual: usize },

    #[error("Row on line {line} has {actual} fields, expected at least {expected}")]
    ShortRow {
        line: u64,
        expected: usize,
        actual: usize,
    },

    #[error("Unparseable timestamp '{value}' on line {line}")]
    InvalidTimestamp { line: u64, value: String },
}

/// Errors reading the input archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Failed to open archive {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read zip archive {path}")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Malformed CSV data")]
    Csv {
        #[from]
        source: csv::Error,
    },
}

/// Errors writing the filtered output
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create output next to {path}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to move finished output into {path}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SiftError>;

/// Messages for an error and its causes, outermost first.
///
/// The top-level message already embeds its direct cause, so the chain
/// continues from the cause's own source.
pub fn error_chain(error: &SiftError) -> Vec<String> {
    let mut messages = vec![error.to_string()];
    let mut cause = error.source().and_then(|inner| inner.source());
    while let Some(inner) = cause {
        messages.push(inner.to_string());
        cause = inner.source();
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn header_mismatch_names_column_and_values() {
        let error = SchemaError::HeaderMismatch {
            column: 5,
            expected: "text".to_string(),
            actual: "body".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains('5'));
        assert!(message.contains("'text'"));
        assert!(message.contains("'body'"));
    }

    #[test]
    fn missing_entry_includes_archive_path() {
        let error = SchemaError::MissingEntry {
            archive: PathBuf::from("/exports/tweets.zip"),
            entry: "tweets.csv".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/exports/tweets.zip"));
        assert!(message.contains("tweets.csv"));
    }

    #[test]
    fn archive_error_keeps_io_cause_in_chain() {
        let error: SiftError = ArchiveError::Open {
            path: PathBuf::from("/missing.zip"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        }
        .into();

        let archive = error.source().expect("archive error is the source");
        let io = archive.source().expect("io error is the root cause");
        assert_eq!(io.to_string(), "gone");
    }

    #[test]
    fn error_chain_lists_each_message_once() {
        let error: SiftError = ArchiveError::Open {
            path: PathBuf::from("/missing.zip"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        }
        .into();

        let chain = error_chain(&error);

        assert_eq!(
            chain,
            ["Archive error: Failed to open archive /missing.zip", "gone"]
        );
    }

    #[test]
    fn error_chain_of_leaf_error_is_single_line() {
        let error: SiftError = ConfigError::EmptyTag.into();

        assert_eq!(
            error_chain(&error),
            ["Configuration error: Exclusion tags must not be empty"]
        );
    }
}
