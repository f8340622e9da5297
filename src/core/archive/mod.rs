//! # Archive Module
//!
//! Reads posts out of a tweet archive export.
//!
//! The archive is a zip container holding a single `tweets.csv`, newest
//! post first. Only the first seven columns are used; any further
//! columns are ignored.
//!
//! ## Example
//! ```rust,ignore
//! use tweet_sift::core::archive::TweetArchive;
//!
//! let mut archive = TweetArchive::open("tweets.zip".as_ref())?;
//! for record in archive.records()? {
//!     println!("{}", record?.id);
//! }
//! ```

mod reader;

pub use reader::{RecordReader, EXPECTED_COLUMNS};

use crate::error::{ArchiveError, ConfigError, Result, SchemaError};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::result::ZipError;
use zip::ZipArchive;

/// Name of the post table inside the archive
pub const TWEETS_ENTRY: &str = "tweets.csv";

/// An opened archive export
pub struct TweetArchive {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl TweetArchive {
    /// Open the archive at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::MissingInput {
                path: path.to_path_buf(),
            }
            .into());
        }

        let file = File::open(path).map_err(|source| ArchiveError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let archive = ZipArchive::new(file).map_err(|source| ArchiveError::Zip {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stream the posts of the inner table after validating its header.
    pub fn records(&mut self) -> Result<RecordReader<impl Read + '_>> {
        let entry = match self.archive.by_name(TWEETS_ENTRY) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(SchemaError::MissingEntry {
                    archive: self.path.clone(),
                    entry: TWEETS_ENTRY.to_string(),
                }
                .into())
            }
            Err(source) => {
                return Err(ArchiveError::Zip {
                    path: self.path.clone(),
                    source,
                }
                .into())
            }
        };

        RecordReader::new(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiftError;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_zip(dir: &TempDir, entry: &str, content: &str) -> PathBuf {
        let path = dir.path().join("archive.zip");
        let mut zip = ZipWriter::new(File::create(&path).unwrap());
        zip.start_file(entry, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
        zip.finish().unwrap();
        path
    }

    const HEADER: &str = "tweet_id,in_reply_to_status_id,in_reply_to_user_id,timestamp,source,text,retweeted_status_id,retweeted_status_user_id,retweeted_status_timestamp,expanded_urls\n";

    #[test]
    fn reads_records_from_inner_table() {
        let dir = TempDir::new().unwrap();
        let content = format!(
            "{HEADER}2,,,2014-03-02 10:00:00 +0000,web,\"second\",,,,\n1,,,2014-03-01 10:00:00 +0000,web,\"first\",,,,\n"
        );
        let path = write_zip(&dir, TWEETS_ENTRY, &content);

        let mut archive = TweetArchive::open(&path).unwrap();
        let ids: Vec<_> = archive
            .records()
            .unwrap()
            .map(|r| r.unwrap().id)
            .collect();

        assert_eq!(ids, ["2", "1"]);
    }

    #[test]
    fn missing_inner_table_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(&dir, "other.csv", HEADER);

        let mut archive = TweetArchive::open(&path).unwrap();
        let result = archive.records().map(|_| ());

        assert!(matches!(
            result,
            Err(SiftError::Schema(SchemaError::MissingEntry { .. }))
        ));
    }

    #[test]
    fn missing_archive_is_config_error() {
        let result = TweetArchive::open(Path::new("/nonexistent/tweets.zip"));

        assert!(matches!(
            result,
            Err(SiftError::Config(ConfigError::MissingInput { .. }))
        ));
    }

    #[test]
    fn non_zip_file_is_archive_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tweets.zip");
        std::fs::write(&path, b"definitely not a zip").unwrap();

        let result = TweetArchive::open(&path);

        assert!(matches!(
            result,
            Err(SiftError::Archive(ArchiveError::Zip { .. }))
        ));
    }
}
