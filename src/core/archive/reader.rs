//! CSV decoding of the post table.

use crate::core::record::{Record, TIMESTAMP_FORMAT};
use crate::error::{ArchiveError, Result, SchemaError};
use chrono::DateTime;
use std::io::Read;

/// Required leading columns, in order
pub const EXPECTED_COLUMNS: [&str; 7] = [
    "tweet_id",
    "in_reply_to_status_id",
    "in_reply_to_user_id",
    "timestamp",
    "source",
    "text",
    "retweeted_status_id",
];

const ID: usize = 0;
const REPLY_TO_ID: usize = 1;
const REPLY_TO_ACCOUNT: usize = 2;
const TIMESTAMP: usize = 3;
const TEXT: usize = 5;
const RESHARE_OF_ID: usize = 6;

/// Streams records from a post table whose header has been validated
pub struct RecordReader<R: Read> {
    reader: csv::Reader<R>,
    row: csv::StringRecord,
}

impl<R: Read> RecordReader<R> {
    /// Wrap `source`, failing fast if its header is not a post table.
    pub fn new(source: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let headers = reader.headers().map_err(ArchiveError::from)?;
        validate_header(headers)?;

        Ok(Self {
            reader,
            row: csv::StringRecord::new(),
        })
    }

    fn decode(&self) -> Result<Record> {
        let line = self.row.position().map(|p| p.line()).unwrap_or_default();

        if self.row.len() < EXPECTED_COLUMNS.len() {
            return Err(SchemaError::ShortRow {
                line,
                expected: EXPECTED_COLUMNS.len(),
                actual: self.row.len(),
            }
            .into());
        }

        let raw_timestamp = self.field(TIMESTAMP);
        let timestamp = DateTime::parse_from_str(raw_timestamp, TIMESTAMP_FORMAT).map_err(|_| {
            SchemaError::InvalidTimestamp {
                line,
                value: raw_timestamp.to_string(),
            }
        })?;

        Ok(Record::from_raw(
            self.field(ID),
            self.field(REPLY_TO_ID),
            self.field(REPLY_TO_ACCOUNT),
            timestamp,
            self.field(TEXT),
            self.field(RESHARE_OF_ID),
        ))
    }

    fn field(&self, index: usize) -> &str {
        self.row.get(index).unwrap_or_default()
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.row) {
            Ok(true) => Some(self.decode()),
            Ok(false) => None,
            Err(e) => Some(Err(ArchiveError::from(e).into())),
        }
    }
}

fn validate_header(headers: &csv::StringRecord) -> Result<()> {
    if headers.len() < EXPECTED_COLUMNS.len() {
        return Err(SchemaError::TooFewColumns {
            expected: EXPECTED_COLUMNS.len(),
            actual: headers.len(),
        }
        .into());
    }

    for (column, (expected, actual)) in EXPECTED_COLUMNS.iter().zip(headers.iter()).enumerate() {
        if *expected != actual {
            return Err(SchemaError::HeaderMismatch {
                column,
                expected: expected.to_string(),
                actual: actual.to_string(),
            }
            .into());
        }
    }

    Ok(())
}
