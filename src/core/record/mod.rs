//! # Record Module
//!
//! A single post from the archive, plus the text escaping applied when
//! it is read.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Archive identifier of a post
pub type RecordId = String;

/// Timestamp layout used by the archive, e.g. `2014-03-01 18:22:05 +0000`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// One post from the archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique post identifier
    pub id: RecordId,
    /// Post this one replies to (empty when not a reply)
    pub reply_to_id: RecordId,
    /// Account the replied-to post belongs to (empty when not a reply)
    pub reply_to_account: String,
    /// When the post was published
    pub timestamp: DateTime<FixedOffset>,
    /// Escaped post text
    pub text: String,
    /// Post this one reshares (empty for original posts)
    pub reshare_of_id: RecordId,
    /// Replies attached during thread reconciliation, newest first
    pub replies: Vec<RecordId>,
}

impl Record {
    /// Build a record from raw archive fields, escaping the text.
    pub fn from_raw(
        id: impl Into<RecordId>,
        reply_to_id: impl Into<RecordId>,
        reply_to_account: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
        raw_text: &str,
        reshare_of_id: impl Into<RecordId>,
    ) -> Self {
        Self {
            id: id.into(),
            reply_to_id: reply_to_id.into(),
            reply_to_account: reply_to_account.into(),
            timestamp,
            text: escape_text(raw_text),
            reshare_of_id: reshare_of_id.into(),
            replies: Vec::new(),
        }
    }

    /// Whether this record still points at a reply target
    pub fn is_reply(&self) -> bool {
        !self.reply_to_id.is_empty()
    }

    /// Turn the record into a thread root
    pub fn clear_reply_target(&mut self) {
        self.reply_to_id.clear();
        self.reply_to_account.clear();
    }

    /// Timestamp in the archive's own layout
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Escape post text so it can be embedded in HTML.
///
/// `&`, `"` and `'` become entities; every line break (`\r\n`, `\n` or `\r`)
/// becomes a literal `<br>`.
pub fn escape_text(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                escaped.push_str("<br>");
            }
            '\n' => escaped.push_str("<br>"),
            other => escaped.push(other),
        }
    }

    escaped
}
