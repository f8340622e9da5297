//! The individual exclusion rules.

use super::{ExclusionRule, RuleKind};
use crate::core::record::Record;

/// Excludes reshares and manual `RT `/`MT ` reposts
pub struct RetweetRule;

impl ExclusionRule for RetweetRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Retweet
    }

    fn matches(&self, record: &Record) -> bool {
        !record.reshare_of_id.is_empty()
            || record.text.starts_with("RT ")
            || record.text.starts_with("MT ")
    }
}

/// Excludes promotional `** ` announcements
pub struct AnnouncementRule;

impl ExclusionRule for AnnouncementRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Announcement
    }

    fn matches(&self, record: &Record) -> bool {
        record.text.starts_with("** ")
    }
}

/// Excludes conversations with other accounts.
///
/// Self-replies (threads the owner continues) are kept. A reply whose
/// account is unknown is never treated as a self-reply.
pub struct ReplyRule {
    home_account_id: String,
}

impl ReplyRule {
    pub fn new(home_account_id: impl Into<String>) -> Self {
        Self {
            home_account_id: home_account_id.into(),
        }
    }
}

impl ExclusionRule for ReplyRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Reply
    }

    fn matches(&self, record: &Record) -> bool {
        let replies_to_other = record.is_reply()
            && (record.reply_to_account.is_empty()
                || record.reply_to_account != self.home_account_id);
        replies_to_other || record.text.starts_with('@')
    }
}

/// Excludes posts containing any of a list of tags (case-sensitive substring)
pub struct TagRule {
    tags: Vec<String>,
}

impl TagRule {
    pub fn new(tags: Vec<String>) -> Self {
        Self { tags }
    }
}

impl ExclusionRule for TagRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Tag
    }

    fn matches(&self, record: &Record) -> bool {
        self.tags.iter().any(|tag| record.text.contains(tag.as_str()))
    }
}
