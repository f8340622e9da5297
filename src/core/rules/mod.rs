//! # Rules Module
//!
//! Exclusion rules deciding which posts never reach deduplication.
//!
//! ## Evaluation Order
//! 1. **Retweet** - reshares and `RT `/`MT ` quote-posts
//! 2. **Announcement** - posts starting with `** `
//! 3. **Reply** - replies to other accounts and posts starting with `@`
//! 4. **Tag** - posts carrying an excluded tag
//!
//! The first matching rule wins; later rules are not consulted and only
//! the winning rule's counter moves.

mod filter;

pub use filter::{AnnouncementRule, ReplyRule, RetweetRule, TagRule};

use crate::core::record::Record;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identifies which rule excluded a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    Retweet,
    Announcement,
    Reply,
    Tag,
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleKind::Retweet => write!(f, "retweets"),
            RuleKind::Announcement => write!(f, "announcements"),
            RuleKind::Reply => write!(f, "replies to others"),
            RuleKind::Tag => write!(f, "tagged posts"),
        }
    }
}

/// A predicate deciding whether a single post is dropped
pub trait ExclusionRule: Send + Sync {
    /// Which rule this is
    fn kind(&self) -> RuleKind;

    /// Whether the record should be excluded
    fn matches(&self, record: &Record) -> bool;
}

/// How many posts each rule excluded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCounts {
    pub retweets: usize,
    pub announcements: usize,
    pub replies: usize,
    pub tagged: usize,
}

impl RuleCounts {
    fn bump(&mut self, kind: RuleKind) {
        match kind {
            RuleKind::Retweet => self.retweets += 1,
            RuleKind::Announcement => self.announcements += 1,
            RuleKind::Reply => self.replies += 1,
            RuleKind::Tag => self.tagged += 1,
        }
    }

    /// Count for a single rule
    pub fn get(&self, kind: RuleKind) -> usize {
        match kind {
            RuleKind::Retweet => self.retweets,
            RuleKind::Announcement => self.announcements,
            RuleKind::Reply => self.replies,
            RuleKind::Tag => self.tagged,
        }
    }

    /// Total posts excluded by any rule
    pub fn total(&self) -> usize {
        self.retweets + self.announcements + self.replies + self.tagged
    }
}

/// Ordered rules with running exclusion counts
pub struct RuleSet {
    rules: Vec<Box<dyn ExclusionRule>>,
    counts: RuleCounts,
}

impl RuleSet {
    /// The standard rule order for an archive owned by `home_account_id`
    pub fn standard(home_account_id: impl Into<String>, excluded_tags: Vec<String>) -> Self {
        Self::with_rules(vec![
            Box::new(RetweetRule),
            Box::new(AnnouncementRule),
            Box::new(ReplyRule::new(home_account_id)),
            Box::new(TagRule::new(excluded_tags)),
        ])
    }

    /// Build a rule set evaluating `rules` in the given order
    pub fn with_rules(rules: Vec<Box<dyn ExclusionRule>>) -> Self {
        Self {
            rules,
            counts: RuleCounts::default(),
        }
    }

    /// Run the rules against a record, returning the first that matches.
    pub fn evaluate(&mut self, record: &Record) -> Option<RuleKind> {
        let kind = self
            .rules
            .iter()
            .find(|rule| rule.matches(record))
            .map(|rule| rule.kind())?;

        self.counts.bump(kind);
        debug!(id = %record.id, rule = %kind, "excluded");
        Some(kind)
    }

    /// Exclusion counts so far
    pub fn counts(&self) -> RuleCounts {
        self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::tests::record;

    fn rule_set() -> RuleSet {
        RuleSet::standard("42", vec!["#nowplaying".to_string()])
    }

    #[test]
    fn plain_post_passes_every_rule() {
        let mut rules = rule_set();

        assert_eq!(rules.evaluate(&record("1", "", 0, "Good morning")), None);
        assert_eq!(rules.counts().total(), 0);
    }

    #[test]
    fn first_matching_rule_wins() {
        let mut rules = rule_set();
        let post = record("1", "", 0, "RT great track #nowplaying");

        assert_eq!(rules.evaluate(&post), Some(RuleKind::Retweet));
        assert_eq!(rules.counts().retweets, 1);
        assert_eq!(rules.counts().tagged, 0);
    }

    #[test]
    fn announcement_beats_reply_and_tag() {
        let mut rules = rule_set();
        let post = record("1", "", 0, "** New blog post #nowplaying");

        assert_eq!(rules.evaluate(&post), Some(RuleKind::Announcement));
    }

    #[test]
    fn counts_accumulate_per_rule() {
        let mut rules = rule_set();
        rules.evaluate(&record("1", "", 0, "@bob hi"));
        rules.evaluate(&record("2", "", 1, "@alice hi"));
        rules.evaluate(&record("3", "", 2, "#nowplaying something"));
        rules.evaluate(&record("4", "", 3, "kept"));

        let counts = rules.counts();
        assert_eq!(counts.get(RuleKind::Reply), 2);
        assert_eq!(counts.get(RuleKind::Tag), 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn custom_order_is_respected() {
        let mut rules = RuleSet::with_rules(vec![
            Box::new(TagRule::new(vec!["#x".to_string()])),
            Box::new(RetweetRule),
        ]);

        assert_eq!(rules.evaluate(&record("1", "", 0, "RT #x")), Some(RuleKind::Tag));
    }
}
