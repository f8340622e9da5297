//! Owned storage for retained records.

use crate::core::record::{Record, RecordId};
use std::collections::{HashMap, HashSet};

/// Retained records addressed by identifier, remembering the order in
/// which they were retained.
///
/// All mutation goes through an identifier lookup; iteration always
/// follows retention order, never hash order.
#[derive(Debug, Default, Clone)]
pub struct RecordArena {
    records: HashMap<RecordId, Record>,
    order: Vec<RecordId>,
}

impl RecordArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retain a record. Returns `false` and leaves the arena unchanged
    /// if a record with the same identifier is already retained.
    pub fn insert(&mut self, record: Record) -> bool {
        if self.records.contains_key(&record.id) {
            return false;
        }
        self.order.push(record.id.clone());
        self.records.insert(record.id.clone(), record);
        true
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Record> {
        self.records.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Identifiers in retention order
    pub fn ids(&self) -> &[RecordId] {
        &self.order
    }

    /// Records in retention order
    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Drop every record whose identifier is in `ids`, then remove those
    /// identifiers from the reply lists of the records that remain.
    pub fn remove_all(&mut self, ids: &HashSet<RecordId>) {
        if ids.is_empty() {
            return;
        }
        self.order.retain(|id| !ids.contains(id));
        self.records.retain(|id, _| !ids.contains(id));
        for record in self.records.values_mut() {
            record.replies.retain(|reply| !ids.contains(reply));
        }
    }

    /// Consume the arena, yielding records in retention order
    pub fn into_records(mut self) -> Vec<Record> {
        self.order
            .iter()
            .filter_map(|id| self.records.remove(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::tests::record;

    #[test]
    fn iteration_follows_insertion_order() {
        let mut arena = RecordArena::new();
        for id in ["30", "10", "20"] {
            arena.insert(record(id, "", 0, id));
        }

        let ids: Vec<_> = arena.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["30", "10", "20"]);
    }

    #[test]
    fn duplicate_identifier_is_rejected() {
        let mut arena = RecordArena::new();

        assert!(arena.insert(record("1", "", 0, "first")));
        assert!(!arena.insert(record("1", "", 1, "second")));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get("1").unwrap().text, "first");
    }

    #[test]
    fn remove_all_prunes_reply_lists() {
        let mut arena = RecordArena::new();
        let mut parent = record("1", "", 0, "parent");
        parent.replies = vec!["3".to_string(), "2".to_string()];
        arena.insert(parent);
        arena.insert(record("2", "1", 1, "kept reply"));
        arena.insert(record("3", "1", 2, "removed reply"));

        arena.remove_all(&HashSet::from(["3".to_string()]));

        assert_eq!(arena.ids(), ["1", "2"]);
        assert_eq!(arena.get("1").unwrap().replies, ["2"]);
    }

    #[test]
    fn into_records_keeps_order() {
        let mut arena = RecordArena::new();
        arena.insert(record("b", "", 0, "b"));
        arena.insert(record("a", "", 0, "a"));

        let ids: Vec<_> = arena.into_records().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, ["b", "a"]);
    }
}
