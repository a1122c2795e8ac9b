//! NotificationStore - ordered inbox with copy-on-write snapshots
//!
//! Every effective mutation installs a new `Arc<[Notification]>`, so a
//! snapshot taken by a caller never changes underneath it. Calls that
//! change nothing keep the current snapshot.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use super::Notification;

/// In-memory inbox, display order = seed order
#[derive(Debug, Clone)]
pub struct NotificationStore {
    records: Arc<[Notification]>,
}

impl NotificationStore {
    /// Initialize the collection, keeping input order
    ///
    /// Later records reusing an earlier id are dropped.
    pub fn seed(records: impl IntoIterator<Item = Notification>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();

        for record in records {
            if seen.insert(record.id.clone()) {
                kept.push(record);
            } else {
                warn!(id = %record.id, "dropping seed record with duplicate id");
            }
        }

        debug!(count = kept.len(), "notification store seeded");
        Self {
            records: kept.into(),
        }
    }

    /// Empty store
    pub fn empty() -> Self {
        Self::seed(Vec::new())
    }

    /// Current snapshot (cheap clone)
    pub fn records(&self) -> Arc<[Notification]> {
        Arc::clone(&self.records)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.records.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.records.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count of unread records, recomputed on every call
    pub fn unread_count(&self) -> usize {
        self.records.iter().filter(|n| !n.read).count()
    }

    /// Mark one record read. Returns `true` if it was unread.
    pub fn mark_read(&mut self, id: &str) -> bool {
        let Some(pos) = self.records.iter().position(|n| n.id == id && !n.read) else {
            return false;
        };

        let mut next = self.records.to_vec();
        next[pos].read = true;
        self.records = next.into();

        debug!(id, "notification marked read");
        true
    }

    /// Mark every record read. Returns how many changed.
    pub fn mark_all_read(&mut self) -> usize {
        let changed = self.unread_count();
        if changed == 0 {
            return 0;
        }

        let next: Vec<Notification> = self
            .records
            .iter()
            .cloned()
            .map(|mut n| {
                n.read = true;
                n
            })
            .collect();
        self.records = next.into();

        debug!(changed, "all notifications marked read");
        changed
    }

    /// Remove a record permanently. Returns `true` if one was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }

        let next: Vec<Notification> = self
            .records
            .iter()
            .filter(|n| n.id != id)
            .cloned()
            .collect();
        self.records = next.into();

        debug!(id, remaining = self.records.len(), "notification deleted");
        true
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::empty()
    }
}
