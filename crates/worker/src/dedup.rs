//! Bounded, insertion-ordered recent-window dedup set. `existing_lead_keys`
//! returns a window of up to 5000 keys (spec §4.1); the pipeline folds
//! newly-seen keys into that window as it parses so the oldest keys are
//! evicted first once the window fills, without reordering on re-insert of
//! an already-known key. An `IndexSet` is used instead of a `HashSet`
//! because eviction order must track insertion order, not hash order.

use indexmap::IndexSet;

pub struct RecentWindow {
    keys: IndexSet<String>,
    capacity: usize,
}

impl RecentWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            keys: IndexSet::new(),
            capacity,
        }
    }

    /// Seeds the window from `existing_lead_keys`'s most-recent-first
    /// result, re-reversed to oldest-first so later inserts evict in the
    /// right order.
    pub fn seed(existing_recent_first: &[String], capacity: usize) -> Self {
        let mut window = Self::new(capacity);
        for key in existing_recent_first.iter().rev() {
            window.keys.insert(key.clone());
        }
        window
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Inserts `key` if new. Returns true if this was a first occurrence.
    /// Evicts the oldest key once over capacity.
    pub fn insert(&mut self, key: &str) -> bool {
        if self.keys.contains(key) {
            return false;
        }
        self.keys.insert(key.to_string());
        if self.keys.len() > self.capacity {
            self.keys.shift_remove_index(0);
        }
        true
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
#[path = "dedup_tests.rs"]
mod tests;
