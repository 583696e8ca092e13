// File: crates/barchart-core/src/reconcile.rs
// Summary: Keyed diff of the previous rendered bar set against a new dataset.

use std::collections::HashSet;

use crate::data::{Dataset, Key};

/// Classification of every known key across one redraw.
///
/// `entering` and `retained` follow the new dataset's order (the new display
/// order); `exiting` follows the previous rendered order. The three lists
/// are disjoint, `entering` plus `retained` covers the new dataset exactly,
/// and `exiting` covers exactly the keys that were dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReconcilePlan {
    pub entering: Vec<Key>,
    pub exiting: Vec<Key>,
    pub retained: Vec<Key>,
}

impl ReconcilePlan {
    /// True when the redraw neither adds nor removes bars.
    pub fn is_stable(&self) -> bool {
        self.entering.is_empty() && self.exiting.is_empty()
    }
}

/// Diff `previous` (rendered key order) against `next`.
///
/// Keys are assumed unique within `next`; the ingestion path rejects
/// duplicates before a dataset can reach this point.
pub fn reconcile(previous: &[Key], next: &Dataset) -> ReconcilePlan {
    let prev_set: HashSet<&str> = previous.iter().map(|k| k.as_str()).collect();
    let next_set: HashSet<&str> = next.keys().map(|k| k.as_str()).collect();

    let mut plan = ReconcilePlan::default();
    for key in next.keys() {
        if prev_set.contains(key.as_str()) {
            plan.retained.push(key.clone());
        } else {
            plan.entering.push(key.clone());
        }
    }
    for key in previous {
        if !next_set.contains(key.as_str()) {
            plan.exiting.push(key.clone());
        }
    }
    plan
}
