// File: crates/barchart-core/tests/reconcile.rs
// Purpose: Validate keyed diffing: enter/exit/retain classification and order.

use std::collections::HashSet;

use barchart_core::{reconcile, DataPoint, Dataset, Key};

fn keyed(keys: &[&str]) -> Dataset {
    Dataset::new(
        keys.iter()
            .enumerate()
            .map(|(i, k)| DataPoint::new(*k, i as f64 + 1.0))
            .collect(),
    )
}

fn owned(keys: &[&str]) -> Vec<Key> {
    keys.iter().map(|k| k.to_string()).collect()
}

#[test]
fn additions_and_reorder_without_removals() {
    let prev = owned(&["A", "B", "C", "D", "E", "F", "G"]);
    let next = keyed(&["H", "D", "C", "I", "E", "F", "B", "G", "A"]);
    let plan = reconcile(&prev, &next);
    assert_eq!(plan.entering, owned(&["H", "I"]));
    assert!(plan.exiting.is_empty());
    assert_eq!(plan.retained, owned(&["D", "C", "E", "F", "B", "G", "A"]));
}

#[test]
fn mixed_additions_and_removals() {
    let prev = owned(&["A", "B", "C", "D", "E", "F", "G"]);
    let next = keyed(&["B", "D", "I", "E", "H", "A"]);
    let plan = reconcile(&prev, &next);
    assert_eq!(plan.entering, owned(&["I", "H"]));
    assert_eq!(plan.exiting, owned(&["C", "F", "G"]));
    assert_eq!(plan.retained, owned(&["B", "D", "E", "A"]));
    assert!(!plan.is_stable());
}

#[test]
fn classification_partitions_all_known_keys() {
    let prev = owned(&["A", "B", "C", "D"]);
    let next = keyed(&["C", "E", "A", "F"]);
    let plan = reconcile(&prev, &next);

    let entering: HashSet<_> = plan.entering.iter().collect();
    let exiting: HashSet<_> = plan.exiting.iter().collect();
    let retained: HashSet<_> = plan.retained.iter().collect();

    assert!(entering.is_disjoint(&exiting));
    assert!(entering.is_disjoint(&retained));
    assert!(exiting.is_disjoint(&retained));

    // entering + retained covers the new dataset exactly
    let covered: HashSet<_> = entering.union(&retained).cloned().collect();
    let expected: HashSet<_> = next.keys().collect();
    assert_eq!(covered, expected);

    // exiting covers exactly the dropped keys
    for key in &prev {
        let kept = retained.contains(key);
        let dropped = exiting.contains(key);
        assert!(kept ^ dropped, "key {key} must be retained xor exiting");
    }
}

#[test]
fn first_draw_enters_everything() {
    let plan = reconcile(&[], &keyed(&["A", "B"]));
    assert_eq!(plan.entering, owned(&["A", "B"]));
    assert!(plan.exiting.is_empty());
    assert!(plan.retained.is_empty());
}

#[test]
fn empty_dataset_exits_everything() {
    let prev = owned(&["A", "B"]);
    let plan = reconcile(&prev, &Dataset::default());
    assert!(plan.entering.is_empty());
    assert_eq!(plan.exiting, owned(&["A", "B"]));
    assert!(plan.retained.is_empty());
}

#[test]
fn unchanged_dataset_is_stable() {
    let prev = owned(&["A", "B", "C"]);
    let plan = reconcile(&prev, &keyed(&["A", "B", "C"]));
    assert!(plan.is_stable());
    assert_eq!(plan.retained, prev);
}
