//! Partition sort and name search over record slices.

use super::VariableRecord;
use std::cmp::Ordering;

/// In-place quicksort, Lomuto partition with the last element as pivot.
///
/// Recurses into the smaller partition and loops on the larger one, so the
/// stack depth stays logarithmic even for already-sorted input.
pub fn quicksort_by<T, F>(mut items: &mut [T], compare: &F)
where
    F: Fn(&T, &T) -> Ordering,
{
    while items.len() > 1 {
        let pivot = partition(items, compare);
        let (left, right) = std::mem::take(&mut items).split_at_mut(pivot);
        let right = &mut right[1..];
        if left.len() < right.len() {
            quicksort_by(left, compare);
            items = right;
        } else {
            quicksort_by(right, compare);
            items = left;
        }
    }
}

fn partition<T, F>(items: &mut [T], compare: &F) -> usize
where
    F: Fn(&T, &T) -> Ordering,
{
    let last = items.len() - 1;
    let mut store = 0;
    for i in 0..last {
        if compare(&items[i], &items[last]) != Ordering::Greater {
            items.swap(i, store);
            store += 1;
        }
    }
    items.swap(store, last);
    store
}

/// Sort records by ordinal comparison of their full names.
pub fn sort_records(records: &mut [VariableRecord]) {
    quicksort_by(records, &|a: &VariableRecord, b: &VariableRecord| {
        a.name.as_bytes().cmp(b.name.as_bytes())
    });
}

/// Binary search on a slice sorted by name.
pub fn binary_search(records: &[VariableRecord], name: &str) -> Option<usize> {
    records
        .binary_search_by(|r| r.name.as_bytes().cmp(name.as_bytes()))
        .ok()
}

pub fn linear_search(records: &[VariableRecord], name: &str) -> Option<usize> {
    records.iter().position(|r| r.name == name)
}

// =============================================================================
// Unit Tests
// =============================================================================
