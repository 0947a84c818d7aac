//! Stable min-priority frontier for Dijkstra and A*.
//!
//! Entries are stored in a min-heap keyed by `(key, insertion_order)`, so
//! entries with equal keys pop first-in-first-out. Visitation order is
//! therefore reproducible across runs and platforms.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Entry<T> {
    item: T,
    key: u32,
    /// Monotonically increasing; lower = inserted earlier.
    seq: u64,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Natural order; the heap wraps entries in `Reverse`.
        self.key
            .cmp(&other.key)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A min-priority queue with FIFO tie-breaking.
#[derive(Debug)]
pub struct Frontier<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    seq: u64,
}

impl<T> Frontier<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Insert `item` with priority `key` (lower pops first).
    pub fn push(&mut self, item: T, key: u32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { item, key, seq }));
    }

    /// Pop the entry with the lowest key; ties go to the earliest push.
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|Reverse(entry)| entry.item)
    }

    /// Pop the lowest entry together with its key.
    pub fn pop_with_key(&mut self) -> Option<(T, u32)> {
        self.heap.pop().map(|Reverse(entry)| (entry.item, entry.key))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for Frontier<T> {
    fn default() -> Self {
        Self::new()
    }
}
