// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Min-priority queue used by the best-first searches.

use alloc::collections::BinaryHeap;
use core::cmp::Ordering;
use core::fmt::{self, Debug};

struct Entry<T> {
    priority: f32,
    seq: u64,
    value: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // `BinaryHeap` pops the greatest entry: lowest priority first, then the
    // most recently pushed among equal priorities.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then(self.seq.cmp(&other.seq))
    }
}

/// A queue that always yields the entry with the smallest `f32` priority.
///
/// Among entries with equal priority the one pushed last is popped first.
/// Priorities are squared distances in this crate and are expected to be
/// non-negative and not NaN; any total order would do, `f32::total_cmp` is used.
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> PriorityQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Create an empty queue with room for `n` entries.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(n),
            next_seq: 0,
        }
    }

    /// Enqueue `value` with the given priority.
    pub fn push(&mut self, value: T, priority: f32) {
        debug_assert!(!priority.is_nan(), "priority must not be NaN");
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            value,
        });
    }

    /// Remove and return the entry with the smallest priority.
    pub fn pop(&mut self) -> Option<(T, f32)> {
        self.heap.pop().map(|e| (e.value, e.priority))
    }

    /// The smallest priority currently queued.
    pub fn peek_priority(&self) -> Option<f32> {
        self.heap.peek().map(|e| e.priority)
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every queued entry.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.heap.len())
            .field("min_priority", &self.peek_priority())
            .finish_non_exhaustive()
    }
}
