//! A max-heap of an optionally fixed size, used to track the current k-best
//! hits of a nearest-neighbor-style search.

use std::collections::BinaryHeap;

use rayon::prelude::*;

use super::MinItem;

/// A max-heap over `(A, T)` pairs, ordered by `T`, capped at `k` items.
///
/// When full, pushing a new item only keeps it if it is smaller than the
/// current largest ("worst") item, which is then evicted. This is the
/// standard shape for maintaining "the k closest things seen so far".
#[derive(Debug)]
pub struct SizedHeap<A, T: PartialOrd> {
    heap: BinaryHeap<MinItem<A, T>>,
    k: usize,
}

impl<A, T: PartialOrd> SizedHeap<A, T> {
    /// Creates a new heap. `k = None` means unbounded.
    #[must_use]
    pub fn new(k: Option<usize>) -> Self {
        k.map_or_else(
            || Self {
                heap: BinaryHeap::new(),
                k: usize::MAX,
            },
            |k| Self {
                heap: BinaryHeap::with_capacity(k),
                k,
            },
        )
    }

    /// Pushes an item onto the heap, evicting the current worst item if the
    /// heap is already full and the new item is better.
    pub fn push(&mut self, (a, item): (A, T)) {
        if self.heap.len() < self.k {
            self.heap.push(MinItem(a, item));
        } else if let Some(top) = self.heap.peek() {
            if item < top.1 {
                self.heap.pop();
                self.heap.push(MinItem(a, item));
            }
        }
    }

    /// Pushes several items, maintaining the max size.
    pub fn extend<I: IntoIterator<Item = (A, T)>>(&mut self, items: I) {
        for item in items {
            self.push(item);
        }
    }

    /// Returns the current worst (largest) item without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<(&A, &T)> {
        self.heap.peek().map(|MinItem(a, t)| (a, t))
    }

    /// Removes and returns the current worst (largest) item.
    pub fn pop(&mut self) -> Option<(A, T)> {
        self.heap.pop().map(|MinItem(a, t)| (a, t))
    }

    /// Consumes the heap, returning its items in arbitrary order.
    pub fn take_items(self) -> impl Iterator<Item = (A, T)> {
        self.heap.into_iter().map(|MinItem(a, t)| (a, t))
    }

    /// Returns whether the heap holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns whether the heap has reached its capacity `k`.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    /// Merges another heap into this one.
    pub fn merge(&mut self, other: Self) {
        self.extend(other.take_items());
    }
}

impl<A, T: PartialOrd> FromIterator<(A, T)> for SizedHeap<A, T> {
    fn from_iter<I: IntoIterator<Item = (A, T)>>(iter: I) -> Self {
        let mut heap = Self::new(None);
        for (a, item) in iter {
            heap.heap.push(MinItem(a, item));
        }
        heap
    }
}

impl<A: Send, T: PartialOrd + Send> FromParallelIterator<(A, T)> for SizedHeap<A, T> {
    fn from_par_iter<I: IntoParallelIterator<Item = (A, T)>>(par_iter: I) -> Self {
        par_iter
            .into_par_iter()
            .fold(
                || Self::new(None),
                |mut acc, (a, item)| {
                    acc.heap.push(MinItem(a, item));
                    acc
                },
            )
            .reduce(
                || Self::new(None),
                |mut acc, heap| {
                    acc.merge(heap);
                    acc
                },
            )
    }
}
