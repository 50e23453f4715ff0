//! Newtype wrappers that order a payload by an associated key, ignoring the
//! payload itself for comparison purposes.
//!
//! These back every max-/min-heap in the crate: the lazy cell-radius heap in
//! [`crate::graph`], the viable-set heaps in [`crate::tree::search`], and the
//! sized k-nearest-neighbor heaps in [`crate::utils::SizedHeap`].

use core::cmp::Ordering;

/// Orders `(A, T)` pairs by `T` only, smallest first — the natural ordering
/// for `std::collections::BinaryHeap`-backed *min*-heaps (a `BinaryHeap` is a
/// max-heap, so wrapping the key lets `Reverse`-style tricks be expressed by
/// choosing `MinItem` vs. `MaxItem` instead of nesting `Reverse`).
#[derive(Clone, Copy, Debug)]
pub struct MinItem<A, T>(pub A, pub T);

/// Orders `(A, T)` pairs by `T` only, largest first.
#[derive(Clone, Copy, Debug)]
pub struct MaxItem<A, T>(pub A, pub T);

macro_rules! impl_key_ord {
    ($name:ident, $reverse:expr) => {
        impl<A, T: PartialEq> PartialEq for $name<A, T> {
            fn eq(&self, other: &Self) -> bool {
                self.1 == other.1
            }
        }

        impl<A, T: PartialEq> Eq for $name<A, T> {}

        impl<A, T: PartialOrd> PartialOrd for $name<A, T> {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl<A, T: PartialOrd> Ord for $name<A, T> {
            fn cmp(&self, other: &Self) -> Ordering {
                let ord = self.1.partial_cmp(&other.1).unwrap_or(Ordering::Equal);
                if $reverse {
                    ord.reverse()
                } else {
                    ord
                }
            }
        }
    };
}

impl_key_ord!(MinItem, true);
impl_key_ord!(MaxItem, false);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn min_item_pops_smallest_first() {
        let mut heap = BinaryHeap::new();
        heap.push(MinItem("a", 3.0));
        heap.push(MinItem("b", 1.0));
        heap.push(MinItem("c", 2.0));

        assert_eq!(heap.pop().map(|MinItem(a, _)| a), Some("b"));
        assert_eq!(heap.pop().map(|MinItem(a, _)| a), Some("c"));
        assert_eq!(heap.pop().map(|MinItem(a, _)| a), Some("a"));
    }

    #[test]
    fn max_item_pops_largest_first() {
        let mut heap = BinaryHeap::new();
        heap.push(MaxItem("a", 3.0));
        heap.push(MaxItem("b", 1.0));
        heap.push(MaxItem("c", 2.0));

        assert_eq!(heap.pop().map(|MaxItem(a, _)| a), Some("a"));
        assert_eq!(heap.pop().map(|MaxItem(a, _)| a), Some("c"));
        assert_eq!(heap.pop().map(|MaxItem(a, _)| a), Some("b"));
    }
}
