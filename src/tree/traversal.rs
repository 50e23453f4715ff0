//! The heap-order flat encoding of a [`super::BallTree`]: a single array,
//! sorted by non-increasing radius, that both the dual-tree search
//! ([`crate::dual_tree`]) and the `GT` index ([`crate::gt`]) are built on.
//!
//! Grounded on `original_source/include/balltree.hpp`'s `HeapOrderEntry` /
//! `get_traversal`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::BallTree;
use crate::metric::Metric;

/// One entry of a ball tree's heap-order traversal.
///
/// The traversal records only the root and *right* children: every internal
/// node's left child keeps the same center as its parent, so it is tracked
/// implicitly by reusing the parent's entry rather than getting one of its
/// own. `left_radius` is the radius of the sibling left subtree produced by
/// the same split that introduced this entry — callers reconstruct the
/// split history from this stream without ever walking the tree itself.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeapOrderEntry {
    /// Index (into the tree's point array) of this entry's center.
    pub center: usize,
    /// 2-approximate radius of this entry's subtree, as of the split that
    /// created it.
    pub radius: f64,
    /// Index, into the traversal's own output array, of this entry's
    /// logical parent. `None` only for the first (root) entry.
    pub parent_index: Option<usize>,
    /// Radius of the left subtree produced by the split that created this
    /// entry; `0.0` (unused) for the root.
    pub left_radius: f64,
}

/// Which role a queued tree node plays once popped: either it still needs
/// its own traversal entry (the root, or a not-yet-popped right child), or
/// it is a left-subtree continuation of an entry already emitted.
enum Role {
    Root,
    Right { parent_index: usize, left_radius: f64 },
    LeftContinuation { out_index: usize },
}

struct QueueItem {
    node: usize,
    role: Role,
    radius: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.radius == other.radius
    }
}
impl Eq for QueueItem {}
impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.radius.partial_cmp(&other.radius).unwrap_or(Ordering::Equal)
    }
}

/// Produces the heap-order traversal of `tree`: a flat array of
/// [`HeapOrderEntry`], one per point, enumerating the root plus every right
/// child in max-radius-first order.
///
/// A node's children never have a larger radius than the node itself, so a
/// plain max-heap over "nodes not yet assigned a traversal entry" pops in an
/// order consistent with the tree's topology (parents before children) with
/// no extra bookkeeping. Left children are popped only to discover their own
/// children — they never get a new entry, since they share their parent's
/// center and are tracked as a [`Role::LeftContinuation`] of it instead.
#[must_use]
pub fn get_traversal<P, M: Metric<P>>(tree: &BallTree<P, M>) -> Vec<HeapOrderEntry> {
    let mut out = Vec::with_capacity(tree.len());
    if tree.is_empty() {
        return out;
    }

    let root = tree.root();
    let mut heap = BinaryHeap::with_capacity(tree.len());
    heap.push(QueueItem {
        node: root,
        role: Role::Root,
        radius: tree.node(root).radius(),
    });

    while let Some(QueueItem { node, role, .. }) = heap.pop() {
        let n = tree.node(node);
        let out_index = match role {
            Role::Root => {
                out.push(HeapOrderEntry {
                    center: n.center(),
                    radius: n.radius(),
                    parent_index: None,
                    left_radius: 0.0,
                });
                0
            }
            Role::LeftContinuation { out_index } => out_index,
            Role::Right { parent_index, left_radius } => {
                out.push(HeapOrderEntry {
                    center: n.center(),
                    radius: n.radius(),
                    parent_index: Some(parent_index),
                    left_radius,
                });
                out.len() - 1
            }
        };

        if let (Some(l), Some(r)) = (n.left(), n.right()) {
            let left_radius = tree.node(l).radius();
            heap.push(QueueItem {
                node: l,
                role: Role::LeftContinuation { out_index },
                radius: left_radius,
            });
            heap.push(QueueItem {
                node: r,
                role: Role::Right {
                    parent_index: out_index,
                    left_radius,
                },
                radius: tree.node(r).radius(),
            });
        }
    }

    out
}
