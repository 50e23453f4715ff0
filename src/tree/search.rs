//! The generic heap-guided search pattern shared by nearest, farthest, and
//! range queries over a [`super::BallTree`].
//!
//! Grounded on `original_source/include/balltree.hpp`'s `generic_search`
//! template method, and on the tree-search recursion shape of
//! `cakes/exact/rnn_chess.rs` (subsumed/straddler node classification,
//! generalized here into the `is_viable` callback).

use std::cell::RefCell;
use std::collections::BinaryHeap;

use super::BallTree;
use crate::metric::Metric;
use crate::utils::MaxItem;

/// Walks `tree` starting from the root, guided by a max-heap ordered by node
/// radius (the same ordering `NeighborGraph`'s construction heap uses).
///
/// For every node popped off the heap, `update(node, center, dist_to_query,
/// radius)` is called once; it returns whether this node's children are
/// still worth examining (`false` means the node was absorbed whole and its
/// subtree should not be descended into). For each child still worth
/// considering, `is_viable(dist, radius)` decides whether its subtree could
/// still matter; nodes for which it returns `false` are pruned without
/// visiting any of their descendants.
///
/// This single traversal shape implements nearest, farthest, and range
/// search: only `update` and `is_viable` change (see [`nearest`],
/// [`farthest`], [`range`]).
pub fn generic_search<P, M, U, V>(tree: &BallTree<P, M>, query: &P, mut update: U, mut is_viable: V)
where
    M: Metric<P>,
    U: FnMut(usize, usize, f64, f64) -> bool,
    V: FnMut(f64, f64) -> bool,
{
    if tree.is_empty() {
        return;
    }

    let root = tree.root();
    let d_root = tree.metric().dist(query, tree.point(tree.node(root).center()));
    let mut heap: BinaryHeap<MaxItem<(usize, f64), f64>> = BinaryHeap::new();
    // The root is always examined at least once; `is_viable` only prunes
    // children before they are pushed.
    heap.push(MaxItem((root, d_root), tree.node(root).radius()));

    while let Some(MaxItem((node_idx, d), _)) = heap.pop() {
        let node = tree.node(node_idx);
        if !update(node_idx, node.center(), d, node.radius()) {
            continue;
        }

        for c in tree.children(node_idx) {
            let child = tree.node(c);
            let dc = tree.metric().dist(query, tree.point(child.center()));
            if is_viable(dc, child.radius()) {
                heap.push(MaxItem((c, dc), child.radius()));
            }
        }
    }
}

/// Returns the `k` points nearest to `query`, as `(point index, distance)`
/// pairs, in arbitrary order.
#[must_use]
pub fn nearest<P, M: Metric<P>>(tree: &BallTree<P, M>, query: &P, k: usize) -> Vec<(usize, f64)> {
    let heap = RefCell::new(crate::utils::SizedHeap::new(Some(k)));
    generic_search(
        tree,
        query,
        |_, center, d, _| {
            heap.borrow_mut().push((center, d));
            true
        },
        |d, r| {
            let h = heap.borrow();
            let d_min = d - r;
            !h.is_full() || h.peek().map_or(true, |(_, worst)| d_min < *worst)
        },
    );
    heap.into_inner().take_items().collect()
}

/// Returns the `k` points farthest from `query`, as `(point index, distance)`
/// pairs, in arbitrary order.
///
/// Implemented by running the same `k`-smallest [`crate::utils::SizedHeap`]
/// over negated distances, so the "smallest k" it naturally keeps are the
/// `k` points with the largest true distance.
#[must_use]
pub fn farthest<P, M: Metric<P>>(tree: &BallTree<P, M>, query: &P, k: usize) -> Vec<(usize, f64)> {
    let heap = RefCell::new(crate::utils::SizedHeap::new(Some(k)));
    generic_search(
        tree,
        query,
        |_, center, d, _| {
            heap.borrow_mut().push((center, -d));
            true
        },
        |d, r| {
            let h = heap.borrow();
            let d_max_neg = -(d + r);
            !h.is_full() || h.peek().map_or(true, |(_, worst)| d_max_neg < *worst)
        },
    );
    heap.into_inner().take_items().map(|(i, neg_d)| (i, -neg_d)).collect()
}

/// Returns every subtree fully contained in the ball `B(query, radius)`, as
/// the tree-node indices of the absorbed subtrees' roots.
///
/// Absorb-and-stop: once `dist(node.center, query) + node.radius <= radius`,
/// the whole subtree is reported as one hit and its children are never
/// visited. A node is only pushed at all if it is not already absorbed
/// (`dist + radius > radius`) *and* its ball still overlaps the query ball
/// (`dist - radius <= radius`). Callers can expand an absorbed node into
/// individual point indices via [`super::BallTree::subtree_points`].
#[must_use]
pub fn range<P, M: Metric<P>>(tree: &BallTree<P, M>, query: &P, radius: f64) -> Vec<usize> {
    let results = RefCell::new(Vec::new());
    generic_search(
        tree,
        query,
        |node_idx, _, d, r| {
            if d + r <= radius {
                results.borrow_mut().push(node_idx);
                false
            } else {
                true
            }
        },
        |d, r| d + r > radius && d - r <= radius,
    );
    results.into_inner()
}
