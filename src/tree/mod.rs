//! Ball trees derived from a greedy permutation.
//!
//! Grounded on `original_source/include/balltree.hpp` / `balltree_impl.hpp`,
//! restructured around index-addressed storage following `tree/cluster/mod.rs`.

mod node;
pub mod search;
pub mod traversal;

pub use node::Node;
pub use traversal::HeapOrderEntry;

use mt_logger::{mt_log, Level};

use crate::error::Result;
use crate::greedy::{greedy_permutation, GreedyPermutation};
use crate::metric::Metric;

/// A ball tree: a binary tree over a greedy permutation of a point set, with
/// 2-approximate radii, supporting nearest/farthest/range queries via
/// [`search`] and dual-tree range search via [`crate::dual_tree`].
pub struct BallTree<P, M> {
    points: Vec<P>,
    metric: M,
    nodes: Vec<Node>,
}

impl<P, M: Metric<P>> BallTree<P, M> {
    /// Builds a ball tree over `points` under `metric`.
    ///
    /// Internally computes the greedy permutation of `points` (see
    /// [`crate::greedy::greedy_permutation`]) and then splits each leaf in
    /// permutation order into the binary tree described in
    /// [`Self::from_permutation`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::EmptyInput`] if `points` is empty.
    pub fn new(points: Vec<P>, metric: M) -> Result<Self>
    where
        P: Clone,
        M: Clone,
    {
        let gp = greedy_permutation(points, metric.clone())?;
        Ok(Self::from_permutation(gp, metric))
    }

    /// Builds a ball tree directly from an already-computed greedy
    /// permutation and the metric it was built with.
    ///
    /// [`GreedyPermutation`] does not itself carry a metric (it only records
    /// points and predecessor indices), so the caller supplies it again
    /// here; this is cheap for the zero-sized metrics bundled with this
    /// crate (e.g. [`crate::metric::Euclidean`]).
    #[must_use]
    pub fn from_permutation(gp: GreedyPermutation<P>, metric: M) -> Self {
        let (points, predecessor) = gp.into_parts();
        Self::from_parts(points, metric, &predecessor)
    }

    /// Builds a ball tree from a permutation's points, an explicit metric,
    /// and its predecessor array.
    ///
    /// Maintains `leaf[i]`: the tree leaf currently holding permutation
    /// point `i`. The root starts as a single leaf holding `p_0`. For every
    /// `i = 1..n`, the leaf holding `pred[i]` is split into two children: a
    /// `left` child that copies the leaf's own center, and a `right` child
    /// centered at `p_i`. This produces exactly `2n - 1` nodes (for `n >
    /// 0`), every internal node with exactly two children.
    #[must_use]
    pub fn from_parts(points: Vec<P>, metric: M, predecessor: &[Option<usize>]) -> Self {
        let n = points.len();
        mt_log!(Level::Debug, "building ball tree over {n} points");

        let mut nodes = Vec::with_capacity(if n == 0 { 0 } else { 2 * n - 1 });
        let mut leaf = vec![0usize; n];

        if n > 0 {
            nodes.push(Node {
                center: 0,
                radius: 0.0,
                size: 1,
                left: None,
                right: None,
            });
            leaf[0] = 0;

            for i in 1..n {
                let Some(pred) = predecessor[i] else {
                    unreachable!("only index 0 has no predecessor");
                };
                let split = leaf[pred];
                debug_assert!(nodes[split].is_leaf(), "split target must still be a leaf");

                let left_idx = nodes.len();
                nodes.push(Node {
                    center: nodes[split].center,
                    radius: 0.0,
                    size: 1,
                    left: None,
                    right: None,
                });
                let right_idx = nodes.len();
                nodes.push(Node {
                    center: i,
                    radius: 0.0,
                    size: 1,
                    left: None,
                    right: None,
                });

                nodes[split].left = Some(left_idx);
                nodes[split].right = Some(right_idx);
                leaf[pred] = left_idx;
                leaf[i] = right_idx;
            }
        }

        // Every node's two children, when it has any, were pushed strictly
        // after it, so a single reverse pass over the index-addressed array
        // is already a valid post-order: no explicit stack needed.
        for i in (0..nodes.len()).rev() {
            let (Some(l), Some(r)) = (nodes[i].left, nodes[i].right) else {
                continue;
            };
            let d = metric.dist(&points[nodes[i].center], &points[nodes[r].center]);
            nodes[i].radius = nodes[l].radius.max(d + nodes[r].radius);
            nodes[i].size = nodes[l].size + nodes[r].size;
        }

        let root_radius = nodes.first().map_or(0.0, |r| r.radius);
        mt_log!(Level::Debug, "ball tree built: {} nodes, root radius = {root_radius}", nodes.len());

        Self { points, metric, nodes }
    }

    /// Number of points in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the tree holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The index of the root node (always `0`).
    #[must_use]
    pub const fn root(&self) -> usize {
        0
    }

    /// Returns the node at `index`.
    #[must_use]
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Returns the point stored at `index` (a node's center, or any other
    /// permutation position).
    #[must_use]
    pub fn point(&self, index: usize) -> &P {
        &self.points[index]
    }

    /// Returns the tree's metric.
    #[must_use]
    pub const fn metric(&self) -> &M {
        &self.metric
    }

    /// Returns the point indices of every center in `node`'s subtree
    /// (including `node` itself), via an explicit stack.
    #[must_use]
    pub fn subtree_points(&self, node: usize) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.nodes[node].size);
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            out.push(self.nodes[n].center);
            for c in self.children(n) {
                stack.push(c);
            }
        }
        out
    }

    /// Returns `node`'s children (zero or two), in left-then-right order.
    pub(crate) fn children(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        let n = &self.nodes[node];
        [n.left, n.right].into_iter().flatten()
    }

    /// `dist(points[a], points[b])`, delegating to the tree's metric.
    pub(crate) fn dist(&self, a: usize, b: usize) -> f64 {
        self.metric.dist(&self.points[a], &self.points[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Euclidean;

    fn tree(points: Vec<Vec<f64>>) -> BallTree<Vec<f64>, Euclidean> {
        BallTree::new(points, Euclidean).expect("non-empty input")
    }

    #[test]
    fn root_radius_bounds_every_point() {
        let points = vec![vec![0.0], vec![1.0], vec![2.0], vec![10.0], vec![-5.0]];
        let t = tree(points.clone());
        let root = t.root();
        let root_center = t.point(t.node(root).center()).clone();
        let true_max = points
            .iter()
            .map(|p| Euclidean.dist(&root_center, p))
            .fold(0.0_f64, f64::max);
        assert!(t.node(root).radius() >= true_max - 1e-9, "radius must cover every point");
    }

    #[test]
    fn leaf_nodes_have_zero_radius_and_size_one() {
        let t = tree(vec![vec![0.0], vec![1.0]]);
        for i in 0..t.nodes.len() {
            if t.node(i).is_leaf() {
                assert_eq!(t.node(i).radius(), 0.0);
                assert_eq!(t.node(i).size(), 1);
            }
        }
    }

    #[test]
    fn tree_has_exactly_two_n_minus_one_nodes() {
        let points = (0..12).map(|i| vec![i as f64]).collect::<Vec<_>>();
        let n = points.len();
        let t = tree(points);
        assert_eq!(t.nodes.len(), 2 * n - 1);
        assert_eq!(t.node(t.root()).size(), n);
    }

    #[test]
    fn every_internal_node_has_exactly_two_children() {
        let points = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
        let t = tree(points);
        for i in 0..t.nodes.len() {
            let node = t.node(i);
            assert_eq!(node.left().is_some(), node.right().is_some(), "node {i} has exactly one child");
        }
        let mut seen = vec![false; t.nodes.len()];
        for i in 0..t.nodes.len() {
            for c in t.children(i) {
                assert!(!seen[c], "node {c} reachable as a child more than once");
                seen[c] = true;
            }
        }
        seen[t.root()] = true;
        assert!(seen.iter().all(|&s| s));
    }
}
