//! A single node of a [`super::BallTree`].
//!
//! Grounded on `original_source/include/balltree.hpp`'s `BallTree<d,Metric>`
//! class, adapted from a `left`/`right` `unique_ptr` pair into index-addressed
//! fields, following the same convention as `tree/cluster/mod.rs`.

/// One node of a [`super::BallTree`]: a center point, a 2-approximate radius,
/// and either no children (a leaf) or exactly two.
///
/// A node is never created with one child: `left` and `right` are always
/// both `Some` or both `None`. `left.center == self.center` always holds for
/// an internal node — splitting a leaf keeps the old center on the left and
/// gives the new point to the right.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Index into the tree's point array.
    pub(crate) center: usize,
    /// 2-approximate bound on the distance from `center` to the farthest
    /// point in this node's subtree.
    pub(crate) radius: f64,
    /// Number of points in this node's subtree, including `center` itself.
    pub(crate) size: usize,
    /// Index of the left child, or `None` at a leaf.
    pub(crate) left: Option<usize>,
    /// Index of the right child, or `None` at a leaf.
    pub(crate) right: Option<usize>,
}

impl Node {
    /// Index into the tree's point array of this node's center.
    #[must_use]
    pub const fn center(&self) -> usize {
        self.center
    }

    /// 2-approximate bound on the distance from the center to the farthest
    /// point under this node.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Number of points in this node's subtree, including the center.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Index of this node's left child, if any.
    #[must_use]
    pub const fn left(&self) -> Option<usize> {
        self.left
    }

    /// Index of this node's right child, if any.
    #[must_use]
    pub const fn right(&self) -> Option<usize> {
        self.right
    }

    /// Whether this node has no children.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.left.is_none()
    }
}
