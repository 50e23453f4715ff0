//! A `Cell` is a region of a [`super::NeighborGraph`]: a center point and the
//! points it currently owns.

/// A region of the neighbor graph, owning a center point and a set of other
/// points whose nearest live center (so far) is this cell's center.
///
/// `points[0]` / `distances[0]` are always the farthest owned point and its
/// `compare_dist` to `center`, whenever `points` is nonempty — this lets
/// [`Cell::pop_farthest`] run in O(1) and is maintained by [`Cell::update_radius`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Index, into the caller's point array, of this cell's center.
    pub(crate) center: usize,
    /// Indices of the points owned by this cell, excluding `center`.
    pub(crate) points: Vec<usize>,
    /// `compare_dist(center, points[i])`, parallel to `points`.
    pub(crate) distances: Vec<f64>,
    /// `dist(center, farthest owned point)`, or `0.0` if `points` is empty.
    pub(crate) radius: f64,
    /// Indices (into the graph's cell vector) of this cell's neighbors.
    /// Always contains this cell's own index.
    pub(crate) nbrs: Vec<usize>,
}

impl Cell {
    /// Creates a new, empty cell centered at `center`.
    pub(crate) fn new(center: usize, self_index: usize) -> Self {
        Self {
            center,
            points: Vec::new(),
            distances: Vec::new(),
            radius: 0.0,
            nbrs: vec![self_index],
        }
    }

    /// Returns the index of this cell's center point.
    #[must_use]
    pub const fn center(&self) -> usize {
        self.center
    }

    /// Returns the indices of the points owned by this cell, excluding the center.
    #[must_use]
    pub fn points(&self) -> &[usize] {
        &self.points
    }

    /// Returns the true distance from the center to the farthest owned point,
    /// or `0.0` if this cell owns no other points.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the indices of this cell's neighbor cells (including itself).
    #[must_use]
    pub fn nbrs(&self) -> &[usize] {
        &self.nbrs
    }

    /// Appends a point and its already-computed `compare_dist` to center.
    pub(crate) fn push_point(&mut self, point: usize, compare_dist: f64) {
        self.points.push(point);
        self.distances.push(compare_dist);
    }

    /// Removes and returns the point at `idx` (and its cached distance) via a
    /// swap-remove; does not preserve the farthest-first ordering, so callers
    /// must call [`Cell::update_radius`] afterward if `idx == 0` might have held
    /// the farthest point (or always, to be safe, after ad hoc removals).
    fn swap_remove(&mut self, idx: usize) -> (usize, f64) {
        let dist = self.distances.swap_remove(idx);
        let point = self.points.swap_remove(idx);
        (point, dist)
    }

    /// Removes the farthest owned point (`points[0]`) and returns it. The
    /// cell is left with a stale `radius`/ordering; callers that keep using
    /// this cell (i.e. `par` in `add_cell`) must call `update_radius`
    /// immediately after any further mutation, which the Clarkson driver does
    /// via the rebalance step that always follows.
    pub(crate) fn pop_farthest(&mut self) -> usize {
        debug_assert!(!self.points.is_empty(), "pop_farthest called on an empty cell");
        let (point, _) = self.swap_remove(0);
        point
    }

    /// Recomputes `radius` and restores the farthest-first invariant on
    /// `points`/`distances` by moving the maximum to index 0. True distances
    /// are recomputed from the caller, since `distances` only stores
    /// `compare_dist` values (which may not be the true distance).
    pub(crate) fn update_radius<P, M: crate::metric::Metric<P>>(&mut self, points: &[P], metric: &M) {
        if self.points.is_empty() {
            self.radius = 0.0;
            return;
        }
        let (farthest_pos, _) = self
            .distances
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap_or_else(|| unreachable!("points is non-empty"));
        self.points.swap(0, farthest_pos);
        self.distances.swap(0, farthest_pos);
        self.radius = metric.dist(&points[self.center], &points[self.points[0]]);
    }

    /// Removes every point for which `keep(point, compare_dist)` is false,
    /// returning the removed `(point, compare_dist)` pairs. Used by rebalance
    /// to pull points away into a sibling cell.
    pub(crate) fn extract_if<F: FnMut(usize, f64) -> bool>(&mut self, mut take: F) -> Vec<(usize, f64)> {
        let mut taken = Vec::new();
        let mut i = 0;
        while i < self.points.len() {
            if take(self.points[i], self.distances[i]) {
                taken.push(self.swap_remove(i));
            } else {
                i += 1;
            }
        }
        taken
    }

    /// Partitions `nbrs` in place, keeping only entries satisfying `keep`.
    pub(crate) fn retain_nbrs<F: FnMut(usize) -> bool>(&mut self, mut keep: F) {
        self.nbrs.retain(|&j| keep(j));
    }
}
