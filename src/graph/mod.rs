//! `NeighborGraph` — the incremental data structure behind Clarkson's greedy
//! permutation algorithm.
//!
//! See module-level docs on [`NeighborGraph`] for the construction protocol.
//! Grounded on `original_source/include/neighborgraph.hpp` /
//! `neighborgraph_impl.hpp`, translated from a pointer/Boost-graph
//! representation into dense, index-addressed vectors per the design note in
//! spec.md §9.

mod cell;

pub use cell::Cell;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::metric::Metric;

/// A lazy max-heap entry: a cell index and a (possibly stale) cached radius.
///
/// Ordered by radius, largest first; ties are broken by ascending cell index
/// so that `heap_top_index` is fully deterministic.
#[derive(Clone, Copy, Debug, PartialEq)]
struct HeapEntry {
    index: usize,
    radius: f64,
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.radius.partial_cmp(&other.radius).unwrap_or(Ordering::Equal) {
            Ordering::Equal => self.index.cmp(&other.index).reverse(),
            ord => ord,
        }
    }
}

/// Incremental builder for the neighbor graph that drives Clarkson's greedy
/// permutation.
///
/// Owns an append-only vector of [`Cell`]s (never reordered, never deleted
/// during construction) and a lazy max-heap over cell radii. Each call to
/// [`NeighborGraph::add_cell`] performs the three-phase update described in
/// spec §4.1: point location (rebalance), neighbor discovery (two-hop), and
/// edge pruning (one-sided).
pub struct NeighborGraph<P, M> {
    points: Vec<P>,
    metric: M,
    cells: Vec<Cell>,
    heap: BinaryHeap<HeapEntry>,
    consumed: bool,
}

impl<P, M: Metric<P>> NeighborGraph<P, M> {
    /// Creates a new graph with a single cell seeded at `points[0]`.
    ///
    /// The seed choice is arbitrary (any point would do); this crate always
    /// seeds from the first input point, rather than swapping it to the back
    /// as the original C++ source does, since the choice does not affect any
    /// tested invariant and a no-op seed step is simpler to reason about.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] if `points` is empty.
    pub fn new(points: Vec<P>, metric: M) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut root = Cell::new(0, 0);
        for i in 1..points.len() {
            let d = metric.compare_dist(&points[0], &points[i]);
            root.push_point(i, d);
        }
        root.update_radius(&points, &metric);

        let mut heap = BinaryHeap::with_capacity(points.len());
        heap.push(HeapEntry {
            index: 0,
            radius: root.radius(),
        });

        Ok(Self {
            points,
            metric,
            cells: vec![root],
            heap,
            consumed: false,
        })
    }

    /// Returns the number of cells created so far (equivalently, the length
    /// of the permutation prefix built so far).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns whether this graph holds no cells (only true once consumed).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell at `index`.
    #[must_use]
    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    /// Returns the index of the cell with the largest current radius,
    /// discarding stale heap entries lazily, or `None` if the graph has
    /// already been consumed by a moving [`NeighborGraph::get_permutation`].
    pub fn heap_top_index(&mut self) -> Option<usize> {
        if self.consumed {
            return None;
        }
        loop {
            let top = *self.heap.peek()?;
            let true_radius = self.cells[top.index].radius();
            if top.radius > true_radius {
                // Stale-high entry: the cell's radius has shrunk since this
                // entry was pushed. Discard it and push a fresh one.
                self.heap.pop();
                self.heap.push(HeapEntry {
                    index: top.index,
                    radius: true_radius,
                });
            } else {
                return Some(top.index);
            }
        }
    }

    /// `dist(center_i, center_j) <= r_i + r_j + max(r_i, r_j)` and both radii
    /// are positive — the packing-radius closeness condition shared by
    /// neighbor discovery and edge pruning.
    fn is_close_enough(&self, i: usize, j: usize) -> bool {
        let (ri, rj) = (self.cells[i].radius(), self.cells[j].radius());
        if ri <= 0.0 || rj <= 0.0 {
            return false;
        }
        let d = self.metric.dist(&self.points[self.cells[i].center()], &self.points[self.cells[j].center()]);
        d <= ri + rj + ri.max(rj)
    }

    /// Adds a symmetric edge between cells `a` and `b` (a no-op if it already
    /// exists). Mirrors the undirected `boost::add_edge` of the original
    /// source: neighbor discovery adds edges symmetrically; only *pruning*
    /// (§4.1.3) is one-sided.
    fn add_edge(&mut self, a: usize, b: usize) {
        if !self.cells[a].nbrs.contains(&b) {
            self.cells[a].nbrs.push(b);
        }
        if a != b && !self.cells[b].nbrs.contains(&a) {
            self.cells[b].nbrs.push(a);
        }
    }

    /// Point location (§4.1.1): moves every point in cell `b` that is now
    /// closer to `a`'s center than to `b`'s center into `a`. Returns whether
    /// any point moved.
    fn rebalance(&mut self, a: usize, b: usize) -> bool {
        let a_center = self.cells[a].center();
        let a_center_point = &self.points[a_center];

        // Read-only decision pass: does point `p`, currently at compare_dist
        // `d_b` from `b`'s center, belong in `a` instead?
        let should_move = |metric: &M, points: &[P], p: usize, d_b: f64| -> bool {
            metric.compare_dist(a_center_point, &points[p]) < d_b
        };

        let farthest_moves = {
            let b_cell = &self.cells[b];
            !b_cell.points.is_empty() && should_move(&self.metric, &self.points, b_cell.points[0], b_cell.distances[0])
        };

        let metric = &self.metric;
        let points = &self.points;
        let moved = self.cells[b].extract_if(|p, d| should_move(metric, points, p, d));
        if moved.is_empty() {
            return false;
        }

        for (p, _old_dist) in moved {
            let d_a = self.metric.compare_dist(&self.points[a_center], &self.points[p]);
            self.cells[a].push_point(p, d_a);
        }

        // The farthest-first invariant on `b` is only disturbed if the
        // farthest point itself moved; otherwise position 0 is untouched by
        // the swap-removes performed above (see `Cell::extract_if`).
        if farthest_moves {
            self.cells[b].update_radius(&self.points, &self.metric);
        }
        true
    }

    /// Performs one step of Clarkson's incremental construction: pops the
    /// largest-radius cell, splits off its farthest point as a new cell, and
    /// runs point location, neighbor discovery, and edge pruning.
    ///
    /// Returns the index of the newly created cell, which is also its
    /// position in the eventual greedy permutation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphConsumed`] if the permutation has already been
    /// moved out via [`NeighborGraph::get_permutation`].
    pub fn add_cell(&mut self) -> Result<usize> {
        if self.consumed {
            return Err(Error::GraphConsumed);
        }
        let par = self
            .heap_top_index()
            .unwrap_or_else(|| unreachable!("graph is non-empty and not consumed"));

        let c_new = self.cells[par].pop_farthest();
        let new_index = self.cells.len();
        self.cells.push(Cell::new(c_new, new_index));

        // Point location: rebalance against every neighbor of `par`,
        // including `par` itself (it is always its own neighbor).
        let par_nbrs = self.cells[par].nbrs.clone();
        let mut affected = Vec::with_capacity(par_nbrs.len() + 1);
        for &b in &par_nbrs {
            if self.rebalance(new_index, b) {
                affected.push(b);
            }
        }
        if !affected.contains(&par) {
            affected.push(par);
        }

        self.cells[new_index].update_radius(&self.points, &self.metric);

        // Neighbor discovery: two-hop union over `affected`'s neighbor lists,
        // filtered by the packing-radius closeness condition.
        let mut candidates = std::collections::BTreeSet::new();
        for &b in &affected {
            for &j in self.cells[b].nbrs.clone().iter() {
                if self.is_close_enough(new_index, j) {
                    candidates.insert(j);
                }
            }
        }
        candidates.insert(new_index);
        for j in candidates {
            self.add_edge(new_index, j);
        }

        // Edge pruning: one-sided, over every affected cell plus the new one.
        affected.push(new_index);
        for i in affected {
            self.prune_nbrs(i);
        }

        let radius = self.cells[new_index].radius();
        self.heap.push(HeapEntry { index: new_index, radius });

        Ok(new_index)
    }

    /// Edge pruning (§4.1.3): drops any neighbor `j` of `i` that is no longer
    /// close enough. One-sided: `j`'s own neighbor list is left untouched.
    fn prune_nbrs(&mut self, i: usize) {
        let nbrs = self.cells[i].nbrs.clone();
        self.cells[i].retain_nbrs(|j| nbrs.contains(&j) && self.is_close_enough(i, j));
    }

    /// Returns the greedy permutation built so far: for each cell, in
    /// creation order, its center point.
    ///
    /// If `move_out` is `true`, the graph's point storage is dropped after
    /// extraction and the graph is marked consumed: subsequent calls to
    /// [`NeighborGraph::add_cell`] return [`Error::GraphConsumed`] and
    /// [`NeighborGraph::heap_top_index`] returns `None`. If `move_out` is
    /// `false`, the graph remains usable and the points are cloned out.
    ///
    /// Returns an empty vector (the documented sentinel) if the graph has
    /// already been consumed.
    pub fn get_permutation(&mut self, move_out: bool) -> Vec<P>
    where
        P: Clone,
    {
        if self.consumed {
            return Vec::new();
        }
        let perm = self.cells.iter().map(|c| self.points[c.center()].clone()).collect();
        if move_out {
            self.consumed = true;
            self.points = Vec::new();
            self.cells = Vec::new();
            self.heap.clear();
        }
        perm
    }
}
