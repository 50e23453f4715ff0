//! Clarkson's greedy permutation, built incrementally on top of
//! [`crate::graph::NeighborGraph`].
//!
//! Grounded on `original_source/include/greedy.hpp` / `greedy_clarkson_impl.hpp`:
//! the driver itself is thin — the real algorithmic weight lives in the
//! neighbor graph's `add_cell`.

use mt_logger::{mt_log, Level};

use crate::error::Result;
use crate::graph::NeighborGraph;
use crate::metric::Metric;

/// The greedy permutation of a point set, together with the predecessor of
/// every point but the first.
///
/// `permutation[i]` is the `i`-th point visited by Clarkson's algorithm;
/// `predecessor[i]` is the permutation position of the cell that `i` was
/// split off from (`None` only for `i == 0`, the seed).
#[derive(Clone, Debug)]
pub struct GreedyPermutation<P> {
    permutation: Vec<P>,
    predecessor: Vec<Option<usize>>,
}

impl<P> GreedyPermutation<P> {
    /// The permuted points, in greedy-insertion order.
    #[must_use]
    pub fn permutation(&self) -> &[P] {
        &self.permutation
    }

    /// For each position `i` in the permutation, the position of the cell it
    /// was split from; `None` at `i == 0`.
    #[must_use]
    pub fn predecessor(&self) -> &[Option<usize>] {
        &self.predecessor
    }

    /// Consumes `self`, returning the owned permutation and predecessor
    /// arrays.
    #[must_use]
    pub fn into_parts(self) -> (Vec<P>, Vec<Option<usize>>) {
        (self.permutation, self.predecessor)
    }
}

/// Builds the greedy permutation of `points` under `metric`.
///
/// Runs Clarkson's incremental algorithm to completion: starting from a
/// single cell seeded at `points[0]`, repeatedly splits the cell with the
/// largest radius until every point is its own cell's center.
///
/// # Errors
///
/// Returns [`crate::error::Error::EmptyInput`] if `points` is empty.
pub fn greedy_permutation<P, M: Metric<P>>(points: Vec<P>, metric: M) -> Result<GreedyPermutation<P>>
where
    P: Clone,
{
    let n = points.len();
    mt_log!(Level::Debug, "building greedy permutation of {n} points");

    let mut graph = NeighborGraph::new(points, metric)?;
    let mut predecessor = vec![None; n];

    for next in 1..n {
        let par = graph
            .heap_top_index()
            .unwrap_or_else(|| unreachable!("graph holds {} < {n} cells, not consumed", graph.len()));
        let new_index = graph.add_cell()?;
        debug_assert_eq!(new_index, next, "cells are created in permutation order");
        predecessor[new_index] = Some(par);
        mt_log!(Level::Trace, "cell {new_index} split from {par}");
    }

    let permutation = graph.get_permutation(true);
    mt_log!(Level::Debug, "greedy permutation built: {n} cells");

    Ok(GreedyPermutation { permutation, predecessor })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Euclidean;

    #[test]
    fn single_point_has_no_predecessor() {
        let gp = greedy_permutation(vec![vec![0.0, 0.0]], Euclidean).expect("non-empty");
        assert_eq!(gp.permutation().len(), 1);
        assert_eq!(gp.predecessor(), &[None]);
    }

    #[test]
    fn predecessor_of_seed_is_none_and_only_there() {
        let points = vec![vec![0.0], vec![1.0], vec![2.0], vec![10.0], vec![-5.0]];
        let n = points.len();
        let gp = greedy_permutation(points, Euclidean).expect("non-empty");
        assert_eq!(gp.permutation().len(), n);
        assert_eq!(gp.predecessor()[0], None);
        assert!(gp.predecessor()[1..].iter().all(Option::is_some));
    }

    #[test]
    fn permutation_is_a_bijection_on_the_input_points() {
        let points = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0], vec![100.0]];
        let gp = greedy_permutation(points.clone(), Euclidean).expect("non-empty");
        let mut out = gp.into_parts().0;
        out.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mut expected = points;
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(greedy_permutation(Vec::<Vec<f64>>::new(), Euclidean).is_err());
    }
}
