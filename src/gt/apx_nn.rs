//! Epsilon-approximate nearest-neighbor search over a [`super::Gt`] encoding,
//! single- and dual-query.
//!
//! Grounded on `original_source/include/fast_search_impl.hpp`'s
//! `ApxNNSearch`. The dual-query finishing condition
//! (`nn_dist * e >= (3 + 2 * e) * a_rad`) is taken verbatim from the source,
//! since the constant `3 + 2e` is load-bearing for the algorithm's proven
//! approximation factor. The single-query split condition generalizes the
//! source's exact-search rule `a_dist < nn_dist + a_rad` by the same
//! `epsilon` scaling (`a_dist < (1 + epsilon) * nn_dist + a_rad`), recovering
//! the exact rule at `epsilon = 0.0`.

use std::collections::BinaryHeap;

use super::{children_positions, Gt};
use crate::metric::Metric;
use crate::utils::MaxItem;

/// Returns an `epsilon`-approximate nearest neighbor of `query`, as
/// `(original point index, distance)`.
///
/// Walks the flat encoding guided by a max-heap over node radius (the same
/// lazy shape used everywhere else in this crate): the node at the top of
/// the heap is only worth splitting into its children if its radius is
/// large enough that a closer point could plausibly be hiding inside it.
///
/// # Panics
///
/// Panics if `gt` is empty.
#[must_use]
pub fn apx_nn<P, M: Metric<P>>(gt: &Gt<P, M>, query: &P, epsilon: f64) -> (usize, f64) {
    assert!(!gt.is_empty(), "apx_nn called on an empty Gt index");

    let mut nn_dist = gt.metric.dist(query, gt.point_at(0));
    let mut nn = gt.point_index(0);

    let mut heap: BinaryHeap<MaxItem<usize, f64>> = BinaryHeap::new();
    heap.push(MaxItem(0, gt.g[0]));

    while let Some(MaxItem(pos, _)) = heap.pop() {
        let a_rad = gt.g[pos];
        let d = gt.metric.dist(query, gt.point_at(pos));
        if d < nn_dist {
            nn_dist = d;
            nn = gt.point_index(pos);
        }
        if a_rad > 0.0 && d < (1.0 + epsilon) * nn_dist + a_rad {
            for c in children_positions(gt, pos) {
                heap.push(MaxItem(c, gt.g[c]));
            }
        }
    }

    (nn, nn_dist)
}

/// Returns, parallel to `gt_a`'s points, an `epsilon`-approximate nearest
/// neighbor in `gt_b` as `(original point index, distance)`. Unresolved
/// entries (unreachable only if `gt_b` is empty) are `(usize::MAX, f64::INFINITY)`.
#[must_use]
pub fn apx_dual_nn<P, M: Metric<P>>(gt_a: &Gt<P, M>, gt_b: &Gt<P, M>, epsilon: f64) -> Vec<(usize, f64)> {
    let mut best = vec![(usize::MAX, f64::INFINITY); gt_a.points.len()];
    if gt_a.is_empty() || gt_b.is_empty() {
        return best;
    }

    let mut stack = vec![(0usize, 0usize)];
    while let Some((a_pos, b_pos)) = stack.pop() {
        let a_rad = gt_a.g[a_pos];
        let a_size = gt_a.aux[a_pos];
        let b_rad = gt_b.g[b_pos];
        let d = gt_a.metric.dist(gt_a.point_at(a_pos), gt_b.point_at(b_pos));

        let a_points = &gt_a.order[a_pos..a_pos + a_size];
        for &pa in a_points {
            if d < best[pa].1 {
                best[pa] = (gt_b.point_index(b_pos), d);
            }
        }
        let nn_dist = a_points.iter().map(|&pa| best[pa].1).fold(0.0_f64, f64::max);

        if nn_dist * epsilon >= (3.0 + 2.0 * epsilon) * a_rad {
            continue;
        }
        if d - a_rad - b_rad > nn_dist {
            continue;
        }
        if a_size == 1 && gt_b.aux[b_pos] == 1 {
            continue;
        }
        if gt_b.aux[b_pos] == 1 || (a_size > 1 && a_rad >= b_rad) {
            for c in children_positions(gt_a, a_pos) {
                stack.push((c, b_pos));
            }
        } else {
            for c in children_positions(gt_b, b_pos) {
                stack.push((a_pos, c));
            }
        }
    }

    best
}
