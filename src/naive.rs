//! Brute-force reference implementations of nearest/farthest/range search,
//! used as test oracles for [`crate::tree::search`] and
//! [`crate::dual_tree`]. Never called from any production search path.
//!
//! Grounded on the test-oracle role of `cakes/exact/knn_linear.rs` /
//! `rnn_linear.rs`, and on `original_source/include/dualtree.hpp`'s
//! `all_range_naive`.

use crate::metric::Metric;

/// Returns the `k` points in `points` nearest to `query`, as `(index,
/// distance)` pairs sorted by increasing distance.
#[must_use]
pub fn nearest<P, M: Metric<P>>(points: &[P], metric: &M, query: &P, k: usize) -> Vec<(usize, f64)> {
    let mut all = points.iter().enumerate().map(|(i, p)| (i, metric.dist(query, p))).collect::<Vec<_>>();
    all.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    all.truncate(k);
    all
}

/// Returns the `k` points in `points` farthest from `query`, as `(index,
/// distance)` pairs sorted by decreasing distance.
#[must_use]
pub fn farthest<P, M: Metric<P>>(points: &[P], metric: &M, query: &P, k: usize) -> Vec<(usize, f64)> {
    let mut all = points.iter().enumerate().map(|(i, p)| (i, metric.dist(query, p))).collect::<Vec<_>>();
    all.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    all.truncate(k);
    all
}

/// Returns every point in `points` within `radius` of `query`, as `(index,
/// distance)` pairs, in input order.
#[must_use]
pub fn range<P, M: Metric<P>>(points: &[P], metric: &M, query: &P, radius: f64) -> Vec<(usize, f64)> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, metric.dist(query, p)))
        .filter(|&(_, d)| d <= radius)
        .collect()
}

/// O(|a| * |b|) reference for dual-tree range search: for every point `a_i`
/// in `a`, returns the indices of every point in `b` within `radius`.
///
/// The outer vector is parallel to `a`; `result[i]` lists every `b`-index
/// within `radius` of `a[i]`.
#[must_use]
pub fn all_range_naive<P, M: Metric<P>>(a: &[P], b: &[P], metric: &M, radius: f64) -> Vec<Vec<usize>> {
    a.iter()
        .map(|a_i| {
            b.iter()
                .enumerate()
                .filter(|(_, b_j)| metric.dist(a_i, b_j) <= radius)
                .map(|(j, _)| j)
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Euclidean;

    #[test]
    fn nearest_is_sorted_by_increasing_distance() {
        let points = vec![vec![5.0], vec![0.0], vec![3.0], vec![9.0]];
        let got = nearest(&points, &Euclidean, &vec![1.0], 3);
        assert!(got.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(got[0].0, 1);
    }

    #[test]
    fn farthest_is_sorted_by_decreasing_distance() {
        let points = vec![vec![5.0], vec![0.0], vec![3.0], vec![9.0]];
        let got = farthest(&points, &Euclidean, &vec![1.0], 2);
        assert!(got.windows(2).all(|w| w[0].1 >= w[1].1));
        assert_eq!(got[0].0, 3);
    }

    #[test]
    fn range_includes_only_points_within_radius() {
        let points = vec![vec![0.0], vec![1.0], vec![2.0], vec![10.0]];
        let got = range(&points, &Euclidean, &vec![1.5], 1.0);
        let mut idx = got.into_iter().map(|(i, _)| i).collect::<Vec<_>>();
        idx.sort_unstable();
        assert_eq!(idx, vec![1, 2]);
    }

    #[test]
    fn all_range_naive_matches_per_point_range() {
        let a = vec![vec![0.0], vec![20.0]];
        let b = vec![vec![1.0], vec![0.5], vec![19.0], vec![100.0]];
        let out = all_range_naive(&a, &b, &Euclidean, 1.5);
        assert_eq!(out.len(), 2);
        let mut got0 = out[0].clone();
        got0.sort_unstable();
        assert_eq!(got0, vec![0, 1]);
        assert_eq!(out[1], vec![2]);
    }
}
