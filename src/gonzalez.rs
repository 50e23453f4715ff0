//! The naive Gonzalez farthest-point algorithm: an O(n^2) baseline used as a
//! test oracle for [`crate::greedy::greedy_permutation`], never called from
//! any production search path.
//!
//! Grounded on `original_source/include/greedy_gonzalez_impl.hpp`.

use crate::metric::Metric;

/// Computes the Gonzalez permutation of `points` under `metric`: starting
/// from `points[0]`, repeatedly appends the point currently farthest (by
/// minimum distance) from every point already chosen.
///
/// This is the textbook 2-approximate k-center greedy algorithm, run to
/// completion (`k = points.len()`). It satisfies the same spacing invariant
/// as [`crate::greedy::greedy_permutation`] but does no incremental
/// bookkeeping, so it runs in O(n^2) time and is only ever used in tests and
/// benchmarks as an independent oracle.
///
/// Returns an empty vector if `points` is empty.
#[must_use]
pub fn gonzalez_permutation<P, M: Metric<P>>(points: &[P], metric: &M) -> Vec<usize>
where
    P: Clone,
{
    if points.is_empty() {
        return Vec::new();
    }

    let n = points.len();
    let mut permutation = Vec::with_capacity(n);
    let mut min_dist = vec![f64::INFINITY; n];

    permutation.push(0);
    min_dist[0] = 0.0;

    for _ in 1..n {
        for (i, d) in min_dist.iter_mut().enumerate() {
            let last = *permutation.last().unwrap_or_else(|| unreachable!("permutation non-empty"));
            let dist = metric.dist(&points[last], &points[i]);
            if dist < *d {
                *d = dist;
            }
        }
        let next = min_dist
            .iter()
            .enumerate()
            .filter(|(i, _)| !permutation.contains(i))
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or_else(|| unreachable!("fewer than n points chosen"));
        permutation.push(next);
    }

    permutation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Euclidean;

    #[test]
    fn visits_every_point_exactly_once() {
        let points = vec![vec![0.0], vec![1.0], vec![2.0], vec![10.0], vec![-5.0]];
        let perm = gonzalez_permutation(&points, &Euclidean);
        let mut sorted = perm.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..points.len()).collect::<Vec<_>>());
    }

    #[test]
    fn seed_is_the_first_point() {
        let points = vec![vec![3.0], vec![1.0], vec![2.0]];
        let perm = gonzalez_permutation(&points, &Euclidean);
        assert_eq!(perm[0], 0);
    }

    #[test]
    fn empty_input_yields_empty_permutation() {
        let points: Vec<Vec<f64>> = Vec::new();
        assert!(gonzalez_permutation(&points, &Euclidean).is_empty());
    }

    #[test]
    fn farthest_pair_is_picked_second() {
        // On a line, after seeding at 0.0 the farthest point (10.0) must be next.
        let points = vec![vec![0.0], vec![1.0], vec![2.0], vec![10.0]];
        let perm = gonzalez_permutation(&points, &Euclidean);
        assert_eq!(perm[1], 3);
    }
}
