//! Dual-tree range search: given two ball trees over the same metric space,
//! finds every pair of points (one from each tree) within a fixed radius of
//! each other, without ever falling back to the O(|a| * |b|) brute force.
//!
//! Grounded on `original_source/include/dualtree.hpp`'s `all_range`: a
//! viability graph between the two trees' heap-order traversals, refined
//! node-pair by node-pair via split/prune/finish rules as each traversal is
//! consumed (`all_range_naive` there is what [`crate::naive::all_range_naive`]
//! mirrors as this module's test oracle).

use mt_logger::{mt_log, Level};

use crate::metric::Metric;
use crate::tree::{BallTree, HeapOrderEntry};

/// One side's viability record: the center it currently represents, its
/// current radius, and its neighbor list on the other side as
/// `(other_side_index, cached_center_distance)` pairs.
struct ANode {
    center: usize,
    radius: f64,
    nbrs: Vec<(usize, f64)>,
    finished: bool,
}

struct BNode {
    center: usize,
    radius: f64,
    nbrs: Vec<(usize, f64)>,
}

/// Drops any `(b, d)` pair from `a_nodes[ai]`'s neighbor list that can no
/// longer be within `radius`, then marks `a_nodes[ai]` finished iff every
/// remaining neighbor is already fully absorbed.
fn prune_and_finish_a(a_nodes: &mut [ANode], b_nodes: &[BNode], ai: usize, radius: f64) {
    let a_radius = a_nodes[ai].radius;
    a_nodes[ai].nbrs.retain(|&(bj, d)| d <= radius + a_radius + b_nodes[bj].radius);
    a_nodes[ai].finished = a_nodes[ai]
        .nbrs
        .iter()
        .all(|&(bj, d)| d <= radius - a_radius - b_nodes[bj].radius);
}

/// Drops any `(a, d)` pair from `b_nodes[bi]`'s neighbor list that can no
/// longer be within `radius`. Called just before `b_nodes[bi]` splits, since
/// its radius is about to shrink and trimming first keeps the split's
/// neighbor-copying work proportional to what still matters. One-sided: the
/// reciprocal entry in the affected `ANode`'s list is left for that node's
/// own `prune_and_finish_a` pass to clean up.
fn prune_b(b_nodes: &mut [BNode], a_nodes: &[ANode], bi: usize, radius: f64) {
    let b_radius = b_nodes[bi].radius;
    b_nodes[bi].nbrs.retain(|&(aj, d)| d <= radius + a_nodes[aj].radius + b_radius);
}

/// Given two ball trees' heap-order traversals, finds every cross-tree pair
/// within `radius` of each other.
///
/// Returns a vector indexed by position in `heap_a`: `result[i]` lists the
/// `tree_b` point indices within `radius` of the point at `heap_a[i]`.
///
/// Maintains a viability graph between the two traversals: starting from the
/// root pair, each step consumes the next entry from whichever side
/// currently has the larger radius, creates its right-child node with
/// neighbors inherited from its parent, and prunes/finishes the affected
/// `ANode`s. By the time both traversals are exhausted every `ANode`
/// represents a single point and its neighbor list is the final answer.
#[must_use]
pub fn dual_range<P, M: Metric<P>>(
    tree_a: &BallTree<P, M>,
    heap_a: &[HeapOrderEntry],
    tree_b: &BallTree<P, M>,
    heap_b: &[HeapOrderEntry],
    radius: f64,
) -> Vec<Vec<usize>> {
    if heap_a.is_empty() || heap_b.is_empty() {
        mt_log!(Level::Warning, "dual_range called with an empty traversal; returning no pairs");
        return vec![Vec::new(); heap_a.len()];
    }

    let metric = tree_a.metric();
    let root_dist = metric.dist(tree_a.point(heap_a[0].center), tree_b.point(heap_b[0].center));

    let mut a_nodes = vec![ANode {
        center: heap_a[0].center,
        radius: heap_a[0].radius,
        nbrs: vec![(0, root_dist)],
        finished: false,
    }];
    let mut b_nodes = vec![BNode {
        center: heap_b[0].center,
        radius: heap_b[0].radius,
        nbrs: vec![(0, root_dist)],
    }];
    prune_and_finish_a(&mut a_nodes, &b_nodes, 0, radius);

    let mut next_a = 1usize;
    let mut next_b = 1usize;

    while next_a < heap_a.len() || next_b < heap_b.len() {
        let r_a = if next_a < heap_a.len() { heap_a[next_a].radius } else { f64::NEG_INFINITY };
        let r_b = if next_b < heap_b.len() { heap_b[next_b].radius } else { f64::NEG_INFINITY };

        if r_a >= r_b {
            let it = &heap_a[next_a];
            let par_i = it.parent_index.unwrap_or_else(|| unreachable!("non-root entries always have a parent"));
            let parent_already_finished = a_nodes[par_i].finished;
            let new_index = a_nodes.len();

            let mut new_nbrs = Vec::with_capacity(a_nodes[par_i].nbrs.len());
            for &(bj, _) in &a_nodes[par_i].nbrs {
                let d = metric.dist(tree_a.point(it.center), tree_b.point(b_nodes[bj].center));
                new_nbrs.push((bj, d));
                b_nodes[bj].nbrs.push((new_index, d));
            }
            a_nodes.push(ANode {
                center: it.center,
                radius: it.radius,
                nbrs: new_nbrs,
                finished: parent_already_finished,
            });
            a_nodes[par_i].radius = it.left_radius;

            if !parent_already_finished {
                prune_and_finish_a(&mut a_nodes, &b_nodes, par_i, radius);
                prune_and_finish_a(&mut a_nodes, &b_nodes, new_index, radius);
            }

            next_a += 1;
        } else {
            let it = &heap_b[next_b];
            let par_i = it.parent_index.unwrap_or_else(|| unreachable!("non-root entries always have a parent"));

            prune_b(&mut b_nodes, &a_nodes, par_i, radius);
            let affected = b_nodes[par_i].nbrs.iter().map(|&(aj, _)| aj).filter(|&aj| !a_nodes[aj].finished).collect::<Vec<_>>();

            let new_index = b_nodes.len();
            let mut new_nbrs = Vec::with_capacity(b_nodes[par_i].nbrs.len());
            for &(aj, _) in &b_nodes[par_i].nbrs {
                let d = metric.dist(tree_a.point(a_nodes[aj].center), tree_b.point(it.center));
                new_nbrs.push((aj, d));
                a_nodes[aj].nbrs.push((new_index, d));
            }
            b_nodes.push(BNode {
                center: it.center,
                radius: it.radius,
                nbrs: new_nbrs,
            });
            b_nodes[par_i].radius = it.left_radius;

            for ai in affected {
                prune_and_finish_a(&mut a_nodes, &b_nodes, ai, radius);
            }

            next_b += 1;
        }
    }

    a_nodes.iter().map(|a| a.nbrs.iter().map(|&(bj, _)| b_nodes[bj].center).collect()).collect()
}

/// Convenience wrapper: builds both trees' heap-order traversals and runs
/// [`dual_range`], indexed by `tree_a`'s own point indices rather than
/// traversal position.
#[must_use]
pub fn all_range<P, M: Metric<P>>(tree_a: &BallTree<P, M>, tree_b: &BallTree<P, M>, radius: f64) -> Vec<Vec<usize>> {
    let mut results = vec![Vec::new(); tree_a.len()];
    if tree_a.is_empty() || tree_b.is_empty() {
        return results;
    }

    let heap_a = crate::tree::traversal::get_traversal(tree_a);
    let heap_b = crate::tree::traversal::get_traversal(tree_b);
    for (entry, hits) in heap_a.iter().zip(dual_range(tree_a, &heap_a, tree_b, &heap_b, radius)) {
        results[entry.center] = hits;
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Euclidean;
    use crate::naive;

    #[test]
    fn matches_naive_oracle_on_interleaved_lines() {
        let a = (0..15).map(|i| vec![i as f64 * 2.0]).collect::<Vec<_>>();
        let b = (0..10).map(|i| vec![i as f64 * 3.0 + 1.0]).collect::<Vec<_>>();
        let tree_a = BallTree::new(a.clone(), Euclidean).expect("non-empty");
        let tree_b = BallTree::new(b.clone(), Euclidean).expect("non-empty");

        let radius = 2.5;
        let mut got = all_range(&tree_a, &tree_b, radius);
        let mut want = naive::all_range_naive(&a, &b, &Euclidean, radius);
        for row in got.iter_mut().chain(want.iter_mut()) {
            row.sort_unstable();
        }
        assert_eq!(got, want);
    }

    #[test]
    fn zero_radius_only_matches_coincident_points() {
        let a = vec![vec![0.0], vec![5.0]];
        let b = vec![vec![5.0], vec![9.0]];
        let tree_a = BallTree::new(a, Euclidean).expect("non-empty");
        let tree_b = BallTree::new(b, Euclidean).expect("non-empty");
        let got = all_range(&tree_a, &tree_b, 0.0);
        assert_eq!(got[0], Vec::<usize>::new());
        assert_eq!(got[1], vec![0]);
    }

    #[test]
    fn disjoint_far_apart_trees_have_no_pairs() {
        let a = vec![vec![0.0], vec![1.0]];
        let b = vec![vec![1000.0], vec![1001.0]];
        let tree_a = BallTree::new(a, Euclidean).expect("non-empty");
        let tree_b = BallTree::new(b, Euclidean).expect("non-empty");
        let got = all_range(&tree_a, &tree_b, 5.0);
        assert!(got.iter().all(Vec::is_empty));
    }

    #[test]
    fn single_point_each_side() {
        let tree_a = BallTree::new(vec![vec![0.0]], Euclidean).expect("non-empty");
        let tree_b = BallTree::new(vec![vec![100.0]], Euclidean).expect("non-empty");
        assert_eq!(all_range(&tree_a, &tree_b, 1.0), vec![Vec::<usize>::new()]);
        assert_eq!(all_range(&tree_a, &tree_b, 100.0), vec![vec![0]]);
    }

    #[test]
    fn dual_range_result_is_indexed_by_heap_position() {
        let a = (0..12).map(|i| vec![i as f64]).collect::<Vec<_>>();
        let b = (0..8).map(|i| vec![i as f64 * 1.5]).collect::<Vec<_>>();
        let tree_a = BallTree::new(a, Euclidean).expect("non-empty");
        let tree_b = BallTree::new(b, Euclidean).expect("non-empty");
        let heap_a = crate::tree::traversal::get_traversal(&tree_a);
        let heap_b = crate::tree::traversal::get_traversal(&tree_b);
        let radius = 2.0;

        let by_position = dual_range(&tree_a, &heap_a, &tree_b, &heap_b, radius);
        assert_eq!(by_position.len(), heap_a.len());

        let naive_a = (0..tree_a.len()).map(|i| tree_a.point(i).clone()).collect::<Vec<_>>();
        let naive_b = (0..tree_b.len()).map(|i| tree_b.point(i).clone()).collect::<Vec<_>>();
        let want = naive::all_range_naive(&naive_a, &naive_b, &Euclidean, radius);

        for (entry, hits) in heap_a.iter().zip(&by_position) {
            let mut got = hits.clone();
            let mut expected = want[entry.center].clone();
            got.sort_unstable();
            expected.sort_unstable();
            assert_eq!(got, expected, "mismatch for point {}", entry.center);
        }
    }
}
