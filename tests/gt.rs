//! Tests for the flat `Gt` encoding and its approximate search routines.

use greedytree::gt::apx_nn::{apx_dual_nn, apx_nn};
use greedytree::gt::apx_range::{apx_dual_range, apx_range};
use greedytree::gt::Gt;
use greedytree::metric::Euclidean;
use greedytree::{naive, BallTree};

mod common;

#[test]
fn exact_nn_matches_the_naive_oracle() {
    let points = common::data_gen::tabular(200, 3, -15.0, 15.0);
    let tree = BallTree::new(points.clone(), Euclidean).expect("non-empty");
    let gt = Gt::new(&tree);
    let query = vec![1.0, 2.0, -3.0];

    let (got_idx, got_d) = apx_nn(&gt, &query, 0.0);
    let want = naive::nearest(&points, &Euclidean, &query, 1)[0];
    assert!((got_d - want.1).abs() < 1e-9, "got {got_idx} at {got_d}, want {want:?}");
}

#[test]
fn larger_epsilon_never_returns_a_neighbor_closer_than_the_truth_allows() {
    let points = common::data_gen::tabular(300, 4, -15.0, 15.0);
    let tree = BallTree::new(points.clone(), Euclidean).expect("non-empty");
    let gt = Gt::new(&tree);
    let query = vec![0.0, 0.0, 0.0, 0.0];

    let exact = naive::nearest(&points, &Euclidean, &query, 1)[0];
    let (_, approx_d) = apx_nn(&gt, &query, 0.3);
    assert!(approx_d >= exact.1 - 1e-9, "an approximate nearest neighbor can only be farther than the true one");
}

#[test]
fn exact_range_matches_the_naive_oracle() {
    let points = common::data_gen::line(60);
    let tree = BallTree::new(points.clone(), Euclidean).expect("non-empty");
    let gt = Gt::new(&tree);
    let query = vec![23.0];

    let mut got = apx_range(&gt, &query, 9.0, 0.0);
    let mut want = naive::range(&points, &Euclidean, &query, 9.0).into_iter().map(|(i, _)| i).collect::<Vec<_>>();
    got.sort_unstable();
    want.sort_unstable();
    assert_eq!(got, want);
}

#[test]
fn exact_dual_range_matches_the_naive_oracle() {
    let a = common::data_gen::tabular(25, 2, -10.0, 10.0);
    let b = common::data_gen::tabular(20, 2, -10.0, 10.0);
    let tree_a = BallTree::new(a.clone(), Euclidean).expect("non-empty");
    let tree_b = BallTree::new(b.clone(), Euclidean).expect("non-empty");
    let gt_a = Gt::new(&tree_a);
    let gt_b = Gt::new(&tree_b);

    let radius = 4.0;
    let mut got = apx_dual_range(&gt_a, &gt_b, radius, 0.0);
    let mut want = naive::all_range_naive(&a, &b, &Euclidean, radius);
    for row in got.iter_mut().chain(want.iter_mut()) {
        row.sort_unstable();
    }
    assert_eq!(got, want);
}

#[test]
fn exact_dual_nn_matches_single_query_per_point() {
    let a = common::data_gen::tabular(15, 2, -10.0, 10.0);
    let b = common::data_gen::tabular(40, 2, -10.0, 10.0);
    let tree_a = BallTree::new(a.clone(), Euclidean).expect("non-empty");
    let tree_b = BallTree::new(b.clone(), Euclidean).expect("non-empty");
    let gt_a = Gt::new(&tree_a);
    let gt_b = Gt::new(&tree_b);

    let dual = apx_dual_nn(&gt_a, &gt_b, 0.0);
    for (i, query) in a.iter().enumerate() {
        let want = naive::nearest(&b, &Euclidean, query, 1)[0];
        assert!((dual[i].1 - want.1).abs() < 1e-9, "a-point {i}: got {dual:?}, want {want:?}");
    }
}
