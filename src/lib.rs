//! Hierarchical spatial indices over finite point sets in an arbitrary
//! metric space.
//!
//! This crate builds on a single core primitive — Clarkson's greedy
//! permutation, maintained incrementally via [`graph::NeighborGraph`] — and
//! layers three things on top of it:
//!
//! - [`tree::BallTree`]: a ball tree derived from the permutation, with
//!   2-approximate radii, supporting exact nearest/farthest/range queries
//!   through a single generic heap-guided pattern ([`tree::search`]).
//! - [`dual_tree`]: exact dual-tree range search between two ball trees,
//!   avoiding the O(|a| * |b|) brute force.
//! - [`gt::Gt`]: a flat, cache-friendly array encoding of a ball tree for
//!   epsilon-approximate nearest-neighbor and range search, single- and
//!   dual-query.
//!
//! [`greedy::greedy_permutation`] and [`gonzalez::gonzalez_permutation`] are
//! both exposed directly: the former is this crate's actual construction
//! algorithm, the latter a naive O(n^2) baseline kept around as an
//! independent test oracle for the same spacing invariant.
//!
//! ## Features
//!
//! - `serde`: enables [`serde::Serialize`]/[`serde::Deserialize`] on the
//!   index types ([`graph::Cell`], [`tree::Node`], [`tree::HeapOrderEntry`]).

pub mod dual_tree;
pub mod error;
pub mod gonzalez;
pub mod graph;
pub mod greedy;
pub mod gt;
pub mod metric;
pub mod naive;
pub mod tree;
mod utils;

pub use error::{Error, Result};
pub use greedy::{greedy_permutation, GreedyPermutation};
pub use metric::Metric;
pub use tree::BallTree;
