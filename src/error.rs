//! Error type for the few fallible entry points in this crate.

use core::fmt;

/// Errors that can occur while building or querying a [`crate::graph::NeighborGraph`],
/// [`crate::tree::BallTree`], or [`crate::gt::Gt`] index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The input point set was empty.
    ///
    /// Construction requires at least one point to seed the first cell.
    EmptyInput,

    /// The operation was attempted on a [`crate::graph::NeighborGraph`] whose
    /// permutation has already been moved out via
    /// [`crate::graph::NeighborGraph::get_permutation`] with `move = true`.
    GraphConsumed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "cannot build an index from an empty point set"),
            Self::GraphConsumed => write!(f, "neighbor graph's permutation has already been moved out"),
        }
    }
}

impl std::error::Error for Error {}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
