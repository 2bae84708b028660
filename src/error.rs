//! Error types for tree construction and queries.

use thiserror::Error;

/// Errors raised at the public entry points of the index.
///
/// An empty tree is not an error: queries against it report no result
/// (`Ok(None)` or `Ok(false)`).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum KdError {
    /// Construction was called with zero points.
    #[error("cannot build a k-d tree from zero points")]
    EmptyInput,

    /// A point's coordinate count disagrees with the tree's dimension.
    #[error("dimension mismatch: expected {expected} coordinates, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A point without any coordinates.
    #[error("points must have at least one coordinate")]
    ZeroDimension,
}
