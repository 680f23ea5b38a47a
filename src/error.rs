//! Error taxonomy of the regularization pipeline.
//!
//! Precondition violations are fatal to the call. Per-contour reconstruction
//! failures are not errors: the affected contour falls back to its rotated,
//! un-reconstructed segments and is reported, while the rest of the batch
//! proceeds.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegularizeError {
    /// The input contains no segments at all.
    #[error("input contains no segments")]
    EmptyInput,

    /// A caller-supplied numeric parameter is out of its documented range.
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// The Delaunay triangulation rejected a sample point (non-finite
    /// coordinates in the input geometry).
    #[error("triangulation rejected a sample point: {0}")]
    Triangulation(#[from] spade::InsertionError),
}
