//! Run summary returned alongside the regularized contours.

use serde::Serialize;

use crate::reconstruct::Rejection;
use crate::segment::Contour;

/// One output contour, tied back to its input position.
#[derive(Clone, Debug, Serialize)]
pub struct RegularizedContour {
    /// Index of the contour in the input slice.
    pub source_index: usize,
    pub contour: Contour,
}

/// Everything a regularization call produces.
#[derive(Clone, Debug, Serialize)]
pub struct RegularizeOutput {
    /// Output contours, in input order.
    pub contours: Vec<RegularizedContour>,
    pub report: RegularizeReport,
}

/// Aggregate statistics and per-contour outcomes of one run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RegularizeReport {
    /// Total segments across all input contours.
    pub segment_count: usize,
    /// Admitted proximity graph edges.
    pub edge_count: usize,
    /// Live direction groups after classification.
    pub group_count: usize,
    pub outcomes: Vec<ContourOutcome>,
    pub timings: StageTimings,
}

#[derive(Clone, Debug, Serialize)]
pub struct ContourOutcome {
    pub index: usize,
    pub status: ContourStatus,
}

/// What happened to one contour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ContourStatus {
    /// Rotated and reconstructed.
    Regularized,
    /// Returned unchanged (zero angle bound disables the pipeline).
    Passthrough,
    /// Reconstruction failed; the contour carries its rotated,
    /// un-reconstructed segments.
    Rejected { reason: Rejection },
}

/// Wall-clock stage timings, milliseconds.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct StageTimings {
    pub graph_ms: f64,
    pub solve_ms: f64,
    pub grouping_ms: f64,
    pub apply_ms: f64,
    pub reconstruct_ms: f64,
    pub total_ms: f64,
}
