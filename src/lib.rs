#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod error;
pub mod params;
pub mod pipeline;
pub mod report;
pub mod segment;

// "Expert" modules - still public, but considered unstable internals.
pub mod angle;
pub mod buckets;
pub mod geometry;
pub mod graph;
pub mod grouping;
pub mod reconstruct;
pub mod solver;

// --- High-level re-exports -------------------------------------------------

// Main entry point: regularizer + results.
pub use crate::pipeline::ShapeRegularizer;
pub use crate::report::{
    ContourOutcome, ContourStatus, RegularizeOutput, RegularizeReport, RegularizedContour,
    StageTimings,
};

pub use crate::error::RegularizeError;
pub use crate::params::{
    GraphParams, GroupingParams, OptimizationMode, RegularizeParams, SamplingParams, SolverParams,
};
pub use crate::reconstruct::Rejection;
pub use crate::segment::{Contour, LengthStats, Segment};
pub use crate::solver::{LeastSquaresSolver, OrientationSolution, OrientationSolver};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use contour_regularizer::prelude::*;
///
/// let square = Contour::closed(vec![
///     Segment::from_coords(0.0, 0.0, 10.0, 0.0),
///     Segment::from_coords(10.0, 0.0, 10.0, 10.0),
///     Segment::from_coords(10.0, 10.0, 0.0, 10.0),
///     Segment::from_coords(0.0, 10.0, 0.0, 0.0),
/// ]);
///
/// let regularizer = ShapeRegularizer::new(RegularizeParams::default())?;
/// let output = regularizer.regularize(&[square])?;
/// println!(
///     "{} contours in {:.3} ms",
///     output.contours.len(),
///     output.report.timings.total_ms
/// );
/// # Ok::<(), contour_regularizer::RegularizeError>(())
/// ```
pub mod prelude {
    pub use crate::{
        Contour, OptimizationMode, RegularizeOutput, RegularizeParams, Segment, ShapeRegularizer,
    };
}
