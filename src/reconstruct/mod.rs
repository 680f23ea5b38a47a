//! Contour reconstruction.
//!
//! Re-stitches rotated segments into a valid polyline: corrects short
//! segments from their neighbors, removes degenerate segments, merges
//! parallel runs (keeping length ratios for a later split), snaps
//! near-collinear segments onto shared lines, intersects adjacent support
//! lines to recover corners, and finally splits merged runs back
//! proportionally.
//!
//! The five stages run strictly in sequence; each consumes the mutated
//! output of the previous one. Failure is local to the contour: the caller
//! falls back to the rotated, un-reconstructed segments.

mod clean;
mod collinear;
mod correct;
mod intersect;
mod split;

pub(crate) use clean::clean;
pub(crate) use collinear::make_collinear;
pub(crate) use correct::correct_short_segments;
pub(crate) use intersect::intersect_runs;
pub(crate) use split::split_runs;

use crate::angle::{fold_deg_90, signed_angle_deg};
use crate::geometry::rotate_about;
use crate::params::RegularizeParams;
use crate::segment::Segment;

/// Angular threshold, degrees, below which two adjacent segments count as
/// parallel during reconstruction.
pub(crate) const PARALLEL_ANGLE_THRESHOLD_DEG: f64 = 5.0;

/// Squared length below which a segment counts as degenerate.
pub(crate) const ZERO_LENGTH_SQ: f64 = 1e-9;

/// Why a contour was rejected by reconstruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Rejection {
    /// Fewer than four segments survived cleaning.
    TooFewSegments { survivors: usize },
    /// The cyclic parallel-run walk failed to terminate (the contour is one
    /// unbroken parallel ring).
    WalkOverflow,
}

/// Working segment plus the cumulative split fractions of the pieces it was
/// merged from. A never-merged segment carries `[0, 1]`.
#[derive(Clone, Debug)]
pub(crate) struct Run {
    pub segment: Segment,
    pub boundaries: Vec<f64>,
}

impl Run {
    pub fn single(segment: Segment) -> Self {
        Self {
            segment,
            boundaries: vec![0.0, 1.0],
        }
    }

    pub fn piece_count(&self) -> usize {
        self.boundaries.len() - 1
    }
}

/// Signed angle, degrees, between two segments under the contour-sequence
/// convention (aligned successive segments measure near 180).
#[inline]
pub(crate) fn segment_angle(reference: &Segment, segment: &Segment) -> f64 {
    signed_angle_deg(&reference.to_vector(), &segment.to_vector())
}

/// True when the two segments are parallel within the reconstruction
/// threshold, directions taken modulo half turns.
#[inline]
pub(crate) fn is_parallel(reference: &Segment, segment: &Segment) -> bool {
    fold_deg_90(segment_angle(reference, segment)).abs() <= PARALLEL_ANGLE_THRESHOLD_DEG
}

/// Rotates `segment` about its barycenter by `angle` reduced toward the
/// reference multiple (180 for a parallel snap, 90 for an orthogonal one).
pub(crate) fn rotate_adjusted(segment: &mut Segment, angle_deg: f64, ref_angle_deg: f64) {
    let mut angle = angle_deg;
    if angle < 0.0 {
        angle += ref_angle_deg;
    } else if angle > 0.0 {
        angle -= ref_angle_deg;
    }
    let barycenter = segment.barycenter();
    segment.source = rotate_about(&barycenter, angle, &segment.source);
    segment.target = rotate_about(&barycenter, angle, &segment.target);
}

/// Runs the full reconstruction sequence over one contour's segments.
pub(crate) fn reconstruct(
    mut segments: Vec<Segment>,
    closed: bool,
    params: &RegularizeParams,
) -> Result<Vec<Segment>, Rejection> {
    correct_short_segments(&mut segments, closed, params.min_length);

    let runs = segments.into_iter().map(Run::single).collect();
    let mut runs = clean(runs, closed)?;

    make_collinear(&mut runs, params.ordinate_bound);
    intersect_runs(&mut runs, closed);

    let mut runs = clean(runs, closed)?;
    intersect_runs(&mut runs, closed);

    Ok(split_runs(&runs))
}
