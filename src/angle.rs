//! Angle utilities used across the regularization pipeline.
//!
//! Orientations are handled in degrees modulo 180: a segment and its reversal
//! share one orientation. Pair relations are estimated modulo 90, where the
//! parity of the nearest quarter-turn multiple distinguishes parallel from
//! orthogonal.

use crate::geometry::Vector;

/// Normalizes an angle in degrees into the range [0, 180).
#[inline]
pub fn normalize_deg_180(angle: f64) -> f64 {
    let norm = angle.rem_euclid(180.0);
    if norm >= 180.0 - 1e-9 {
        0.0
    } else {
        norm
    }
}

/// Wraps an angular difference in degrees into (-90, 90].
#[inline]
pub fn wrap_deg_pm90(angle: f64) -> f64 {
    let mut norm = angle.rem_euclid(180.0);
    if norm > 90.0 {
        norm -= 180.0;
    }
    norm
}

/// Folds a signed angle from (-180, 180] into [-90, 90], treating antipodal
/// directions as equivalent. The sign of near-antiparallel angles flips,
/// which is irrelevant to magnitude tests and consistent for the rotation
/// adjustment in the reconstructor.
#[inline]
pub fn fold_deg_90(angle: f64) -> f64 {
    if angle > 90.0 {
        180.0 - angle
    } else if angle < -90.0 {
        180.0 + angle
    } else {
        angle
    }
}

/// Signed angle in degrees from `reference` to `vector`, in (-180, 180].
///
/// Uses the atan2(det, dot) convention with the reference direction negated,
/// so two aligned segments walking a contour in sequence measure near 180
/// rather than near 0.
#[inline]
pub fn signed_angle_deg(reference: &Vector, vector: &Vector) -> f64 {
    let neg_ref = -reference;
    let det = vector.x * neg_ref.y - vector.y * neg_ref.x;
    let dot = vector.x * neg_ref.x + vector.y * neg_ref.y;
    det.atan2(dot).to_degrees()
}

/// Splits an orientation difference into its nearest quarter-turn rounding.
///
/// Returns the signed deviation to the nearest multiple of 90 degrees and
/// whether that multiple is also a multiple of 180 (a parallel relation).
/// An exact tie between the lower and upper rounding resolves to the upper
/// one: the lower branch is kept only when strictly smaller.
#[inline]
pub fn nearest_quarter_turn(difference: f64) -> (f64, bool) {
    let k = (difference / 90.0).floor();
    let to_lower = 90.0 * k - difference;
    let to_upper = 90.0 * (k + 1.0) - difference;
    if to_lower.abs() < to_upper.abs() {
        (to_lower, (k as i64).rem_euclid(2) == 0)
    } else {
        (to_upper, (k as i64 + 1).rem_euclid(2) == 0)
    }
}
