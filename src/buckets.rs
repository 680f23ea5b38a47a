//! Direction buckets: the regularization tree leaves.
//!
//! Each bucket collects the segments rotated onto one canonical angle.
//! Buckets are built once per regularization run from the classification
//! result and never shared across runs.

use log::debug;

use crate::angle::{normalize_deg_180, wrap_deg_pm90};
use crate::geometry::rotate_about;
use crate::grouping::Classification;
use crate::segment::{LengthStats, Segment};
use crate::solver::OrientationSolution;

/// Segments sharing one resolved direction.
#[derive(Clone, Debug)]
pub struct DirectionBucket {
    /// Canonical angle, degrees in [0, 180).
    pub angle: f64,
    /// Member segment indices.
    pub members: Vec<usize>,
    /// The anchoring member: the longest segment, kept un-rotated.
    pub reference: usize,
}

/// All buckets of one regularization run.
#[derive(Clone, Debug, Default)]
pub struct DirectionBuckets {
    pub buckets: Vec<DirectionBucket>,
}

impl DirectionBuckets {
    /// Builds buckets from the classification and the solved corrections.
    ///
    /// The final bucket angle refines the registered group angle with the
    /// arithmetic mean of the contributing members' corrected orientations,
    /// measured relative to the registered angle so wrap-around near 0/180
    /// cannot skew the mean. Adopted members (pass-3 assignments without a
    /// solved correction) do not contribute.
    ///
    /// Groups whose final angles land within `angle_epsilon` share a bucket.
    pub fn build(
        classification: &Classification,
        solution: &OrientationSolution,
        segments: &[Segment],
        angle_epsilon: f64,
    ) -> Self {
        let stats = LengthStats::compute(segments);
        let mut buckets: Vec<DirectionBucket> = Vec::new();

        for (group, members) in &classification.group_members {
            let registered = classification.group_angles[group];

            let mut delta_sum = 0.0;
            let mut contributors = 0usize;
            for &m in members {
                if classification.adopted[m] {
                    continue;
                }
                let corrected =
                    normalize_deg_180(segments[m].orientation() + solution.corrections[m]);
                delta_sum += wrap_deg_pm90(corrected - registered);
                contributors += 1;
            }
            let angle = if contributors > 0 {
                normalize_deg_180(registered + delta_sum / contributors as f64)
            } else {
                registered
            };

            match buckets
                .iter_mut()
                .find(|b| wrap_deg_pm90(b.angle - angle).abs() < angle_epsilon)
            {
                Some(bucket) => bucket.members.extend(members.iter().copied()),
                None => buckets.push(DirectionBucket {
                    angle,
                    members: members.clone(),
                    reference: 0,
                }),
            }
        }

        for bucket in &mut buckets {
            bucket.reference = longest_member(&bucket.members, segments);
            let reference_length = segments[bucket.reference].length();
            if reference_length < stats.long_threshold() {
                debug!(
                    "bucket at {:.2} deg anchored by a short reference ({:.3} < {:.3})",
                    bucket.angle,
                    reference_length,
                    stats.long_threshold()
                );
            }
        }

        Self { buckets }
    }

    /// Rotates every non-reference member about its own barycenter onto its
    /// bucket direction. Reference segments anchor their bucket and are not
    /// self-rotated.
    pub fn apply(&self, segments: &mut [Segment]) {
        for bucket in &self.buckets {
            for &m in &bucket.members {
                if m == bucket.reference {
                    continue;
                }
                let segment = &mut segments[m];
                let delta = wrap_deg_pm90(bucket.angle - segment.orientation());
                let barycenter = segment.barycenter();
                segment.source = rotate_about(&barycenter, delta, &segment.source);
                segment.target = rotate_about(&barycenter, delta, &segment.target);
            }
        }
    }
}

/// Longest member; ties resolve to the lowest index.
fn longest_member(members: &[usize], segments: &[Segment]) -> usize {
    let mut best = members[0];
    let mut best_length = segments[best].squared_length();
    for &m in &members[1..] {
        let length = segments[m].squared_length();
        if length > best_length {
            best = m;
            best_length = length;
        }
    }
    best
}
