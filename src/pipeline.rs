//! Pipeline orchestration: graph, solve, group, apply, reconstruct.

use std::time::Instant;

use log::debug;
use rayon::prelude::*;

use crate::buckets::DirectionBuckets;
use crate::error::RegularizeError;
use crate::graph::build_graph;
use crate::grouping::{classify, Classification};
use crate::params::RegularizeParams;
use crate::reconstruct::reconstruct;
use crate::report::{
    ContourOutcome, ContourStatus, RegularizeOutput, RegularizeReport, RegularizedContour,
    StageTimings,
};
use crate::segment::{Contour, Segment};
use crate::solver::{LeastSquaresSolver, OrientationSolver};

/// Where one contour's segments live in the flattened arena.
#[derive(Clone, Copy, Debug)]
struct ContourRange {
    start: usize,
    len: usize,
    closed: bool,
}

/// Batch regularizer over contours.
///
/// Holds validated parameters and a solver; `regularize` runs the whole
/// pipeline over a batch of contours and never mutates its input.
pub struct ShapeRegularizer<S: OrientationSolver = LeastSquaresSolver> {
    params: RegularizeParams,
    solver: S,
}

impl ShapeRegularizer<LeastSquaresSolver> {
    pub fn new(params: RegularizeParams) -> Result<Self, RegularizeError> {
        let solver = LeastSquaresSolver::new(params.solver);
        Self::with_solver(params, solver)
    }
}

impl<S: OrientationSolver> ShapeRegularizer<S> {
    /// Validates `params` and installs a custom orientation solver.
    pub fn with_solver(params: RegularizeParams, solver: S) -> Result<Self, RegularizeError> {
        validate(&params)?;
        Ok(Self { params, solver })
    }

    pub fn params(&self) -> &RegularizeParams {
        &self.params
    }

    /// Runs the full pipeline over `contours`.
    ///
    /// Contours whose reconstruction fails fall back to their rotated,
    /// un-reconstructed segments and are flagged in the report. A zero
    /// angle bound short-circuits into a passthrough of the input.
    pub fn regularize(&self, contours: &[Contour]) -> Result<RegularizeOutput, RegularizeError>
    where
        S: Sync,
    {
        let total = Instant::now();

        let mut arena: Vec<Segment> = Vec::new();
        let mut ranges: Vec<ContourRange> = Vec::new();
        for contour in contours {
            ranges.push(ContourRange {
                start: arena.len(),
                len: contour.len(),
                closed: contour.closed,
            });
            arena.extend_from_slice(&contour.segments);
        }
        if arena.is_empty() {
            return Err(RegularizeError::EmptyInput);
        }

        if self.params.angle_bound == 0.0 {
            return Ok(passthrough(contours, arena.len(), total));
        }

        let bounds = vec![self.params.angle_bound; arena.len()];

        let stage = Instant::now();
        let graph = build_graph(&arena, &bounds, &self.params.graph, &self.params.sampling)?;
        let graph_ms = millis(stage);
        debug!(
            "proximity graph: {} segments, {} edges",
            arena.len(),
            graph.len()
        );

        let stage = Instant::now();
        let solution = self.solver.solve(&graph, &bounds);
        let solve_ms = millis(stage);

        let stage = Instant::now();
        let mut classification = classify(&arena, &graph, &solution, &self.params.grouping);
        unify_short_segments(&mut classification, &arena, &ranges, self.params.min_length);
        let grouping_ms = millis(stage);
        debug!("classified into {} groups", classification.group_members.len());

        let stage = Instant::now();
        let buckets = DirectionBuckets::build(
            &classification,
            &solution,
            &arena,
            self.params.grouping.angle_epsilon,
        );
        buckets.apply(&mut arena);
        let apply_ms = millis(stage);

        let stage = Instant::now();
        let results: Vec<(Contour, ContourStatus)> = ranges
            .par_iter()
            .enumerate()
            .map(|(index, range)| {
                let rotated = arena[range.start..range.start + range.len].to_vec();
                match reconstruct(rotated.clone(), range.closed, &self.params) {
                    Ok(segments) => (
                        Contour {
                            segments,
                            closed: range.closed,
                        },
                        ContourStatus::Regularized,
                    ),
                    Err(reason) => {
                        debug!("contour {index} rejected: {reason:?}");
                        // Rejection keeps the rotated, un-reconstructed
                        // segments.
                        (
                            Contour {
                                segments: rotated,
                                closed: range.closed,
                            },
                            ContourStatus::Rejected { reason },
                        )
                    }
                }
            })
            .collect();
        let reconstruct_ms = millis(stage);

        let mut output_contours = Vec::with_capacity(results.len());
        let mut outcomes = Vec::with_capacity(results.len());
        for (index, (contour, status)) in results.into_iter().enumerate() {
            output_contours.push(RegularizedContour {
                source_index: index,
                contour,
            });
            outcomes.push(ContourOutcome { index, status });
        }

        Ok(RegularizeOutput {
            contours: output_contours,
            report: RegularizeReport {
                segment_count: arena.len(),
                edge_count: graph.len(),
                group_count: classification.group_members.len(),
                outcomes,
                timings: StageTimings {
                    graph_ms,
                    solve_ms,
                    grouping_ms,
                    apply_ms,
                    reconstruct_ms,
                    total_ms: millis(total),
                },
            },
        })
    }
}

fn millis(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1e3
}

fn validate(params: &RegularizeParams) -> Result<(), RegularizeError> {
    let check = |ok: bool, name: &'static str, value: f64| {
        if ok {
            Ok(())
        } else {
            Err(RegularizeError::InvalidParameter { name, value })
        }
    };
    check(params.min_length > 0.0, "min_length", params.min_length)?;
    check(params.angle_bound >= 0.0, "angle_bound", params.angle_bound)?;
    check(
        params.ordinate_bound >= 0.0,
        "ordinate_bound",
        params.ordinate_bound,
    )?;
    check(
        params.sampling.spacing > 0.0,
        "sampling.spacing",
        params.sampling.spacing,
    )?;
    check(
        (0.0..=1.0).contains(&params.graph.lambda),
        "graph.lambda",
        params.graph.lambda,
    )?;
    Ok(())
}

fn passthrough(contours: &[Contour], segment_count: usize, total: Instant) -> RegularizeOutput {
    let output_contours = contours
        .iter()
        .cloned()
        .enumerate()
        .map(|(source_index, contour)| RegularizedContour {
            source_index,
            contour,
        })
        .collect();
    let outcomes = (0..contours.len())
        .map(|index| ContourOutcome {
            index,
            status: ContourStatus::Passthrough,
        })
        .collect();
    RegularizeOutput {
        contours: output_contours,
        report: RegularizeReport {
            segment_count,
            outcomes,
            timings: StageTimings {
                total_ms: millis(total),
                ..StageTimings::default()
            },
            ..RegularizeReport::default()
        },
    }
}

/// Re-homes segments too short to carry direction evidence into the group
/// of their nearest long neighbor along the contour ring.
fn unify_short_segments(
    classification: &mut Classification,
    segments: &[Segment],
    ranges: &[ContourRange],
    min_length: f64,
) {
    let threshold = 2.0 * min_length;
    for range in ranges {
        if range.len < 2 {
            continue;
        }
        for k in 0..range.len {
            let index = range.start + k;
            if segments[index].length() >= threshold {
                continue;
            }
            let Some(donor) = nearest_long_neighbor(segments, range, k, threshold) else {
                continue;
            };
            let target_group = classification.segment_groups[donor];
            let current = classification.segment_groups[index];
            if current == target_group {
                continue;
            }

            classification.segment_groups[index] = target_group;
            if let Some(members) = classification.group_members.get_mut(&current) {
                members.retain(|&m| m != index);
                if members.is_empty() {
                    classification.group_members.remove(&current);
                    classification.group_angles.remove(&current);
                }
            }
            if let Some(members) = classification.group_members.get_mut(&target_group) {
                members.push(index);
            }
            // A re-homed segment follows its donor's direction rather than
            // voting on it.
            classification.adopted[index] = true;
        }
    }
}

/// Closest segment by ring distance whose length reaches `threshold`,
/// preferring the successor side on ties. Open contours do not wrap.
fn nearest_long_neighbor(
    segments: &[Segment],
    range: &ContourRange,
    k: usize,
    threshold: f64,
) -> Option<usize> {
    let n = range.len;
    for distance in 1..n {
        let forward = k + distance;
        if range.closed || forward < n {
            let index = range.start + forward % n;
            if segments[index].length() >= threshold {
                return Some(index);
            }
        }
        if range.closed || distance <= k {
            let backward = (k + n - distance) % n;
            let index = range.start + backward;
            if segments[index].length() >= threshold {
                return Some(index);
            }
        }
    }
    None
}
