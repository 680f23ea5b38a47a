//! Segment grouping / classification.
//!
//! Consumes the proximity graph and the solved corrections, and clusters
//! segments into groups that share one reference orientation. Three passes:
//!
//! 1. Walk proximity edges in builder emission order. Edges whose solved
//!    residual magnitude stays below the tolerance drive union/assign logic
//!    (parallel pairs share a group, orthogonal pairs seed separate ones,
//!    conflicting parallel assignments merge).
//! 2. Register one representative angle per group (the first member's
//!    corrected orientation); groups landing within `angle_epsilon` of an
//!    already-registered angle merge into that group instead.
//! 3. Adopt every still-unassigned segment into the closest registered
//!    angle modulo 180-degree turns, or seed a fresh group from its raw
//!    orientation.
//!
//! Group ids come from a local counter threaded through the passes; the
//! procedure is reentrant and deterministic for a fixed edge order.

use std::collections::BTreeMap;

use log::debug;

use crate::angle::normalize_deg_180;
use crate::graph::{ProximityGraph, Relation};
use crate::params::GroupingParams;
use crate::segment::Segment;
use crate::solver::OrientationSolution;

/// Classification result: every segment belongs to exactly one live group.
#[derive(Clone, Debug)]
pub struct Classification {
    /// Group id per segment index.
    pub segment_groups: Vec<usize>,
    /// Representative angle per live group id, degrees in [0, 180).
    pub group_angles: BTreeMap<usize, f64>,
    /// Members per live group id, ascending segment order within a group's
    /// accumulation history.
    pub group_members: BTreeMap<usize, Vec<usize>>,
    /// True for segments adopted in pass 3 (no solved correction backed
    /// their assignment).
    pub adopted: Vec<bool>,
}

pub fn classify(
    segments: &[Segment],
    graph: &ProximityGraph,
    solution: &OrientationSolution,
    params: &GroupingParams,
) -> Classification {
    let n = segments.len();
    let mut assignment: Vec<Option<usize>> = vec![None; n];
    let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    let mut next_group = 0usize;

    // Pass 1: union/assign along satisfied edges.
    for (edge, residual) in graph.edges.iter().zip(&solution.residuals) {
        if residual.abs() >= params.tolerance {
            continue;
        }
        let (i, j) = (edge.i, edge.j);
        match (assignment[i], assignment[j]) {
            (None, None) => match edge.relation {
                Relation::Parallel => {
                    let g = fresh_group(&mut next_group);
                    assign(&mut assignment, &mut members, i, g);
                    assign(&mut assignment, &mut members, j, g);
                }
                Relation::Orthogonal => {
                    let g_i = fresh_group(&mut next_group);
                    assign(&mut assignment, &mut members, i, g_i);
                    let g_j = fresh_group(&mut next_group);
                    assign(&mut assignment, &mut members, j, g_j);
                }
            },
            (None, Some(g_j)) => match edge.relation {
                Relation::Parallel => assign(&mut assignment, &mut members, i, g_j),
                Relation::Orthogonal => {
                    let g = fresh_group(&mut next_group);
                    assign(&mut assignment, &mut members, i, g);
                }
            },
            (Some(g_i), None) => match edge.relation {
                Relation::Parallel => assign(&mut assignment, &mut members, j, g_i),
                Relation::Orthogonal => {
                    let g = fresh_group(&mut next_group);
                    assign(&mut assignment, &mut members, j, g);
                }
            },
            (Some(g_i), Some(g_j)) => {
                if g_i != g_j && edge.relation == Relation::Parallel {
                    merge_groups(&mut assignment, &mut members, g_j, g_i);
                }
                // Orthogonal between two assigned groups: recorded
                // implicitly, never enforced by a merge or a split.
            }
        }
    }

    // Pass 2: register group angles, merging angle-coincident groups.
    let mut angles: BTreeMap<usize, f64> = BTreeMap::new();
    for i in 0..n {
        let Some(g_i) = assignment[i] else { continue };
        if angles.contains_key(&g_i) {
            continue;
        }
        let theta = normalize_deg_180(segments[i].orientation() + solution.corrections[i]);
        let coincident = angles
            .iter()
            .find(|(_, angle)| (**angle - theta).abs() < params.angle_epsilon)
            .map(|(g, _)| *g);
        match coincident {
            None => {
                angles.insert(g_i, theta);
            }
            Some(g_j) => merge_groups(&mut assignment, &mut members, g_i, g_j),
        }
    }

    // Pass 3: adopt unassigned segments into the closest angle, modulo
    // half-turns, or seed new groups from their raw orientations.
    let mut adopted = vec![false; n];
    for i in 0..n {
        if assignment[i].is_some() {
            continue;
        }
        let alpha = segments[i].orientation();
        let mut found = None;
        'search: for (g, angle) in &angles {
            for k in [-1.0, 0.0, 1.0] {
                if (angle - alpha + k * 180.0).abs() < params.angle_epsilon {
                    found = Some(*g);
                    break 'search;
                }
            }
        }
        let g = match found {
            Some(g) => g,
            None => {
                let g = fresh_group(&mut next_group);
                angles.insert(g, alpha);
                g
            }
        };
        assign(&mut assignment, &mut members, i, g);
        adopted[i] = true;
    }

    let segment_groups: Vec<usize> = assignment
        .into_iter()
        .map(|g| g.expect("every segment is assigned after pass 3"))
        .collect();
    members.retain(|_, list| !list.is_empty());
    angles.retain(|g, _| members.contains_key(g));

    debug!(
        "classification: {} segments into {} groups",
        n,
        members.len()
    );

    Classification {
        segment_groups,
        group_angles: angles,
        group_members: members,
        adopted,
    }
}

fn fresh_group(next: &mut usize) -> usize {
    let g = *next;
    *next += 1;
    g
}

fn assign(
    assignment: &mut [Option<usize>],
    members: &mut BTreeMap<usize, Vec<usize>>,
    segment: usize,
    group: usize,
) {
    assignment[segment] = Some(group);
    members.entry(group).or_default().push(segment);
}

/// Reassigns all members of `from` into `into` and empties `from`.
fn merge_groups(
    assignment: &mut [Option<usize>],
    members: &mut BTreeMap<usize, Vec<usize>>,
    from: usize,
    into: usize,
) {
    let moved = members.remove(&from).unwrap_or_default();
    for &segment in &moved {
        assignment[segment] = Some(into);
    }
    members.entry(into).or_default().extend(moved);
}
