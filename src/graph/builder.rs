use std::collections::HashSet;

use log::debug;
use spade::{DelaunayTriangulation, HasPosition, Point2, Triangulation};

use super::sampler::{sample_segments, SamplePoint};
use super::{ProximityEdge, ProximityGraph, Relation};
use crate::angle::nearest_quarter_turn;
use crate::error::RegularizeError;
use crate::params::{GraphParams, SamplingParams};
use crate::segment::Segment;

impl HasPosition for SamplePoint {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        Point2::new(self.position.x, self.position.y)
    }
}

/// Builds the proximity graph over `segments`.
///
/// Every triangulation edge connecting samples of two different segments
/// proposes a pair. The pair is admitted when the optimization mode allows
/// its relation kind and the target deviation stays inside the combined
/// per-segment rotation budget `max_orientations[i] + max_orientations[j]`.
pub fn build_graph(
    segments: &[Segment],
    max_orientations: &[f64],
    graph_params: &GraphParams,
    sampling: &SamplingParams,
) -> Result<ProximityGraph, RegularizeError> {
    if segments.is_empty() {
        return Err(RegularizeError::EmptyInput);
    }
    debug_assert_eq!(segments.len(), max_orientations.len());

    let samples = sample_segments(segments, sampling.spacing);

    let mut triangulation: DelaunayTriangulation<SamplePoint> = DelaunayTriangulation::new();
    for sample in &samples {
        triangulation.insert(*sample)?;
    }

    let orientations: Vec<f64> = segments.iter().map(|s| s.orientation()).collect();
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    let mut edges = Vec::new();

    for edge in triangulation.undirected_edges() {
        let [a, b] = edge.vertices();
        let i = a.data().segment;
        let j = b.data().segment;
        if i == j {
            continue;
        }
        let key = if i < j { (i, j) } else { (j, i) };
        if !seen.insert(key) {
            continue;
        }

        let difference = orientations[i] - orientations[j];
        let (target, parallel) = nearest_quarter_turn(difference);
        let relation = if parallel {
            Relation::Parallel
        } else {
            Relation::Orthogonal
        };

        let admitted = match relation {
            Relation::Parallel => graph_params.mode.allows_parallel(),
            Relation::Orthogonal => graph_params.mode.allows_orthogonal(),
        };
        if !admitted {
            continue;
        }
        if target.abs() >= max_orientations[i] + max_orientations[j] {
            continue;
        }

        edges.push(ProximityEdge {
            i,
            j,
            relation,
            target,
            mu: graph_params.lambda,
        });
    }

    debug!(
        "proximity graph: {} segments, {} samples, {} edges",
        segments.len(),
        samples.len(),
        edges.len()
    );

    Ok(ProximityGraph {
        edges,
        segment_count: segments.len(),
    })
}
