//! Proximity graph between segments.
//!
//! Candidate parallel/orthogonal pairs are discovered by sampling every
//! segment into points, triangulating the samples and walking triangulation
//! edges that connect two different segments. Each accepted pair carries a
//! target deviation (how far the pair is from an exact quarter-turn
//! relation) and a confidence weight consumed by the orientation solver.

mod builder;
mod sampler;

pub use builder::build_graph;

use serde::Serialize;

/// Relation kind estimated for a segment pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Relation {
    Parallel,
    Orthogonal,
}

/// Candidate relationship between two segments.
///
/// `target` is the signed rotation, in degrees, that would bring the pair
/// onto an exact multiple of 90: `orientation(i) - orientation(j) + target`
/// is a quarter-turn multiple.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ProximityEdge {
    pub i: usize,
    pub j: usize,
    pub relation: Relation,
    pub target: f64,
    pub mu: f64,
}

/// Read-only set of proximity edges over a segment collection.
///
/// Edge order is the triangulation emission order and is preserved: the
/// classifier's pass over edges depends on it. Each unordered pair appears
/// at most once (canonical `(min, max)` key, first occurrence wins).
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProximityGraph {
    pub edges: Vec<ProximityEdge>,
    pub segment_count: usize,
}

impl ProximityGraph {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
