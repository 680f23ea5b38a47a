//! Parameter types configuring the regularization stages.
//!
//! Defaults target building-footprint contours at metric scale. For tuning,
//! start with `angle_bound` (how far a segment may rotate) and
//! `ordinate_bound` (how far apart collinear segments may sit).

use serde::{Deserialize, Serialize};

/// Which pairwise relations the proximity graph admits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizationMode {
    ParallelismOnly,
    OrthogonalityOnly,
    Both,
}

impl OptimizationMode {
    #[inline]
    pub fn allows_parallel(self) -> bool {
        matches!(self, Self::ParallelismOnly | Self::Both)
    }

    #[inline]
    pub fn allows_orthogonal(self) -> bool {
        matches!(self, Self::OrthogonalityOnly | Self::Both)
    }
}

/// Top-level parameters controlling the regularization pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegularizeParams {
    /// Segments shorter than this are corrected from their neighbors rather
    /// than trusted as direction evidence (> 0).
    pub min_length: f64,
    /// Maximum rotation budget per segment, degrees. 0 disables
    /// regularization entirely: input is returned unchanged.
    pub angle_bound: f64,
    /// Maximum perpendicular offset for collinear merging (>= 0).
    pub ordinate_bound: f64,
    /// Proximity graph sampling and gating.
    pub sampling: SamplingParams,
    /// Relation admission and optimizer confidence.
    pub graph: GraphParams,
    /// Grouping tolerances.
    pub grouping: GroupingParams,
    /// Default orientation solver schedule.
    pub solver: SolverParams,
}

impl Default for RegularizeParams {
    fn default() -> Self {
        Self {
            min_length: 1.0,
            angle_bound: 10.0,
            ordinate_bound: 0.5,
            sampling: SamplingParams::default(),
            graph: GraphParams::default(),
            grouping: GroupingParams::default(),
            solver: SolverParams::default(),
        }
    }
}

/// Segment sampling for the Delaunay proximity graph.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Regular spacing between sample points along a segment (> 0). A
    /// degenerate segment still samples both endpoints.
    pub spacing: f64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self { spacing: 2.0 }
    }
}

/// Proximity edge admission and weighting.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GraphParams {
    /// Which relation kinds the optimizer may exploit.
    pub mode: OptimizationMode,
    /// Optimizer confidence weight attached to every edge, in [0, 1].
    pub lambda: f64,
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            mode: OptimizationMode::Both,
            lambda: 0.8,
        }
    }
}

/// Tolerances for the grouping / classification passes.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GroupingParams {
    /// An edge participates in grouping when its solved residual magnitude
    /// falls below this, degrees.
    pub tolerance: f64,
    /// Two group angles closer than this merge into one, degrees.
    pub angle_epsilon: f64,
}

impl Default for GroupingParams {
    fn default() -> Self {
        Self {
            tolerance: 1.0,
            angle_epsilon: 0.25,
        }
    }
}

/// Schedule for the default Gauss-Seidel least-squares solver.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SolverParams {
    /// Maximum number of full sweeps.
    pub max_sweeps: usize,
    /// Early-exit threshold on the largest per-sweep update, degrees.
    pub convergence_eps: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            max_sweeps: 1000,
            convergence_eps: 1e-12,
        }
    }
}
