//! Orientation optimizer seam and the default least-squares solver.
//!
//! The pipeline only requires a deterministic set of per-segment rotation
//! corrections plus per-edge residuals whose magnitude the classifier can
//! gate against its tolerance. Any convex solver satisfying that contract
//! can be plugged in through [`OrientationSolver`]; the default is a plain
//! Gauss-Seidel iteration on the weighted least-squares objective
//! `sum mu_ij * (x_i - x_j - t_ij)^2`.

use log::debug;

use crate::graph::ProximityGraph;
use crate::params::SolverParams;

/// Solved rotation corrections.
#[derive(Clone, Debug)]
pub struct OrientationSolution {
    /// Per-segment correction, degrees. Adding it to the segment's
    /// orientation yields the regularized direction.
    pub corrections: Vec<f64>,
    /// Per-edge residual `t_ij - (x_i - x_j)`, degrees, in graph edge order.
    pub residuals: Vec<f64>,
}

/// Pluggable orientation optimizer.
///
/// Implementations must be deterministic for identical input. Convergence
/// failures are not surfaced: whatever the final iterate is, it is the
/// answer (a zero vector is an acceptable degenerate outcome).
pub trait OrientationSolver {
    fn solve(
        &self,
        graph: &ProximityGraph,
        max_orientations: &[f64],
    ) -> OrientationSolution;
}

/// Default solver: Gauss-Seidel sweeps over the least-squares objective,
/// followed by per-component mean centering (the minimum-norm member of the
/// solution family, removing the per-component rotation gauge) and clamping
/// to the per-segment budgets.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeastSquaresSolver {
    pub params: SolverParams,
}

impl LeastSquaresSolver {
    pub fn new(params: SolverParams) -> Self {
        Self { params }
    }
}

impl OrientationSolver for LeastSquaresSolver {
    fn solve(
        &self,
        graph: &ProximityGraph,
        max_orientations: &[f64],
    ) -> OrientationSolution {
        let n = graph.segment_count;
        let mut x = vec![0.0f64; n];

        // Constraint x_i - x_j = t_ij, stored from both endpoints.
        let mut adjacency: Vec<Vec<(usize, f64, f64)>> = vec![Vec::new(); n];
        for edge in &graph.edges {
            adjacency[edge.i].push((edge.j, edge.target, edge.mu));
            adjacency[edge.j].push((edge.i, -edge.target, edge.mu));
        }

        let mut sweeps = 0usize;
        while sweeps < self.params.max_sweeps {
            let mut max_delta = 0.0f64;
            for (i, neighbors) in adjacency.iter().enumerate() {
                if neighbors.is_empty() {
                    continue;
                }
                let mut weighted = 0.0;
                let mut weight_sum = 0.0;
                for &(j, target, mu) in neighbors {
                    weighted += mu * (x[j] + target);
                    weight_sum += mu;
                }
                let next = weighted / weight_sum;
                max_delta = max_delta.max((next - x[i]).abs());
                x[i] = next;
            }
            sweeps += 1;
            if max_delta < self.params.convergence_eps {
                break;
            }
        }
        debug!("orientation solve: {} segments, {} sweeps", n, sweeps);

        center_components(&mut x, graph);

        for (value, bound) in x.iter_mut().zip(max_orientations) {
            *value = value.clamp(-*bound, *bound);
        }

        let residuals = graph
            .edges
            .iter()
            .map(|e| e.target - (x[e.i] - x[e.j]))
            .collect();

        OrientationSolution {
            corrections: x,
            residuals,
        }
    }
}

/// Subtracts the mean correction within every connected component of the
/// constraint graph. The objective only pins pairwise differences, so each
/// component carries one free rotation; centering selects the smallest one.
fn center_components(x: &mut [f64], graph: &ProximityGraph) {
    let n = x.len();
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    for edge in &graph.edges {
        let a = find(&mut parent, edge.i);
        let b = find(&mut parent, edge.j);
        if a != b {
            parent[a] = b;
        }
    }

    let mut sums = vec![0.0f64; n];
    let mut counts = vec![0usize; n];
    for i in 0..n {
        let root = find(&mut parent, i);
        sums[root] += x[i];
        counts[root] += 1;
    }
    for i in 0..n {
        let root = find(&mut parent, i);
        if counts[root] > 1 {
            x[i] -= sums[root] / counts[root] as f64;
        }
    }
}
