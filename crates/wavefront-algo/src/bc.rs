//! Single-source betweenness centrality.
//!
//! Two phases over one abstract BSP loop:
//!
//! 1. **Forward**: breadth-first label propagation from the source. Each
//!    newly reached vertex is claimed once with a compare-and-swap on its
//!    label, and shortest-path counts (sigmas) accumulate over every
//!    shortest edge into it.
//! 2. **Backward**: dependency accumulation in decreasing label depth.
//!    The frontier is reseeded to all vertices and each sweep accepts only
//!    (src, dst) pairs with `labels[src] == depth` and
//!    `labels[dst] == depth + 1`, so contributions flow from the deepest
//!    level toward the source, one depth per step.
//!
//! The final pass halves every centrality value: an undirected shortest
//! path is discovered once from each end.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use wavefront_core::{
    advance, AdvanceConfig, AtomicF32, CsrGraph, ElementId, Enactor, EnactorState, EngineError,
    Problem, Result, VertexId,
};

/// Traversal state for one source: BFS labels, shortest-path counts, and
/// the dependency accumulators.
#[derive(Debug)]
pub struct BcProblem {
    graph: Arc<CsrGraph>,
    source: VertexId,
    labels: Vec<AtomicI32>,
    deltas: Vec<AtomicF32>,
    sigmas: Vec<AtomicF32>,
    bc_values: Vec<AtomicF32>,
}

impl BcProblem {
    /// Create a problem for `source`, rejecting out-of-range sources
    /// before any loop runs.
    pub fn new(graph: Arc<CsrGraph>, source: VertexId) -> Result<Self> {
        if source.index() >= graph.vertex_count() {
            return Err(EngineError::InvalidParameter(format!(
                "source vertex {} >= vertex count {}",
                source.get(),
                graph.vertex_count()
            )));
        }
        Ok(Self {
            graph,
            source,
            labels: Vec::new(),
            deltas: Vec::new(),
            sigmas: Vec::new(),
            bc_values: Vec::new(),
        })
    }

    /// The bound graph.
    pub fn graph(&self) -> &Arc<CsrGraph> {
        &self.graph
    }

    /// Copy shortest-path counts and centrality values into caller-owned
    /// buffers.
    pub fn write_results(&self, sigmas: &mut [f32], bc_values: &mut [f32]) {
        for (out, cell) in sigmas.iter_mut().zip(&self.sigmas) {
            *out = cell.load();
        }
        for (out, cell) in bc_values.iter_mut().zip(&self.bc_values) {
            *out = cell.load();
        }
    }
}

impl Problem for BcProblem {
    fn init(&mut self) -> Result<()> {
        let n = self.graph.vertex_count();
        self.labels = (0..n).map(|_| AtomicI32::new(0)).collect();
        self.deltas = (0..n).map(|_| AtomicF32::new(0.0)).collect();
        self.sigmas = (0..n).map(|_| AtomicF32::new(0.0)).collect();
        self.bc_values = (0..n).map(|_| AtomicF32::new(0.0)).collect();
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        for cell in &self.labels {
            cell.store(-1, Ordering::Relaxed);
        }
        for cell in &self.deltas {
            cell.store(0.0);
        }
        for cell in &self.sigmas {
            cell.store(0.0);
        }
        for cell in &self.bc_values {
            cell.store(0.0);
        }
        self.sigmas[self.source.index()].store(1.0);
        self.labels[self.source.index()].store(0, Ordering::Relaxed);
        Ok(())
    }
}

/// Two-phase enactor; `forward` and `depth` make it a small state machine
/// over the shared loop.
pub struct BcEnactor {
    problem: BcProblem,
    state: EnactorState,
    forward: bool,
    depth: i32,
}

impl BcEnactor {
    /// Create an enactor over an initialized problem.
    pub fn new(problem: BcProblem) -> Self {
        Self {
            problem,
            state: EnactorState::new(),
            forward: true,
            depth: 0,
        }
    }

    /// The problem, for reading results after [`Enactor::enact`].
    pub fn problem(&self) -> &BcProblem {
        &self.problem
    }

    /// Recover the problem, e.g. to `reset` and re-run.
    pub fn into_problem(self) -> BcProblem {
        self.problem
    }
}

impl Enactor for BcEnactor {
    fn state_mut(&mut self) -> &mut EnactorState {
        &mut self.state
    }

    fn prepare_frontier(&mut self) -> Result<()> {
        self.state.frontier.clear();
        self.state.frontier.push_back(self.problem.source);
        Ok(())
    }

    fn step(&mut self) -> Result<()> {
        let Self {
            problem,
            state,
            forward,
            depth,
        } = self;
        let graph = problem.graph.as_ref();

        let labels = &problem.labels;
        let sigmas = &problem.sigmas;

        if *forward {
            advance(
                graph,
                &mut state.frontier,
                &AdvanceConfig::new(),
                |src, dst, _edge, _w| {
                    let proposed = labels[src.index()].load(Ordering::Relaxed) + 1;
                    let old = labels[dst.index()]
                        .compare_exchange(-1, proposed, Ordering::Relaxed, Ordering::Relaxed)
                        .unwrap_or_else(|actual| actual);

                    // A vertex already claimed at a different depth is not
                    // on a shortest path through src.
                    if old != -1 && proposed != old {
                        return false;
                    }
                    sigmas[dst.index()].fetch_add(sigmas[src.index()].load());
                    old == -1
                },
            )?;
            *depth += 1;
        } else {
            let deltas = &problem.deltas;
            let bc_values = &problem.bc_values;
            let source = problem.source;
            let sweep_depth = *depth;

            let config = AdvanceConfig::new().with_output(false);
            advance(graph, &mut state.frontier, &config, |src, dst, _edge, _w| {
                if src == source {
                    return false;
                }
                let src_label = labels[src.index()].load(Ordering::Relaxed);
                if src_label != sweep_depth {
                    return false;
                }
                if labels[dst.index()].load(Ordering::Relaxed) != src_label + 1 {
                    return false;
                }

                let update =
                    sigmas[src.index()].load() / sigmas[dst.index()].load()
                        * (1.0 + deltas[dst.index()].load());
                deltas[src.index()].fetch_add(update);
                bc_values[src.index()].fetch_add(update);
                false
            })?;
            *depth -= 1;
        }

        Ok(())
    }

    fn is_converged(&mut self) -> bool {
        let Self {
            problem,
            state,
            forward,
            depth,
        } = self;
        let n = problem.graph.vertex_count();

        if *forward {
            if state.frontier.is_empty() {
                // Forward exhausted: reseed every vertex and replay the
                // levels deepest-first.
                state.frontier.sequence(VertexId(0), n);
                *forward = false;
                *depth = state.iteration as i32 - 1;
            }
            false
        } else {
            debug!(depth = *depth, "backward sweep");
            if *depth <= 0 {
                // Each undirected path was discovered from both endpoints.
                problem
                    .bc_values
                    .par_iter()
                    .for_each(|cell| cell.store(cell.load() * 0.5));
                true
            } else {
                false
            }
        }
    }
}

/// Compute single-source betweenness centrality from `source`.
///
/// Fills `sigmas` and `bc_values` (each of length `|V|`) in place and
/// returns the elapsed execution time in milliseconds.
pub fn run(
    graph: Arc<CsrGraph>,
    source: VertexId,
    sigmas: &mut [f32],
    bc_values: &mut [f32],
) -> Result<f32> {
    let n = graph.vertex_count();
    if sigmas.len() != n {
        return Err(EngineError::BufferLengthMismatch {
            expected: n,
            actual: sigmas.len(),
        });
    }
    if bc_values.len() != n {
        return Err(EngineError::BufferLengthMismatch {
            expected: n,
            actual: bc_values.len(),
        });
    }

    let mut problem = BcProblem::new(graph, source)?;
    problem.init()?;
    problem.reset()?;

    let mut enactor = BcEnactor::new(problem);
    let elapsed = enactor.enact()?;
    enactor.problem().write_results(sigmas, bc_values);

    Ok(elapsed.as_secs_f32() * 1_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavefront_core::CsrGraphBuilder;

    fn path4() -> Arc<CsrGraph> {
        Arc::new(
            CsrGraphBuilder::new(4)
                .with_undirected_edges(&[(0, 1), (1, 2), (2, 3)])
                .build(),
        )
    }

    #[test]
    fn test_path_sigmas_and_centrality() {
        let mut sigmas = vec![0.0f32; 4];
        let mut bc = vec![0.0f32; 4];
        run(path4(), VertexId(0), &mut sigmas, &mut bc).unwrap();

        assert_eq!(sigmas, vec![1.0, 1.0, 1.0, 1.0]);

        // the cut vertices carry all pair dependencies; the endpoints none
        assert_eq!(bc[0], 0.0);
        assert_eq!(bc[3], 0.0);
        assert_eq!(bc[1], 1.0);
        assert_eq!(bc[2], 0.5);
    }

    #[test]
    fn test_path_phase_transitions() {
        let mut problem = BcProblem::new(path4(), VertexId(0)).unwrap();
        problem.init().unwrap();
        problem.reset().unwrap();

        let mut enactor = BcEnactor::new(problem);
        enactor.enact().unwrap();

        // forward: frontiers [0] -> [1] -> [2] -> [3] -> [], 4 steps;
        // backward: sweeps at depths 3, 2, 1, another 3 steps
        assert_eq!(enactor.state_mut().iteration, 7);
        assert!(!enactor.forward);
        assert_eq!(enactor.depth, 0);
    }

    #[test]
    fn test_diamond_counts_both_paths() {
        // 0 - {1,2} - 3
        let graph = Arc::new(
            CsrGraphBuilder::new(4)
                .with_undirected_edges(&[(0, 1), (0, 2), (1, 3), (2, 3)])
                .build(),
        );

        let mut sigmas = vec![0.0f32; 4];
        let mut bc = vec![0.0f32; 4];
        run(graph, VertexId(0), &mut sigmas, &mut bc).unwrap();

        assert_eq!(sigmas, vec![1.0, 1.0, 1.0, 2.0]);
        assert_eq!(bc[1], 0.25);
        assert_eq!(bc[2], 0.25);
        assert_eq!(bc[0], 0.0);
        assert_eq!(bc[3], 0.0);
    }

    #[test]
    fn test_star_center_source() {
        let graph = Arc::new(
            CsrGraphBuilder::new(4)
                .with_undirected_edges(&[(0, 1), (0, 2), (0, 3)])
                .build(),
        );

        let mut sigmas = vec![0.0f32; 4];
        let mut bc = vec![0.0f32; 4];
        run(graph, VertexId(0), &mut sigmas, &mut bc).unwrap();

        // every leaf is one hop away; nothing lies between any pair
        assert_eq!(sigmas, vec![1.0, 1.0, 1.0, 1.0]);
        assert_eq!(bc, vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_source_is_rejected() {
        let err = BcProblem::new(path4(), VertexId(10)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter(_)));
    }

    #[test]
    fn test_output_length_is_validated() {
        let mut sigmas = vec![0.0f32; 2];
        let mut bc = vec![0.0f32; 4];
        let err = run(path4(), VertexId(0), &mut sigmas, &mut bc).unwrap_err();
        assert!(matches!(err, EngineError::BufferLengthMismatch { .. }));
    }

    #[test]
    fn test_isolated_source_terminates() {
        // source with no edges at all: forward drains immediately and the
        // backward countdown still lands
        let graph = Arc::new(CsrGraphBuilder::new(3).with_edges(&[(1, 2)]).build());
        let mut sigmas = vec![0.0f32; 3];
        let mut bc = vec![0.0f32; 3];
        run(graph, VertexId(0), &mut sigmas, &mut bc).unwrap();

        assert_eq!(sigmas, vec![1.0, 0.0, 0.0]);
        assert_eq!(bc, vec![0.0, 0.0, 0.0]);
    }
}
