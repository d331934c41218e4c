//! Vertex k-core decomposition by iterative degree peeling.
//!
//! The k-core of a graph is the maximal subgraph in which every vertex has
//! degree at least k. Peeling assigns each vertex its core number: at
//! threshold k (= iteration + 1), every surviving vertex whose current
//! degree is at most k is recorded with core number k and removed, its
//! neighbors' degrees are decremented, and removals cascade within the
//! same threshold until none remain. The run converges when every vertex
//! has been removed; the final threshold is the graph's degeneracy.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::info;

use wavefront_core::{
    advance, filter, AdvanceConfig, CsrGraph, ElementId, Enactor, EnactorState, EngineError,
    Problem, Result, VertexId,
};

/// Peeling state: current degrees, the removed set, and the staging marks
/// for the removals of the round in flight.
pub struct KCoreProblem {
    graph: Arc<CsrGraph>,
    degrees: Vec<AtomicI32>,
    deleted: Vec<AtomicBool>,
    to_be_deleted: Vec<AtomicBool>,
    core_numbers: Vec<AtomicU32>,
}

impl KCoreProblem {
    /// Create a problem bound to `graph`. Call [`Problem::init`] before use.
    pub fn new(graph: Arc<CsrGraph>) -> Self {
        Self {
            graph,
            degrees: Vec::new(),
            deleted: Vec::new(),
            to_be_deleted: Vec::new(),
            core_numbers: Vec::new(),
        }
    }

    /// The bound graph.
    pub fn graph(&self) -> &Arc<CsrGraph> {
        &self.graph
    }

    /// Copy assigned core numbers into a caller-owned buffer.
    pub fn write_results(&self, core_numbers: &mut [u32]) {
        for (out, cell) in core_numbers.iter_mut().zip(&self.core_numbers) {
            *out = cell.load(Ordering::Relaxed);
        }
    }
}

impl Problem for KCoreProblem {
    fn init(&mut self) -> Result<()> {
        let n = self.graph.vertex_count();
        self.degrees = (0..n).map(|_| AtomicI32::new(0)).collect();
        self.deleted = (0..n).map(|_| AtomicBool::new(false)).collect();
        self.to_be_deleted = (0..n).map(|_| AtomicBool::new(false)).collect();
        self.core_numbers = (0..n).map(|_| AtomicU32::new(0)).collect();
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        for (v, cell) in self.degrees.iter().enumerate() {
            let degree = self.graph.out_degree(VertexId(v as u32)) as i32;
            cell.store(degree, Ordering::Relaxed);
            // zero-degree vertices are never reached by peeling; they start
            // out removed with core number 0
            self.deleted[v].store(degree == 0, Ordering::Relaxed);
        }
        for cell in &self.to_be_deleted {
            cell.store(false, Ordering::Relaxed);
        }
        for cell in &self.core_numbers {
            cell.store(0, Ordering::Relaxed);
        }
        Ok(())
    }
}

/// Peeling enactor: drains one degree threshold per step.
pub struct KCoreEnactor {
    problem: KCoreProblem,
    state: EnactorState,
}

impl KCoreEnactor {
    /// Create an enactor over an initialized problem.
    pub fn new(problem: KCoreProblem) -> Self {
        Self {
            problem,
            state: EnactorState::new(),
        }
    }

    /// The problem, for reading results after [`Enactor::enact`].
    pub fn problem(&self) -> &KCoreProblem {
        &self.problem
    }

    /// Recover the problem, e.g. to `reset` and re-run.
    pub fn into_problem(self) -> KCoreProblem {
        self.problem
    }
}

impl Enactor for KCoreEnactor {
    fn state_mut(&mut self) -> &mut EnactorState {
        &mut self.state
    }

    fn prepare_frontier(&mut self) -> Result<()> {
        self.state
            .frontier
            .sequence(VertexId(0), self.problem.graph.vertex_count());
        Ok(())
    }

    fn step(&mut self) -> Result<()> {
        let Self { problem, state } = self;
        let graph = problem.graph.as_ref();
        let k = state.iteration as i32 + 1;

        let degrees = &problem.degrees;
        let deleted = &problem.deleted;
        let to_be_deleted = &problem.to_be_deleted;
        let core_numbers = &problem.core_numbers;
        let config = AdvanceConfig::new();

        // Cascade removals at this threshold until the frontier drains.
        while !state.frontier.is_empty() {
            // Mark vertices with degree <= k for removal and activate their
            // surviving neighbors.
            advance(graph, &mut state.frontier, &config, |src, dst, _edge, _w| {
                let s = src.index();
                if deleted[s].load(Ordering::Relaxed) {
                    return false;
                }
                if degrees[s].load(Ordering::Relaxed) > k {
                    return false;
                }
                core_numbers[s].store(k as u32, Ordering::Relaxed);
                to_be_deleted[s].store(true, Ordering::Relaxed);
                !deleted[dst.index()].load(Ordering::Relaxed)
            })?;

            // Fold this round's marks into the removed set.
            deleted
                .par_iter()
                .zip(to_be_deleted.par_iter())
                .for_each(|(removed, marked)| {
                    if marked.load(Ordering::Relaxed) {
                        removed.store(true, Ordering::Relaxed);
                    }
                });

            // One degree decrement per activation; keep exactly the vertices
            // whose degree just crossed the threshold.
            filter(&mut state.frontier, |v: VertexId| {
                let i = v.index();
                if deleted[i].load(Ordering::Relaxed) {
                    return false;
                }
                let old_degree = degrees[i].fetch_add(-1, Ordering::Relaxed);
                old_degree == k + 1
            });
        }

        Ok(())
    }

    fn is_converged(&mut self) -> bool {
        let Self { problem, state } = self;

        let all_removed = problem
            .deleted
            .iter()
            .all(|d| d.load(Ordering::Relaxed));
        if all_removed {
            info!(degeneracy = state.iteration, "k-core peeling complete");
        }

        // The next step depends on entering with every vertex active, so
        // the frontier is reseeded on every check, converged or not.
        state
            .frontier
            .sequence(VertexId(0), problem.graph.vertex_count());

        all_removed
    }
}

/// Decompose `graph` into k-cores.
///
/// Fills `core_numbers` (length `|V|`) with each vertex's core number in
/// place and returns the elapsed execution time in milliseconds.
pub fn run(graph: Arc<CsrGraph>, core_numbers: &mut [u32]) -> Result<f32> {
    let n = graph.vertex_count();
    if core_numbers.len() != n {
        return Err(EngineError::BufferLengthMismatch {
            expected: n,
            actual: core_numbers.len(),
        });
    }

    let mut problem = KCoreProblem::new(graph);
    problem.init()?;
    problem.reset()?;

    let mut enactor = KCoreEnactor::new(problem);
    let elapsed = enactor.enact()?;
    enactor.problem().write_results(core_numbers);

    Ok(elapsed.as_secs_f32() * 1_000.0)
}
