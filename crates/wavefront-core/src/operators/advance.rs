//! The advance operator: frontier expansion along incident edges.
//!
//! For every element of the input frontier, advance enumerates its incident
//! edges and invokes the user callback once per (element, edge) pair. The
//! callback's boolean return decides whether the pair's far endpoint (or
//! edge) joins the output frontier, so advance doubles as a data transform
//! and a frontier-construction primitive.
//!
//! Invocations race; see the [contract](crate::operators) for the atomicity
//! obligations. An element with no incident edges contributes no
//! invocations and silently drops — that is "no expansion", not an error.

use rayon::prelude::*;
use tracing::trace;

use crate::frontier::Frontier;
use crate::graph::CsrGraph;
use crate::ids::{EdgeId, VertexId};
use crate::operators::load_balance::{
    available_lanes, find_segment, lane_span, work_offsets, LoadBalance,
};
use crate::{EngineError, Result};

/// Which incident edges of a frontier element to traverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdvanceDirection {
    /// Out-edges.
    #[default]
    Forward,
    /// In-edges; requires the graph's reverse mirror.
    Reverse,
}

/// Advance configuration.
#[derive(Debug, Clone)]
pub struct AdvanceConfig {
    /// Traversal direction.
    pub direction: AdvanceDirection,
    /// Lane distribution strategy.
    pub load_balance: LoadBalance,
    /// Override the number of parallel lanes (defaults to the pool size).
    /// Purely a scheduling knob — results never depend on it.
    pub lanes: Option<usize>,
    /// When false, callbacks still run but no output frontier is produced
    /// and the input frontier is left untouched.
    pub output: bool,
}

impl AdvanceConfig {
    /// Create a new advance configuration.
    pub fn new() -> Self {
        Self {
            direction: AdvanceDirection::Forward,
            load_balance: LoadBalance::MergePath,
            lanes: None,
            output: true,
        }
    }

    /// Set the traversal direction.
    pub fn with_direction(mut self, direction: AdvanceDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the load-balancing strategy.
    pub fn with_load_balance(mut self, load_balance: LoadBalance) -> Self {
        self.load_balance = load_balance;
        self
    }

    /// Set the lane count.
    pub fn with_lanes(mut self, lanes: usize) -> Self {
        self.lanes = Some(lanes);
        self
    }

    /// Enable or disable output-frontier construction.
    pub fn with_output(mut self, output: bool) -> Self {
        self.output = output;
        self
    }

    fn effective_lanes(&self, work: usize) -> usize {
        self.lanes.unwrap_or_else(available_lanes).max(1).min(work)
    }
}

impl Default for AdvanceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Vertex-to-vertex advance.
///
/// Invokes `op(src, neighbor, edge, weight)` once per (frontier element,
/// incident edge) pair and replaces the frontier with the neighbors for
/// which `op` returned true (unless output is disabled). The callback runs
/// in parallel with no ordering or exclusivity guarantees.
pub fn advance<F>(
    graph: &CsrGraph,
    frontier: &mut Frontier<VertexId>,
    config: &AdvanceConfig,
    op: F,
) -> Result<()>
where
    F: Fn(VertexId, VertexId, EdgeId, f32) -> bool + Sync,
{
    let out = execute(graph, frontier.as_slice(), config, &op, &|neighbor, _edge| neighbor)?;
    trace!(input = frontier.len(), output = out.len(), "advance");
    if config.output {
        frontier.replace(out);
    }
    Ok(())
}

/// Vertex-to-edge advance.
///
/// As [`advance`], but the output frontier holds the ids of the edges whose
/// callback returned true. The input frontier is not modified.
pub fn advance_to_edges<F>(
    graph: &CsrGraph,
    frontier: &Frontier<VertexId>,
    config: &AdvanceConfig,
    op: F,
) -> Result<Frontier<EdgeId>>
where
    F: Fn(VertexId, VertexId, EdgeId, f32) -> bool + Sync,
{
    let out = execute(graph, frontier.as_slice(), config, &op, &|_neighbor, edge| edge)?;
    trace!(input = frontier.len(), output = out.len(), "advance_to_edges");
    let mut edges = Frontier::new();
    edges.replace(out);
    Ok(edges)
}

/// Shared engine: visit every (element, incident-edge) pair of `input`,
/// invoke `op`, and collect `emit(..)` for accepted pairs.
fn execute<T, F, E>(
    graph: &CsrGraph,
    input: &[VertexId],
    config: &AdvanceConfig,
    op: &F,
    emit: &E,
) -> Result<Vec<T>>
where
    T: Copy + Send,
    F: Fn(VertexId, VertexId, EdgeId, f32) -> bool + Sync,
    E: Fn(VertexId, EdgeId) -> T + Sync,
{
    if config.direction == AdvanceDirection::Reverse && !graph.has_reverse() {
        return Err(EngineError::ReverseUnavailable);
    }
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let degree_of = |v: VertexId| match config.direction {
        AdvanceDirection::Forward => graph.out_degree(v),
        AdvanceDirection::Reverse => graph.in_degree(v).unwrap_or(0),
    };
    let entry_of = |v: VertexId, i: usize| match config.direction {
        AdvanceDirection::Forward => graph.out_entry(v, i),
        AdvanceDirection::Reverse => graph.in_entry(v, i),
    };
    let collect = config.output;

    let lane_outputs: Vec<Vec<T>> = match config.load_balance {
        LoadBalance::MergePath => {
            let offsets = work_offsets(input.iter().map(|&v| degree_of(v)), input.len());
            let total = offsets[input.len()];
            if total == 0 {
                return Ok(Vec::new());
            }
            let lanes = config.effective_lanes(total);

            (0..lanes)
                .into_par_iter()
                .map(|lane| {
                    let span = lane_span(total, lanes, lane);
                    let mut kept = Vec::new();
                    if span.is_empty() {
                        return kept;
                    }
                    let mut element = find_segment(&offsets, span.start);
                    for work in span {
                        while offsets[element + 1] <= work {
                            element += 1;
                        }
                        let src = input[element];
                        let (neighbor, edge, weight) = entry_of(src, work - offsets[element]);
                        if op(src, neighbor, edge, weight) && collect {
                            kept.push(emit(neighbor, edge));
                        }
                    }
                    kept
                })
                .collect()
        }
        LoadBalance::ElementMapped => {
            let lanes = config.effective_lanes(input.len());
            let chunk = input.len().div_ceil(lanes);

            input
                .par_chunks(chunk)
                .map(|elements| {
                    let mut kept = Vec::new();
                    for &src in elements {
                        for i in 0..degree_of(src) {
                            let (neighbor, edge, weight) = entry_of(src, i);
                            if op(src, neighbor, edge, weight) && collect {
                                kept.push(emit(neighbor, edge));
                            }
                        }
                    }
                    kept
                })
                .collect()
        }
    };

    Ok(lane_outputs.concat())
}
