//! # Wavefront
//!
//! Frontier-driven bulk-synchronous graph processing.
//!
//! Wavefront executes graph algorithms as a BSP loop over a dynamic
//! **frontier** of active vertices or edges. Algorithm authors attach two
//! operators to the loop — **advance** (traverse incident edges, mutate
//! shared state through atomics, decide what becomes active next) and
//! **filter** (prune the frontier by a predicate) — and override a handful
//! of lifecycle hooks (`init`, `reset`, `prepare_frontier`, `step`,
//! `is_converged`). Everything else — edge enumeration, load balancing
//! across parallel lanes, frontier double-buffering, the convergence
//! drive — is the engine's job.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use wavefront::prelude::*;
//!
//! // Undirected triangle with a tail: 0-1-2 form the 2-core, 3 peels first.
//! let graph = Arc::new(
//!     CsrGraphBuilder::new(4)
//!         .with_undirected_edges(&[(0, 1), (1, 2), (2, 0), (2, 3)])
//!         .build(),
//! );
//!
//! let mut core_numbers = vec![0u32; 4];
//! wavefront::kcore::run(graph, &mut core_numbers)?;
//! assert_eq!(core_numbers, vec![2, 2, 2, 1]);
//! # Ok::<(), wavefront::EngineError>(())
//! ```
//!
//! ## Crates
//!
//! - [`wavefront_core`]: Frontier, CSR graph, operators, Problem/Enactor
//!   contracts
//! - [`wavefront_algo`]: the worked algorithms ([`kcore`], [`bc`])

pub use wavefront_algo::{bc, kcore};
pub use wavefront_core::{
    advance, advance_to_edges, filter, AdvanceConfig, AdvanceDirection, AtomicF32, CsrGraph,
    CsrGraphBuilder, EdgeId, ElementId, Enactor, EnactorState, EngineError, Frontier, LoadBalance,
    Problem, Result, VertexId,
};

/// Convenient imports for algorithm authors.
pub mod prelude {
    pub use wavefront_algo::{BcEnactor, BcProblem, KCoreEnactor, KCoreProblem};
    pub use wavefront_core::{
        advance, advance_to_edges, filter, AdvanceConfig, AdvanceDirection, AtomicF32, CsrGraph,
        CsrGraphBuilder, EdgeId, ElementId, Enactor, EnactorState, EngineError, Frontier,
        LoadBalance, Problem, Result, VertexId,
    };
}
