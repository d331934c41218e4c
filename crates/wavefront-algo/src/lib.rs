//! Worked algorithms for the wavefront BSP engine.
//!
//! Each algorithm supplies a `Problem` (its per-vertex state and its
//! `init`/`reset` lifecycle) and an `Enactor` (its loop body, convergence
//! test, and phase flags), built purely from the core operators, plus a
//! `run` entry point that fills caller-owned result buffers and returns
//! the elapsed execution time:
//!
//! - [`kcore`]: vertex k-core decomposition by iterative degree peeling
//! - [`bc`]: single-source betweenness centrality, a two-phase
//!   forward/backward BSP traversal
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use wavefront_core::CsrGraphBuilder;
//!
//! // Triangle: every vertex sits in the 2-core.
//! let graph = Arc::new(
//!     CsrGraphBuilder::new(3)
//!         .with_undirected_edges(&[(0, 1), (1, 2), (2, 0)])
//!         .build(),
//! );
//! let mut core_numbers = vec![0u32; 3];
//! wavefront_algo::kcore::run(graph, &mut core_numbers).unwrap();
//! assert_eq!(core_numbers, vec![2, 2, 2]);
//! ```

pub mod bc;
pub mod kcore;

pub use bc::{BcEnactor, BcProblem};
pub use kcore::{KCoreEnactor, KCoreProblem};
