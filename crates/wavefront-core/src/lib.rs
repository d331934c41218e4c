//! Core execution contracts for frontier-driven BSP graph processing.
//!
//! This crate provides the algorithm-agnostic building blocks on which
//! graph algorithms are expressed:
//!
//! - **CsrGraph**: read-only adjacency in Compressed Sparse Row form, with
//!   an optional reverse (in-edge) mirror
//! - **Frontier**: the dynamic working set of active vertices or edges
//! - **Advance / Filter**: data-parallel operators driven by user callbacks
//! - **Problem / Enactor**: algorithm state lifecycle and the
//!   bulk-synchronous convergence loop
//!
//! An algorithm supplies a [`Problem`] (its mutable per-vertex state) and an
//! [`Enactor`] (its loop body and convergence test); everything between —
//! edge traversal, load balancing, frontier compaction — is handled by the
//! operators in [`operators`].
//!
//! # Example
//!
//! ```ignore
//! use wavefront_core::{advance, AdvanceConfig, CsrGraph, Frontier, VertexId};
//!
//! let graph = CsrGraph::from_edges(3, &[(0, 1), (1, 2)]);
//! let mut frontier = Frontier::new();
//! frontier.push_back(VertexId(0));
//!
//! // One hop: activate every out-neighbor of the frontier.
//! advance(&graph, &mut frontier, &AdvanceConfig::default(), |_src, _dst, _edge, _w| true)?;
//! assert_eq!(frontier.as_slice(), &[VertexId(1)]);
//! ```

pub mod atomic;
pub mod enactor;
pub mod frontier;
pub mod graph;
pub mod ids;
pub mod operators;
pub mod problem;

pub use atomic::AtomicF32;
pub use enactor::{Enactor, EnactorState};
pub use frontier::Frontier;
pub use graph::{CsrGraph, CsrGraphBuilder};
pub use ids::{ElementId, EdgeId, VertexId};
pub use operators::advance::{advance, advance_to_edges, AdvanceConfig, AdvanceDirection};
pub use operators::filter::filter;
pub use operators::load_balance::LoadBalance;
pub use problem::Problem;

/// Engine error types.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Algorithm parameter rejected before entering the loop.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Caller-owned output buffer has the wrong length.
    #[error("Output buffer length mismatch: expected {expected}, got {actual}")]
    BufferLengthMismatch { expected: usize, actual: usize },

    /// Malformed CSR structure.
    #[error("Invalid CSR structure: {0}")]
    InvalidCsr(String),

    /// Reverse-direction advance on a graph built without its in-edge mirror.
    #[error("Reverse adjacency not built; construct the graph with with_reverse(true)")]
    ReverseUnavailable,
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
