//! Algorithm state lifecycle.
//!
//! A problem owns every piece of algorithm-specific mutable state — the
//! per-vertex and per-edge arrays, the parameters, and the staging copies
//! of the caller-visible results — decoupled from traversal mechanics.
//! Operator callbacks borrow views into that state for the duration of a
//! single operator call and never retain them.

use crate::Result;

/// Two-phase lifecycle of algorithm-owned state.
///
/// Array sizes are a function of the bound graph only: [`Problem::init`]
/// allocates once, and [`Problem::reset`] re-populates values so the same
/// problem can be re-run (with different parameters) without reallocating.
pub trait Problem {
    /// Allocate all state arrays, sized from the bound graph.
    ///
    /// Called exactly once per run, before any `reset`. Allocation failure
    /// is fatal and propagated — the algorithm cannot proceed without its
    /// working memory.
    fn init(&mut self) -> Result<()>;

    /// Restore arrays to the algorithm's initial values.
    ///
    /// Callable multiple times; idempotent, and never dependent on the
    /// results of a prior run.
    fn reset(&mut self) -> Result<()>;
}
