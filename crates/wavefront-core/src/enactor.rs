//! The BSP convergence loop driver.
//!
//! An enactor orchestrates one algorithm run: it seeds the frontier, then
//! alternates algorithm-defined steps with a convergence test until the
//! test passes, and reports the elapsed time. Algorithms encode sub-phases
//! (a forward/backward split, a nested drain) inside the same abstract
//! loop via private flags, which makes each concrete enactor a small state
//! machine of its own.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::frontier::Frontier;
use crate::ids::VertexId;
use crate::Result;

/// State shared by every enactor: the iteration counter and the active
/// frontier.
///
/// `iteration` starts at 0 and is incremented once per [`Enactor::step`]
/// by the [`Enactor::enact`] driver — steps that read it directly (to
/// derive a threshold or a phase depth) rely on that convention.
#[derive(Debug, Default)]
pub struct EnactorState {
    /// Completed step count.
    pub iteration: u32,
    /// The active frontier; operator calls replace its contents, so it is
    /// logically double-buffered across a step.
    pub frontier: Frontier<VertexId>,
}

impl EnactorState {
    /// Fresh state: iteration 0, empty frontier.
    pub fn new() -> Self {
        Self {
            iteration: 0,
            frontier: Frontier::new(),
        }
    }
}

/// One algorithm run over the BSP loop.
///
/// Implementors supply the three lifecycle hooks; the provided
/// [`Enactor::enact`] driver owns the loop itself. The convergence test
/// runs *before* the first step — phase-transition logic in the shown
/// algorithms depends on that ordering, so custom drivers must keep it.
pub trait Enactor {
    /// Access the shared iteration/frontier state.
    fn state_mut(&mut self) -> &mut EnactorState;

    /// Seed the initial frontier (whole-graph sequence, single source, …).
    fn prepare_frontier(&mut self) -> Result<()>;

    /// One iteration of the algorithm: issue operator calls, possibly
    /// draining the frontier in a nested cycle before returning.
    fn step(&mut self) -> Result<()>;

    /// Convergence test, run before every step. May mutate phase flags and
    /// reseed the frontier as a side effect.
    fn is_converged(&mut self) -> bool;

    /// Drive the run to convergence and return the elapsed time.
    fn enact(&mut self) -> Result<Duration> {
        self.prepare_frontier()?;
        let start = Instant::now();
        while !self.is_converged() {
            {
                let state = self.state_mut();
                debug!(
                    iteration = state.iteration,
                    frontier = state.frontier.len(),
                    "bsp step"
                );
            }
            self.step()?;
            self.state_mut().iteration += 1;
        }
        let elapsed = start.elapsed();
        debug!(
            iterations = self.state_mut().iteration,
            ?elapsed,
            "enact complete"
        );
        Ok(elapsed)
    }
}
