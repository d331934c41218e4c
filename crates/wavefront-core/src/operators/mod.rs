//! Data-parallel operators over the frontier.
//!
//! Both operators share the bulk-synchronous execution contract:
//!
//! - callback invocations within one call execute in parallel with **no
//!   ordering guarantee** and **no mutual exclusion** — two invocations may
//!   touch the same shared cell concurrently;
//! - any racing read-modify-write on shared state must use an atomic add or
//!   compare-and-swap (see [`crate::atomic`]); non-atomic read-modify-write
//!   is a correctness bug, not a performance concern;
//! - the *return* from an operator call is the barrier: every effect of
//!   call N is visible before call N+1 begins;
//! - reads of state not yet updated in the current step are legal and
//!   expected.
//!
//! [`advance`](advance::advance) expands an input frontier along incident
//! edges into an output frontier; [`filter`](filter::filter) compacts a
//! frontier by a predicate.

pub mod advance;
pub mod filter;
pub mod load_balance;

pub use advance::{advance, advance_to_edges, AdvanceConfig, AdvanceDirection};
pub use filter::filter;
pub use load_balance::LoadBalance;
