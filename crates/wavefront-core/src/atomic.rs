//! Atomic facade for operator callbacks.
//!
//! Callback invocations within one operator call race freely; any
//! cross-invocation aggregation must go through an atomic add or
//! compare-and-swap. Integer state uses the std atomics directly; this
//! module supplies the float accumulator the std library lacks.
//!
//! All operations are `Relaxed`: the return from an operator call is the
//! BSP barrier, and the fork/join underneath it provides the
//! happens-before edge between steps.

use std::sync::atomic::{AtomicU32, Ordering};

/// An `f32` cell supporting atomic accumulation.
///
/// Implemented over the value's bit pattern in an [`AtomicU32`];
/// `fetch_add` retries with compare-and-swap until the update lands.
#[derive(Debug, Default)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    /// Create a new cell.
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    /// Read the current value.
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Overwrite the current value.
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Atomically add `value`, returning the previous value.
    pub fn fetch_add(&self, value: f32) -> f32 {
        let mut current = self.0.load(Ordering::Relaxed);
        loop {
            let next = (f32::from_bits(current) + value).to_bits();
            match self
                .0
                .compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(previous) => return f32::from_bits(previous),
                Err(actual) => current = actual,
            }
        }
    }
}
