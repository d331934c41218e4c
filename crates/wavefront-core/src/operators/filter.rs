//! The filter operator: predicated frontier compaction.
//!
//! Filter replaces the frontier with exactly the elements for which the
//! predicate returned true, in some order consistent with inclusion. The
//! predicate is evaluated **exactly once per input element** — predicates
//! with side effects (an atomic decrement-and-compare, say) rely on that
//! guarantee — and side effects follow the same atomicity rules as advance
//! callbacks.

use rayon::prelude::*;
use tracing::trace;

use crate::frontier::Frontier;
use crate::ids::ElementId;

/// Compact the frontier to the elements satisfying `predicate`.
///
/// Evaluations run in parallel, unordered and non-exclusive; each input
/// element (duplicates included) is tested exactly once.
pub fn filter<T, P>(frontier: &mut Frontier<T>, predicate: P)
where
    T: ElementId,
    P: Fn(T) -> bool + Sync,
{
    let kept: Vec<T> = frontier
        .as_slice()
        .par_iter()
        .copied()
        .filter(|&element| predicate(element))
        .collect();
    trace!(input = frontier.len(), output = kept.len(), "filter");
    frontier.replace(kept);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::VertexId;
    use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

    #[test]
    fn test_keeps_exactly_matching_elements() {
        let mut f = Frontier::new();
        f.sequence(VertexId(0), 10);

        filter(&mut f, |v: VertexId| v.get() % 3 == 0);

        let mut ids: Vec<u32> = f.iter().map(|v| v.get()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_single_evaluation_per_element() {
        let mut f = Frontier::new();
        f.sequence(VertexId(0), 100);
        // a duplicate is its own unit of work
        f.push_back(VertexId(7));

        let calls = AtomicUsize::new(0);
        filter(&mut f, |_| {
            calls.fetch_add(1, Ordering::Relaxed);
            true
        });

        assert_eq!(calls.load(Ordering::Relaxed), 101);
        assert_eq!(f.len(), 101);
    }

    #[test]
    fn test_side_effecting_predicate() {
        // decrement a shared counter per element, keep the element that
        // observed the crossing value
        let counters: Vec<AtomicI32> = (0..4).map(|_| AtomicI32::new(2)).collect();
        let mut f = Frontier::new();
        f.sequence(VertexId(0), 4);

        filter(&mut f, |v: VertexId| {
            counters[v.index()].fetch_add(-1, Ordering::Relaxed) == 2
        });
        assert_eq!(f.len(), 4);
        for c in &counters {
            assert_eq!(c.load(Ordering::Relaxed), 1);
        }

        f.sequence(VertexId(0), 4);
        filter(&mut f, |v: VertexId| {
            counters[v.index()].fetch_add(-1, Ordering::Relaxed) == 2
        });
        assert!(f.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let mut f: Frontier<VertexId> = Frontier::new();
        filter(&mut f, |_| true);
        assert!(f.is_empty());
    }
}
