//! Work distribution across parallel lanes.
//!
//! Frontier elements have wildly uneven degrees; mapping whole elements to
//! lanes lets one hub vertex serialize a step. The merge-path strategy
//! instead partitions the *flat* (element, edge) work space: the degree
//! prefix sum is merged against an even split of the lane index space, so
//! every lane receives at most `ceil(total / lanes)` callback invocations
//! regardless of skew.
//!
//! Either strategy visits the identical (element, edge) pair set; only the
//! grouping onto lanes differs, and results never depend on it.

use std::ops::Range;

/// Strategy for distributing advance work across lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadBalance {
    /// Partition the flat work space evenly; lanes may start and end in the
    /// middle of an element's edge list.
    #[default]
    MergePath,
    /// Map whole elements to lanes; simple, but skew-sensitive.
    ElementMapped,
}

/// Number of parallel lanes available to an operator call.
pub(crate) fn available_lanes() -> usize {
    rayon::current_num_threads().max(1)
}

/// The slice of the flat work space `[0, total)` owned by `lane`.
pub(crate) fn lane_span(total: usize, lanes: usize, lane: usize) -> Range<usize> {
    (lane * total / lanes)..((lane + 1) * total / lanes)
}

/// Exclusive prefix sum of per-element work; `offsets.len() == n + 1` and
/// `offsets[n]` is the total.
pub(crate) fn work_offsets(degrees: impl Iterator<Item = usize>, n: usize) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(n + 1);
    let mut total = 0usize;
    offsets.push(0);
    for d in degrees {
        total += d;
        offsets.push(total);
    }
    offsets
}

/// Index of the element owning flat work item `work`: the unique `i` with
/// `offsets[i] <= work < offsets[i + 1]`. Zero-degree elements own no work
/// items and are skipped over.
pub(crate) fn find_segment(offsets: &[usize], work: usize) -> usize {
    debug_assert!(work < *offsets.last().expect("offsets never empty"));
    offsets.partition_point(|&o| o <= work) - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lane_spans_cover_exactly() {
        for total in [0usize, 1, 7, 64, 1000] {
            for lanes in [1usize, 2, 3, 8] {
                let mut covered = 0;
                let mut expected_start = 0;
                for lane in 0..lanes {
                    let span = lane_span(total, lanes, lane);
                    assert_eq!(span.start, expected_start);
                    expected_start = span.end;
                    covered += span.len();
                }
                assert_eq!(covered, total);
                assert_eq!(expected_start, total);
            }
        }
    }

    #[test]
    fn test_lane_spans_are_balanced() {
        let total = 1003;
        let lanes = 8;
        let cap = total / lanes + 1;
        for lane in 0..lanes {
            assert!(lane_span(total, lanes, lane).len() <= cap);
        }
    }

    #[test]
    fn test_work_offsets() {
        let offsets = work_offsets([3, 0, 2].into_iter(), 3);
        assert_eq!(offsets, vec![0, 3, 3, 5]);
    }

    #[test]
    fn test_find_segment_skips_zero_degree() {
        let offsets = vec![0, 3, 3, 5];
        assert_eq!(find_segment(&offsets, 0), 0);
        assert_eq!(find_segment(&offsets, 2), 0);
        // element 1 has no work; items 3 and 4 belong to element 2
        assert_eq!(find_segment(&offsets, 3), 2);
        assert_eq!(find_segment(&offsets, 4), 2);
    }

    #[test]
    fn test_find_segment_leading_zero_degree() {
        let offsets = vec![0, 0, 0, 4];
        for w in 0..4 {
            assert_eq!(find_segment(&offsets, w), 2);
        }
    }

    proptest! {
        /// Lane spans plus segment search visit every (element, edge) pair
        /// exactly once, for any degree distribution and lane count.
        #[test]
        fn prop_partition_visits_each_pair_once(
            degrees in prop::collection::vec(0usize..20, 1..50),
            lanes in 1usize..9,
        ) {
            let n = degrees.len();
            let offsets = work_offsets(degrees.iter().copied(), n);
            let total = offsets[n];

            let mut visits = vec![0usize; total];
            for lane in 0..lanes {
                let span = lane_span(total, lanes, lane);
                if span.is_empty() {
                    continue;
                }
                let mut element = find_segment(&offsets, span.start);
                for work in span {
                    while offsets[element + 1] <= work {
                        element += 1;
                    }
                    // the pair is (element, work - offsets[element])
                    prop_assert!(work - offsets[element] < degrees[element]);
                    visits[work] += 1;
                }
            }
            prop_assert!(visits.iter().all(|&v| v == 1));
        }
    }
}
