//! Median/tolerance periodicity scoring over occupied-bin sets.
//!
//! A beaconing entity touches time bins at a roughly fixed spacing. The
//! score sorts the gaps between consecutive occupied bins, takes the
//! median gap as representative, and counts how many gaps fall inside a
//! tolerance window around that median.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Per-entity periodicity score.
///
/// `total` is the number of inter-bin gaps; `matched` is how many of
/// them sit inside the tolerance window around the median gap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapScore {
    /// Gaps inside the tolerance window.
    pub matched: u64,
    /// Total gap count.
    pub total: u64,
}

impl GapScore {
    /// Matched fraction, `0.0` when there are no gaps.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }
}

/// Ascending-sorted gaps between consecutive occupied bins.
///
/// A set of N bins yields exactly N-1 gaps; 0 or 1 bins yield none.
/// Bins iterate in ascending order, so every gap is at least 1.
pub fn sorted_gaps(bins: &BTreeSet<i64>) -> Vec<i64> {
    let mut gaps: Vec<i64> = bins
        .iter()
        .zip(bins.iter().skip(1))
        .map(|(a, b)| b - a)
        .collect();
    gaps.sort_unstable();
    gaps
}

/// Median gap under the upper-middle selection rule.
///
/// For an even-length gap table this picks the element at index
/// `len / 2`, not the average of the two middle elements. The
/// asymmetry is part of the score's contract.
pub fn median_gap(sorted: &[i64]) -> i64 {
    if sorted.is_empty() {
        0
    } else {
        sorted[sorted.len() / 2]
    }
}

/// Score the regularity of an occupied-bin set.
///
/// The tolerance window is `[median - tolerance * median,
/// median + tolerance * median]`, inclusive on both ends. With no gaps
/// the median is 0 and the score is `(0, 0)`.
pub fn score(bins: &BTreeSet<i64>, tolerance: f64) -> GapScore {
    let gaps = sorted_gaps(bins);
    let median = median_gap(&gaps) as f64;
    let lo = median - tolerance * median;
    let hi = median + tolerance * median;

    let matched = gaps
        .iter()
        .filter(|&&gap| {
            let gap = gap as f64;
            gap >= lo && gap <= hi
        })
        .count() as u64;

    GapScore {
        matched,
        total: gaps.len() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bin_set(bins: &[i64]) -> BTreeSet<i64> {
        bins.iter().copied().collect()
    }

    #[test]
    fn regular_beacon_fully_matches() {
        // Timestamps 0,10,20,30 at precision 5 -> bins {0,2,4,6}.
        let bins = bin_set(&[0, 2, 4, 6]);
        let result = score(&bins, 0.05);
        assert_eq!(result, GapScore { matched: 3, total: 3 });
        assert_eq!(result.ratio(), 1.0);
    }

    #[test]
    fn empty_and_singleton_sets_have_no_gaps() {
        assert_eq!(score(&bin_set(&[]), 0.05), GapScore { matched: 0, total: 0 });
        assert_eq!(score(&bin_set(&[42]), 0.05), GapScore { matched: 0, total: 0 });
        assert_eq!(score(&bin_set(&[]), 0.05).ratio(), 0.0);
    }

    #[test]
    fn median_uses_upper_middle_for_even_length() {
        // Sorted gaps [1, 2, 100]: index 3/2 = 1 -> median 2.
        assert_eq!(median_gap(&[1, 2, 100]), 2);
        // Even length picks the upper of the two middle elements.
        assert_eq!(median_gap(&[1, 2, 3, 100]), 3);
        assert_eq!(median_gap(&[]), 0);
    }

    #[test]
    fn irregular_gaps_fall_outside_window() {
        // Bins {0, 1, 3, 103}: gaps [1, 2, 100], median 2,
        // window [1.9, 2.1] at tolerance 0.05 -> only the 2 matches.
        let bins = bin_set(&[0, 1, 3, 103]);
        assert_eq!(score(&bins, 0.05), GapScore { matched: 1, total: 3 });
    }

    #[test]
    fn window_bounds_are_inclusive() {
        // Gaps [9, 10, 11], median 10, tolerance 0.1 -> window [9.0, 11.0].
        let bins = bin_set(&[0, 9, 19, 30]);
        assert_eq!(score(&bins, 0.1), GapScore { matched: 3, total: 3 });
    }

    #[test]
    fn zero_tolerance_matches_exact_gaps_only() {
        let bins = bin_set(&[0, 2, 4, 7]);
        // Gaps [2, 2, 3], median 2, window [2.0, 2.0].
        assert_eq!(score(&bins, 0.0), GapScore { matched: 2, total: 3 });
    }

    #[test]
    fn sorted_gaps_counts_and_order() {
        let bins = bin_set(&[5, 1, 12]);
        assert_eq!(sorted_gaps(&bins), vec![4, 7]);
        assert!(sorted_gaps(&bin_set(&[9])).is_empty());
    }

    proptest! {
        #[test]
        fn two_bin_sets_always_fully_match(
            a in -1_000_000i64..1_000_000,
            offset in 1i64..1_000_000,
            tolerance in 0.0..10.0f64,
        ) {
            // A single gap equals its own median, and the window always
            // contains the median itself.
            let bins = bin_set(&[a, a + offset]);
            prop_assert_eq!(score(&bins, tolerance), GapScore { matched: 1, total: 1 });
        }

        #[test]
        fn repeated_insertion_is_idempotent(
            bins in proptest::collection::vec(-1_000i64..1_000, 0..50),
        ) {
            let once: BTreeSet<i64> = bins.iter().copied().collect();
            let mut twice = once.clone();
            for bin in &bins {
                twice.insert(*bin);
            }
            prop_assert_eq!(once.len(), twice.len());
            prop_assert_eq!(score(&once, 0.05), score(&twice, 0.05));
        }

        #[test]
        fn total_is_gap_count(
            bins in proptest::collection::btree_set(-10_000i64..10_000, 0..100),
            tolerance in 0.0..1.0f64,
        ) {
            let result = score(&bins, tolerance);
            prop_assert_eq!(result.total, bins.len().saturating_sub(1) as u64);
            prop_assert!(result.matched <= result.total);
        }
    }
}
