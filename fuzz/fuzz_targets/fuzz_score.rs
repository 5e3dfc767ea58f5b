//! Fuzz target for periodicity scoring.
//!
//! Tests that scoring arbitrary bin sets never panics and never reports
//! more matched gaps than there are gaps.

#![no_main]

use std::collections::BTreeSet;

use fb_math::score;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<i64>, f64)| {
    let (bins, tolerance) = input;
    let bins: BTreeSet<i64> = bins.into_iter().collect();
    let result = score(&bins, tolerance);
    assert!(result.matched <= result.total);
    assert_eq!(result.total as usize, bins.len().saturating_sub(1));
});
