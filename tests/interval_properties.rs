//! Property-based tests for the bin predicates
//!
//! Checks that the composite overlap test matches closed-range intersection
//! under the inclusive rule, and that the strict rule only ever narrows it.

use loop_anchor::core::{contains, overlaps, point_in_bin_inclusive, point_in_bin_strict, BinRule, Interval};
use proptest::prelude::*;

/// Generate an interval with start <= stop
fn arb_interval() -> impl Strategy<Value = Interval> {
    (0u64..10_000, 0u64..500).prop_map(|(start, len)| Interval::new(start, start + len))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Inclusive overlap is exactly closed-range intersection
    #[test]
    fn prop_inclusive_overlap_is_intersection(a in arb_interval(), bin in arb_interval()) {
        let expected = a.start <= bin.stop && a.stop >= bin.start;
        prop_assert_eq!(
            overlaps(a.start, a.stop, &bin, BinRule::Inclusive),
            expected,
            "[{}] vs bin [{}]", a, bin
        );
    }

    /// Anything the strict rule accepts, the inclusive rule accepts too
    #[test]
    fn prop_strict_implies_inclusive(a in arb_interval(), bin in arb_interval()) {
        if overlaps(a.start, a.stop, &bin, BinRule::Strict) {
            prop_assert!(overlaps(a.start, a.stop, &bin, BinRule::Inclusive));
        }
    }

    #[test]
    fn prop_strict_point_implies_inclusive_point(value in 0u64..11_000, bin in arb_interval()) {
        if point_in_bin_strict(value, &bin) {
            prop_assert!(point_in_bin_inclusive(value, &bin));
        }
    }

    /// An interval enveloping the bin always overlaps it, under either rule
    #[test]
    fn prop_containing_interval_overlaps(bin in arb_interval(), left in 0u64..100, right in 0u64..100) {
        let start = bin.start.saturating_sub(left);
        let stop = bin.stop + right;
        prop_assert!(contains(start, stop, &bin));
        prop_assert!(overlaps(start, stop, &bin, BinRule::Inclusive));
        prop_assert!(overlaps(start, stop, &bin, BinRule::Strict));
    }

    /// A bin enveloping the interval is caught by the endpoint checks
    #[test]
    fn prop_contained_interval_overlaps(bin in arb_interval(), a in 0u64..500, b in 0u64..500) {
        let width = bin.stop - bin.start;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let start = bin.start + lo.min(width);
        let stop = bin.start + hi.min(width);
        prop_assert!(overlaps(start, stop, &bin, BinRule::Inclusive));

        if start > bin.start && stop < bin.stop {
            prop_assert!(overlaps(start, stop, &bin, BinRule::Strict));
        }
    }

    /// Disjoint ranges never overlap
    #[test]
    fn prop_disjoint_never_overlaps(bin in arb_interval(), gap in 1u64..1000, len in 0u64..100) {
        let start = bin.stop + gap;
        prop_assert!(!overlaps(start, start + len, &bin, BinRule::Inclusive));
        prop_assert!(!overlaps(start, start + len, &bin, BinRule::Strict));
    }

    #[test]
    fn prop_try_new_matches_order(start in 0u64..1000, stop in 0u64..1000) {
        prop_assert_eq!(Interval::try_new(start, stop).is_ok(), start <= stop);
    }
}

#[test]
fn test_boundary_examples() {
    let bin = Interval::new(100, 200);
    assert!(point_in_bin_inclusive(100, &bin));
    assert!(!point_in_bin_strict(100, &bin));
    assert!(overlaps(50, 250, &bin, BinRule::Inclusive));
    assert!(!overlaps(10, 20, &bin, BinRule::Inclusive));
}
