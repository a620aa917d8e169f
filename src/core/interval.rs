//! Interval primitive and bin predicates
//!
//! Coordinates are inclusive on both ends. Two point-in-bin rules exist and
//! are kept apart on purpose: anchoring uses the inclusive rule, distal
//! connectivity uses the strict rule. Features touching a bin boundary match
//! under one and not the other.

use crate::core::error::IntervalError;

/// Genomic range `[start, stop]` with `start <= stop`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    pub start: u64,
    pub stop: u64,
}

impl Interval {
    /// Create an interval, rejecting `start > stop`
    ///
    /// # Examples
    /// ```
    /// use loop_anchor::core::Interval;
    ///
    /// assert!(Interval::try_new(100, 200).is_ok());
    /// assert!(Interval::try_new(100, 100).is_ok());
    /// assert!(Interval::try_new(200, 100).is_err());
    /// ```
    pub fn try_new(start: u64, stop: u64) -> Result<Self, IntervalError> {
        if start > stop {
            return Err(IntervalError::StartAfterStop { start, stop });
        }
        Ok(Self { start, stop })
    }

    /// Create an interval from coordinates already known to be ordered
    #[inline]
    pub const fn new(start: u64, stop: u64) -> Self {
        debug_assert!(start <= stop);
        Self { start, stop }
    }

    /// Test this interval against a contact bin under the given rule
    #[inline]
    pub fn overlaps_bin(&self, bin: &Interval, rule: BinRule) -> bool {
        overlaps(self.start, self.stop, bin, rule)
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.stop)
    }
}

/// Which point-in-bin test a composite overlap uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinRule {
    /// `start <= value <= stop` (loop anchoring)
    #[default]
    Inclusive,
    /// `start < value < stop` (distal connectivity)
    Strict,
}

impl BinRule {
    /// Dispatch to the matching point-in-bin predicate
    #[inline]
    pub fn point_in_bin(self, value: u64, bin: &Interval) -> bool {
        match self {
            BinRule::Inclusive => point_in_bin_inclusive(value, bin),
            BinRule::Strict => point_in_bin_strict(value, bin),
        }
    }
}

/// Inclusive point test
///
/// # Examples
/// ```
/// use loop_anchor::core::{Interval, point_in_bin_inclusive};
///
/// let bin = Interval::new(100, 200);
/// assert!(point_in_bin_inclusive(100, &bin));
/// assert!(point_in_bin_inclusive(200, &bin));
/// assert!(!point_in_bin_inclusive(201, &bin));
/// ```
#[inline]
pub fn point_in_bin_inclusive(value: u64, bin: &Interval) -> bool {
    value >= bin.start && value <= bin.stop
}

/// Strict point test, boundaries excluded
///
/// # Examples
/// ```
/// use loop_anchor::core::{Interval, point_in_bin_strict};
///
/// let bin = Interval::new(100, 200);
/// assert!(!point_in_bin_strict(100, &bin));
/// assert!(point_in_bin_strict(150, &bin));
/// assert!(!point_in_bin_strict(200, &bin));
/// ```
#[inline]
pub fn point_in_bin_strict(value: u64, bin: &Interval) -> bool {
    value > bin.start && value < bin.stop
}

/// True iff `[start, stop]` envelops the whole bin
#[inline]
pub fn contains(start: u64, stop: u64, bin: &Interval) -> bool {
    start <= bin.start && stop >= bin.stop
}

/// Composite overlap: either endpoint lands in the bin, or the range envelops it
///
/// A bin that strictly contains `[start, stop]` is caught by the endpoint
/// checks, so no fourth branch is needed.
///
/// # Examples
/// ```
/// use loop_anchor::core::{overlaps, BinRule, Interval};
///
/// let bin = Interval::new(100, 200);
/// assert!(overlaps(50, 250, &bin, BinRule::Inclusive));
/// assert!(overlaps(50, 250, &bin, BinRule::Strict));
/// assert!(!overlaps(10, 20, &bin, BinRule::Inclusive));
/// assert!(overlaps(50, 100, &bin, BinRule::Inclusive));
/// assert!(!overlaps(50, 100, &bin, BinRule::Strict));
/// ```
#[inline]
pub fn overlaps(start: u64, stop: u64, bin: &Interval, rule: BinRule) -> bool {
    rule.point_in_bin(start, bin) || rule.point_in_bin(stop, bin) || contains(start, stop, bin)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIN: Interval = Interval::new(100, 200);

    #[test]
    fn test_try_new() {
        assert_eq!(Interval::try_new(5, 10), Ok(Interval { start: 5, stop: 10 }));
        assert_eq!(
            Interval::try_new(10, 5),
            Err(IntervalError::StartAfterStop { start: 10, stop: 5 })
        );
    }

    #[test]
    fn test_boundary_inclusive_vs_strict() {
        assert!(point_in_bin_inclusive(100, &BIN));
        assert!(point_in_bin_inclusive(200, &BIN));
        assert!(!point_in_bin_strict(100, &BIN));
        assert!(!point_in_bin_strict(200, &BIN));

        assert!(point_in_bin_inclusive(150, &BIN));
        assert!(point_in_bin_strict(150, &BIN));
        assert!(!point_in_bin_inclusive(99, &BIN));
        assert!(!point_in_bin_strict(201, &BIN));
    }

    #[test]
    fn test_rule_dispatch() {
        assert!(BinRule::Inclusive.point_in_bin(100, &BIN));
        assert!(!BinRule::Strict.point_in_bin(100, &BIN));
        assert_eq!(BinRule::default(), BinRule::Inclusive);
    }

    #[test]
    fn test_contains() {
        assert!(contains(50, 250, &BIN));
        assert!(contains(100, 200, &BIN));
        assert!(!contains(101, 250, &BIN));
        assert!(!contains(50, 199, &BIN));
    }

    #[test]
    fn test_overlaps_containment_branch() {
        // Neither endpoint of [50, 250] lies in the bin
        assert!(!point_in_bin_inclusive(50, &BIN));
        assert!(!point_in_bin_inclusive(250, &BIN));
        assert!(overlaps(50, 250, &BIN, BinRule::Inclusive));
        assert!(overlaps(50, 250, &BIN, BinRule::Strict));
    }

    #[test]
    fn test_overlaps_bin_contains_interval() {
        // Reverse direction: the bin envelops the feature, endpoints catch it
        assert!(overlaps(120, 140, &BIN, BinRule::Inclusive));
        assert!(overlaps(120, 140, &BIN, BinRule::Strict));
        assert!(!contains(120, 140, &BIN));
    }

    #[test]
    fn test_overlaps_no_overlap() {
        assert!(!overlaps(10, 20, &BIN, BinRule::Inclusive));
        assert!(!overlaps(10, 20, &BIN, BinRule::Strict));
        assert!(!overlaps(300, 400, &BIN, BinRule::Inclusive));
    }

    #[test]
    fn test_overlaps_touching_boundary() {
        assert!(overlaps(50, 100, &BIN, BinRule::Inclusive));
        assert!(!overlaps(50, 100, &BIN, BinRule::Strict));
        assert!(overlaps(200, 300, &BIN, BinRule::Inclusive));
        assert!(!overlaps(200, 300, &BIN, BinRule::Strict));
        // Identical range still matches strictly via containment
        assert!(overlaps(100, 200, &BIN, BinRule::Strict));
    }

    #[test]
    fn test_overlaps_bin_method() {
        let feature = Interval::new(150, 160);
        assert!(feature.overlaps_bin(&BIN, BinRule::Inclusive));
        assert!(!feature.overlaps_bin(&Interval::new(500, 600), BinRule::Inclusive));
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::new(1, 2).to_string(), "1-2");
    }
}
