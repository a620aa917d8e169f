//! Core matching functionality
//!
//! This module contains the interval predicates, the per-chromosome index,
//! both matchers and the result aggregator. Nothing here touches the file
//! system.

mod aggregate;
mod anchor;
mod distal;
mod error;
mod index;
mod interval;
mod records;
mod scan;

pub use aggregate::{MatchRow, ResultAggregator, SortedResults};
pub use anchor::{loop_is_anchored, AnchorMatch, AnchorReport, AnchorTracker, LoopAnchorMatcher};
pub use distal::{
    is_distally_connected, locate_anchor, DistalConnectivityMatcher, DistalMatch, DistalReport,
    LoopBin,
};
pub use error::{IntervalError, LoopAnchorError, ParseError, ParseResult, Result};
pub use index::{canonical_chrom, CandidateIndex, ChromosomeIndex};
pub use interval::{contains, overlaps, point_in_bin_inclusive, point_in_bin_strict, BinRule, Interval};
pub use records::{AnchoredLoop, ChromKeyed, FeatureKey, GenomicRecord, LoopKey, LoopRecord};
pub use scan::{CancelToken, MatchOptions, ScanStrategy};
