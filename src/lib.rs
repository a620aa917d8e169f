//! LoopAnchor - chromatin loop anchoring and degree-1 distal connectivity
//!
//! Matches genomic features against HiChIP / Hi-C loop calls.
//!
//! # Features
//!
//! - Anchoring: loops with a feature in at least one contact bin
//! - Degree-1 connectivity: targets in the bin opposite an anchored element
//! - Per-chromosome parallel scans with rayon
//! - Deterministic, deduplicated, chromosome-then-position ordered output
//! - Transparent gzip / bzip2 input
//!
//! # Example
//!
//! ```ignore
//! use loop_anchor::{ChromosomeIndex, LoopAnchorMatcher, MatchOptions};
//! use loop_anchor::formats::{read_features, read_loops, write_results_file};
//!
//! let loops = ChromosomeIndex::build(read_loops("loops.txt")?);
//! let features = ChromosomeIndex::build(read_features("peaks.bed")?);
//!
//! let matcher = LoopAnchorMatcher::with_options(MatchOptions::default().with_threads(4));
//! let report = matcher.run(&features, &loops);
//! write_results_file(&report.results, "anchored.txt")?;
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use core::{
    AnchorMatch, AnchorReport, AnchoredLoop, BinRule, CancelToken, ChromosomeIndex,
    DistalConnectivityMatcher, DistalMatch, DistalReport, GenomicRecord, Interval,
    LoopAnchorError, LoopAnchorMatcher, LoopRecord, MatchOptions, MatchRow, ParseError,
    ScanStrategy, SortedResults,
};
