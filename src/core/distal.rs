//! Degree-1 distal connectivity
//!
//! Given loops that already carry an anchor in one contact bin, find targets
//! sitting in the loop's other bin. Targets are tested with the strict bin
//! rule, so a target that only touches a bin boundary is not connected.

use crate::core::aggregate::{MatchRow, ResultAggregator, SortedResults};
use crate::core::index::{CandidateIndex, ChromosomeIndex};
use crate::core::records::{AnchoredLoop, GenomicRecord, LoopRecord};
use crate::core::scan::{scan_chromosomes, MatchOptions, ScanStrategy};
use crate::core::{overlaps, BinRule, Interval};
use log::{debug, info};
use std::collections::HashSet;

/// One of the two contact bins of a loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopBin {
    First,
    Second,
}

impl LoopBin {
    /// The opposite bin
    pub fn other(self) -> Self {
        match self {
            LoopBin::First => LoopBin::Second,
            LoopBin::Second => LoopBin::First,
        }
    }

    /// This bin's interval on the given loop
    pub fn of(self, loop_record: &LoopRecord) -> &Interval {
        match self {
            LoopBin::First => &loop_record.bin1,
            LoopBin::Second => &loop_record.bin2,
        }
    }
}

/// Find which bin holds the anchor
///
/// Bin1 wins when the anchor overlaps both. An anchor that is strictly in
/// neither bin but touches bin2 under the inclusive rule is taken to sit in
/// bin2; the anchoring pass accepts such boundary contacts. `None` when the
/// anchor only touches bin1 or misses both.
///
/// # Examples
/// ```
/// use loop_anchor::core::{locate_anchor, Interval, LoopBin, LoopRecord};
///
/// let lp = LoopRecord::new("chr1", Interval::new(100, 200), Interval::new(500, 600));
/// assert_eq!(locate_anchor(&Interval::new(550, 560), &lp), Some(LoopBin::Second));
/// assert_eq!(locate_anchor(&Interval::new(600, 650), &lp), Some(LoopBin::Second));
/// assert_eq!(locate_anchor(&Interval::new(50, 100), &lp), None);
/// ```
pub fn locate_anchor(anchor: &Interval, loop_record: &LoopRecord) -> Option<LoopBin> {
    if overlaps(anchor.start, anchor.stop, &loop_record.bin1, BinRule::Strict) {
        Some(LoopBin::First)
    } else if overlaps(anchor.start, anchor.stop, &loop_record.bin2, BinRule::Inclusive) {
        Some(LoopBin::Second)
    } else {
        None
    }
}

/// Check that `target` sits in the bin opposite the anchor
///
/// # Examples
/// ```
/// use loop_anchor::core::{is_distally_connected, Interval, LoopRecord};
///
/// let lp = LoopRecord::new("chr1", Interval::new(100, 200), Interval::new(500, 600));
/// let anchor = Interval::new(500, 600);
/// assert!(is_distally_connected(&Interval::new(120, 140), &anchor, &lp));
/// assert!(!is_distally_connected(&Interval::new(520, 540), &anchor, &lp));
/// ```
pub fn is_distally_connected(target: &Interval, anchor: &Interval, loop_record: &LoopRecord) -> bool {
    match locate_anchor(anchor, loop_record) {
        Some(side) => overlaps(target.start, target.stop, side.other().of(loop_record), BinRule::Strict),
        None => false,
    }
}

/// A target connected to an anchor through one loop
///
/// Output row: target `chrom start stop id`, the loop annotations, then the
/// anchor `chrom start stop id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DistalMatch {
    pub target: GenomicRecord,
    pub loop_record: LoopRecord,
    pub anchor: GenomicRecord,
}

impl MatchRow for DistalMatch {
    fn chrom(&self) -> &str {
        &self.loop_record.chrom
    }

    fn sort_key(&self) -> (u64, u64) {
        (self.target.start(), self.target.stop())
    }

    fn fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(8 + self.loop_record.annotations.len());
        fields.extend(self.target.bed4_fields());
        fields.extend(self.loop_record.annotations.iter().cloned());
        fields.extend(self.anchor.bed4_fields());
        fields
    }
}

/// Outcome of a distal connectivity run
#[derive(Debug, Clone, Default)]
pub struct DistalReport {
    pub results: SortedResults<DistalMatch>,
    /// Unique target ids connected to at least one anchor
    pub connected_targets: usize,
    /// Anchored loops whose anchor could not be placed in a bin
    pub unplaced_anchors: usize,
    /// Loops whose two ends named different chromosomes
    pub chrom_mismatches: usize,
    /// Chromosomes not scanned because the run was cancelled
    pub skipped_chroms: usize,
}

/// Connects targets to anchors across the two bins of a loop
#[derive(Debug, Clone, Default)]
pub struct DistalConnectivityMatcher {
    options: MatchOptions,
}

impl DistalConnectivityMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Test every target against every anchored loop on its chromosome
    pub fn run(
        &self,
        anchored_loops: &ChromosomeIndex<AnchoredLoop>,
        targets: &ChromosomeIndex<GenomicRecord>,
    ) -> DistalReport {
        let chroms = anchored_loops.shared_chroms(targets);
        debug!(
            "Connecting {} targets through {} anchored loops on {} shared chromosomes",
            targets.record_count(),
            anchored_loops.record_count(),
            chroms.len()
        );

        let strategy = self.options.strategy;
        let partials = scan_chromosomes(&chroms, &self.options, |chrom| {
            match (anchored_loops.get(chrom), targets.get(chrom)) {
                (Some(chrom_loops), Some(chrom_targets)) => {
                    scan_chrom(chrom_loops, chrom_targets, strategy)
                }
                _ => (ResultAggregator::new(), 0),
            }
        });

        let mut aggregator = ResultAggregator::new();
        let mut unplaced_anchors = 0;
        let mut skipped_chroms = 0;
        for partial in partials {
            match partial {
                Some((rows, unplaced)) => {
                    aggregator.merge(rows);
                    unplaced_anchors += unplaced;
                }
                None => skipped_chroms += 1,
            }
        }

        let results = aggregator.into_sorted();
        let connected_targets = results
            .rows()
            .map(|m| m.target.id.as_str())
            .collect::<HashSet<_>>()
            .len();

        info!(
            "Connected {} targets ({} rows, {} anchors outside both bins)",
            connected_targets,
            results.len(),
            unplaced_anchors
        );

        DistalReport {
            results,
            connected_targets,
            unplaced_anchors,
            chrom_mismatches: anchored_loops.chrom_mismatches(),
            skipped_chroms,
        }
    }
}

/// Scan one chromosome; returns the rows and the number of unplaced anchors
///
/// Emission order is loop order, then target order within the bucket.
fn scan_chrom(
    anchored_loops: &[AnchoredLoop],
    targets: &[GenomicRecord],
    strategy: ScanStrategy,
) -> (ResultAggregator<DistalMatch>, usize) {
    let mut rows = ResultAggregator::new();
    let mut unplaced = 0;

    let candidates = match strategy {
        ScanStrategy::Indexed => Some(CandidateIndex::new(
            targets.iter().enumerate().map(|(pos, t)| (t.interval, pos)),
        )),
        ScanStrategy::Exhaustive => None,
    };

    for anchored in anchored_loops {
        let loop_record = &anchored.loop_record;
        let side = match locate_anchor(&anchored.anchor.interval, loop_record) {
            Some(side) => side,
            None => {
                debug!(
                    "Anchor {} ({}) lies in neither bin of loop {}:{} / {}",
                    anchored.anchor.id,
                    anchored.anchor.interval,
                    loop_record.chrom,
                    loop_record.bin1,
                    loop_record.bin2
                );
                unplaced += 1;
                continue;
            }
        };
        let distal_bin = side.other().of(loop_record);

        let mut emit = |target: &GenomicRecord| {
            if overlaps(target.start(), target.stop(), distal_bin, BinRule::Strict) {
                rows.push(DistalMatch {
                    target: target.clone(),
                    loop_record: loop_record.clone(),
                    anchor: anchored.anchor.clone(),
                });
            }
        };

        match &candidates {
            Some(index) => {
                for pos in index.candidates(distal_bin) {
                    emit(&targets[pos]);
                }
            }
            None => targets.iter().for_each(&mut emit),
        }
    }

    (rows, unplaced)
}
