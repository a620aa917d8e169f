//! Loop anchoring
//!
//! A loop is anchored by a feature when the feature overlaps either of the
//! loop's contact bins under the inclusive bin rule. For every shared
//! chromosome, every feature is tested against every loop in that
//! chromosome's bucket (optionally narrowed by an interval tree first).

use crate::core::aggregate::{MatchRow, ResultAggregator, SortedResults};
use crate::core::index::{CandidateIndex, ChromosomeIndex};
use crate::core::records::{FeatureKey, GenomicRecord, LoopKey, LoopRecord};
use crate::core::scan::{scan_chromosomes, MatchOptions, ScanStrategy};
use crate::core::{overlaps, BinRule, Interval};
use log::{debug, info};
use std::collections::HashSet;

/// Check whether a feature anchors a loop in either contact bin
///
/// # Examples
/// ```
/// use loop_anchor::core::{loop_is_anchored, Interval, LoopRecord};
///
/// let lp = LoopRecord::new("chr1", Interval::new(100, 200), Interval::new(500, 600));
/// assert!(loop_is_anchored(&Interval::new(150, 160), &lp));
/// assert!(loop_is_anchored(&Interval::new(600, 700), &lp));
/// assert!(!loop_is_anchored(&Interval::new(300, 400), &lp));
/// ```
#[inline]
pub fn loop_is_anchored(feature: &Interval, loop_record: &LoopRecord) -> bool {
    overlaps(feature.start, feature.stop, &loop_record.bin1, BinRule::Inclusive)
        || overlaps(feature.start, feature.stop, &loop_record.bin2, BinRule::Inclusive)
}

/// A loop paired with a feature anchored in one of its bins
///
/// Output row: the loop's full row followed by `chrom start stop id` of the
/// feature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnchorMatch {
    pub loop_record: LoopRecord,
    pub feature: GenomicRecord,
}

impl MatchRow for AnchorMatch {
    fn chrom(&self) -> &str {
        &self.loop_record.chrom
    }

    fn sort_key(&self) -> (u64, u64) {
        (self.loop_record.bin1.start, self.loop_record.bin1.stop)
    }

    fn fields(&self) -> Vec<String> {
        let mut fields = self.loop_record.fields();
        fields.extend(self.feature.bed4_fields());
        fields
    }
}

/// Unique anchored features and loops seen during one run
#[derive(Debug, Clone, Default)]
pub struct AnchorTracker {
    features: HashSet<FeatureKey>,
    loops: HashSet<LoopKey>,
}

impl AnchorTracker {
    pub fn record(&mut self, feature: &GenomicRecord, loop_record: &LoopRecord) {
        self.features.insert(feature.feature_key());
        self.loops.insert(loop_record.loop_key());
    }

    pub fn merge(&mut self, other: AnchorTracker) {
        self.features.extend(other.features);
        self.loops.extend(other.loops);
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }
}

/// Outcome of an anchoring run
#[derive(Debug, Clone, Default)]
pub struct AnchorReport {
    pub results: SortedResults<AnchorMatch>,
    /// Unique features anchored in at least one loop
    pub anchored_features: usize,
    /// Unique loops with at least one anchored feature
    pub anchored_loops: usize,
    /// Loops whose two ends named different chromosomes
    pub chrom_mismatches: usize,
    /// Chromosomes not scanned because the run was cancelled
    pub skipped_chroms: usize,
}

/// Pairs features with the loops they anchor
#[derive(Debug, Clone, Default)]
pub struct LoopAnchorMatcher {
    options: MatchOptions,
}

impl LoopAnchorMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Match every feature against the loops on its chromosome
    ///
    /// Chromosomes present in only one index are skipped. An empty result is
    /// a valid outcome.
    pub fn run(
        &self,
        features: &ChromosomeIndex<GenomicRecord>,
        loops: &ChromosomeIndex<LoopRecord>,
    ) -> AnchorReport {
        let chroms = features.shared_chroms(loops);
        debug!(
            "Anchoring {} features against {} loops on {} shared chromosomes",
            features.record_count(),
            loops.record_count(),
            chroms.len()
        );

        let strategy = self.options.strategy;
        let partials = scan_chromosomes(&chroms, &self.options, |chrom| {
            match (features.get(chrom), loops.get(chrom)) {
                (Some(chrom_features), Some(chrom_loops)) => {
                    scan_chrom(chrom_features, chrom_loops, strategy)
                }
                _ => (ResultAggregator::new(), AnchorTracker::default()),
            }
        });

        let mut aggregator = ResultAggregator::new();
        let mut tracker = AnchorTracker::default();
        let mut skipped_chroms = 0;
        for partial in partials {
            match partial {
                Some((rows, seen)) => {
                    aggregator.merge(rows);
                    tracker.merge(seen);
                }
                None => skipped_chroms += 1,
            }
        }

        let report = AnchorReport {
            results: aggregator.into_sorted(),
            anchored_features: tracker.feature_count(),
            anchored_loops: tracker.loop_count(),
            chrom_mismatches: loops.chrom_mismatches(),
            skipped_chroms,
        };
        info!(
            "Anchored {} features in {} loops ({} rows)",
            report.anchored_features,
            report.anchored_loops,
            report.results.len()
        );
        report
    }
}

/// Pairwise scan of one chromosome bucket
///
/// Emission order is feature order, then loop order within the bucket, for
/// both strategies.
fn scan_chrom(
    features: &[GenomicRecord],
    loops: &[LoopRecord],
    strategy: ScanStrategy,
) -> (ResultAggregator<AnchorMatch>, AnchorTracker) {
    let mut rows = ResultAggregator::new();
    let mut tracker = AnchorTracker::default();

    let mut emit = |feature: &GenomicRecord, loop_record: &LoopRecord| {
        if loop_is_anchored(&feature.interval, loop_record) {
            tracker.record(feature, loop_record);
            rows.push(AnchorMatch {
                loop_record: loop_record.clone(),
                feature: feature.clone(),
            });
        }
    };

    match strategy {
        ScanStrategy::Exhaustive => {
            for feature in features {
                for loop_record in loops {
                    emit(feature, loop_record);
                }
            }
        }
        ScanStrategy::Indexed => {
            let candidates = CandidateIndex::new(
                loops
                    .iter()
                    .enumerate()
                    .flat_map(|(pos, lp)| [(lp.bin1, pos), (lp.bin2, pos)]),
            );
            for feature in features {
                for pos in candidates.candidates(&feature.interval) {
                    emit(feature, &loops[pos]);
                }
            }
        }
    }

    (rows, tracker)
}
