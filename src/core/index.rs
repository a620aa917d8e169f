//! Per-chromosome record buckets
//!
//! `ChromosomeIndex` groups records by chromosome so matching only ever
//! compares records on the same chromosome. `CandidateIndex` wraps a
//! rust-lapper tree over one bucket and narrows a pairwise scan down to the
//! records whose span touches a query.

use crate::core::records::ChromKeyed;
use crate::core::Interval;
use log::warn;
use rust_lapper::{Interval as Span, Lapper};
use std::borrow::Cow;
use std::collections::HashMap;

/// Canonical `chr`-prefixed chromosome name
///
/// Names that do not already start with `chr` get the prefix; prefixed names
/// are returned unchanged. The check is case-sensitive.
///
/// # Examples
/// ```
/// use loop_anchor::core::canonical_chrom;
///
/// assert_eq!(canonical_chrom("1"), "chr1");
/// assert_eq!(canonical_chrom("X"), "chrX");
/// assert_eq!(canonical_chrom("chr1"), "chr1");
/// ```
pub fn canonical_chrom(name: &str) -> Cow<'_, str> {
    if name.starts_with("chr") {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("chr{}", name))
    }
}

/// Records bucketed by canonical chromosome name
///
/// Insertion order is preserved inside each bucket and no deduplication is
/// done: duplicate input rows give duplicate bucket entries.
#[derive(Debug, Clone)]
pub struct ChromosomeIndex<R> {
    buckets: HashMap<String, Vec<R>>,
    record_count: usize,
    chrom_mismatches: usize,
}

impl<R: ChromKeyed> ChromosomeIndex<R> {
    /// Bucket records by chromosome, canonicalizing names on the way in
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
    {
        let mut buckets: HashMap<String, Vec<R>> = HashMap::new();
        let mut record_count = 0;
        let mut chrom_mismatches = 0;

        for mut record in records {
            record.canonicalize_chrom();

            if let Some(mate) = record.mate_chrom() {
                if mate != record.chrom() {
                    warn!(
                        "Loop ends disagree on chromosome ({} vs {}), bucketing under {}",
                        record.chrom(),
                        mate,
                        record.chrom()
                    );
                    chrom_mismatches += 1;
                }
            }

            record_count += 1;
            buckets
                .entry(record.chrom().to_string())
                .or_default()
                .push(record);
        }

        Self {
            buckets,
            record_count,
            chrom_mismatches,
        }
    }
}

impl<R> ChromosomeIndex<R> {
    /// Records on a chromosome; accepts either naming style
    pub fn get(&self, chrom: &str) -> Option<&[R]> {
        self.buckets
            .get(&*canonical_chrom(chrom))
            .map(|bucket| bucket.as_slice())
    }

    /// Check if a chromosome has at least one record
    pub fn has_chrom(&self, chrom: &str) -> bool {
        self.get(chrom).is_some()
    }

    /// Chromosome names, sorted
    pub fn chroms(&self) -> Vec<&str> {
        let mut chroms: Vec<&str> = self.buckets.keys().map(|s| s.as_str()).collect();
        chroms.sort_unstable();
        chroms
    }

    /// Chromosomes present in both indexes, sorted
    pub fn shared_chroms<S>(&self, other: &ChromosomeIndex<S>) -> Vec<&str> {
        let mut chroms: Vec<&str> = self
            .buckets
            .keys()
            .filter(|chrom| other.buckets.contains_key(*chrom))
            .map(|s| s.as_str())
            .collect();
        chroms.sort_unstable();
        chroms
    }

    /// Number of chromosome buckets
    pub fn chrom_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of records across all buckets
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Records whose two ends named different chromosomes
    pub fn chrom_mismatches(&self) -> usize {
        self.chrom_mismatches
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Iterate over `(chrom, bucket)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[R])> {
        self.buckets
            .iter()
            .map(|(chrom, bucket)| (chrom.as_str(), bucket.as_slice()))
    }
}

impl<R: ChromKeyed> FromIterator<R> for ChromosomeIndex<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::build(iter)
    }
}

/// Interval tree over one chromosome bucket
///
/// Each entry stores the position of its record in the bucket. Spans are
/// stored half-open as `[start, stop + 1)` so a lapper hit means the two
/// inclusive ranges share at least one position.
///
/// `stop + 1` saturates at `u64::MAX`, which drops the final position from
/// such spans. Records ending there are kept aside in `open_ended` and
/// returned for any query that also ends there.
pub struct CandidateIndex {
    lapper: Lapper<u64, usize>,
    open_ended: Vec<usize>,
}

impl CandidateIndex {
    /// Build from `(span, bucket position)` pairs; a record may appear more than once
    pub fn new<I>(spans: I) -> Self
    where
        I: IntoIterator<Item = (Interval, usize)>,
    {
        let mut open_ended = Vec::new();
        let intervals: Vec<Span<u64, usize>> = spans
            .into_iter()
            .map(|(span, pos)| {
                if span.stop == u64::MAX {
                    open_ended.push(pos);
                }
                Span {
                    start: span.start,
                    stop: span.stop.saturating_add(1),
                    val: pos,
                }
            })
            .collect();

        Self {
            lapper: Lapper::new(intervals),
            open_ended,
        }
    }

    /// Bucket positions whose span touches `query`, ascending and unique
    ///
    /// This is a superset of what either bin rule accepts; callers re-check
    /// each candidate with the exact predicate.
    pub fn candidates(&self, query: &Interval) -> Vec<usize> {
        let mut hits: Vec<usize> = self
            .lapper
            .find(query.start, query.stop.saturating_add(1))
            .map(|span| span.val)
            .collect();
        if query.stop == u64::MAX {
            hits.extend_from_slice(&self.open_ended);
        }
        hits.sort_unstable();
        hits.dedup();
        hits
    }

    pub fn len(&self) -> usize {
        self.lapper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lapper.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GenomicRecord, LoopRecord};

    fn create_test_index() -> ChromosomeIndex<GenomicRecord> {
        ChromosomeIndex::build(vec![
            GenomicRecord::new("chr1", 100, 200, "a"),
            GenomicRecord::new("1", 300, 400, "b"),
            GenomicRecord::new("chr2", 100, 200, "c"),
            GenomicRecord::new("chr1", 100, 200, "a"),
        ])
    }

    #[test]
    fn test_canonical_chrom() {
        assert_eq!(canonical_chrom("1"), "chr1");
        assert_eq!(canonical_chrom("MT"), "chrMT");
        assert_eq!(canonical_chrom("chrX"), "chrX");
        assert!(matches!(canonical_chrom("chr2"), Cow::Borrowed(_)));
        // Case-sensitive: only the literal prefix counts
        assert_eq!(canonical_chrom("Chr1"), "chrChr1");
    }

    #[test]
    fn test_index_creation() {
        let index = create_test_index();

        assert_eq!(index.chrom_count(), 2);
        assert_eq!(index.record_count(), 4);
        assert!(index.has_chrom("chr1"));
        assert!(index.has_chrom("1"));
        assert!(!index.has_chrom("chr3"));
        assert!(!index.is_empty());
    }

    #[test]
    fn test_bucket_preserves_order_and_duplicates() {
        let index = create_test_index();
        let ids: Vec<&str> = index
            .get("chr1")
            .unwrap()
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "a"]);
        assert_eq!(index.get("chr1").unwrap()[1].chrom, "chr1");
    }

    #[test]
    fn test_chroms_sorted() {
        let index = create_test_index();
        assert_eq!(index.chroms(), vec!["chr1", "chr2"]);
    }

    #[test]
    fn test_shared_chroms() {
        let features = create_test_index();
        let loops: ChromosomeIndex<LoopRecord> = vec![
            LoopRecord::new("chr2", Interval::new(1, 2), Interval::new(5, 6)),
            LoopRecord::new("chr9", Interval::new(1, 2), Interval::new(5, 6)),
        ]
        .into_iter()
        .collect();

        assert_eq!(features.shared_chroms(&loops), vec!["chr2"]);
        assert_eq!(loops.shared_chroms(&features), vec!["chr2"]);
    }

    #[test]
    fn test_chrom_mismatch_buckets_by_first_end() {
        let loops = ChromosomeIndex::build(vec![
            LoopRecord::new("chr1", Interval::new(1, 2), Interval::new(5, 6)).with_mate_chrom("chr2"),
            LoopRecord::new("chr1", Interval::new(1, 2), Interval::new(5, 6)),
        ]);

        assert_eq!(loops.chrom_mismatches(), 1);
        assert_eq!(loops.get("chr1").map(|b| b.len()), Some(2));
        assert!(!loops.has_chrom("chr2"));
    }

    #[test]
    fn test_empty_index() {
        let index: ChromosomeIndex<GenomicRecord> = ChromosomeIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.chroms().is_empty());
        assert_eq!(index.iter().count(), 0);
    }

    #[test]
    fn test_candidates_inclusive_touch() {
        let candidates = CandidateIndex::new(vec![
            (Interval::new(100, 200), 0),
            (Interval::new(500, 600), 0),
            (Interval::new(300, 400), 1),
            (Interval::new(201, 299), 2),
        ]);

        assert_eq!(candidates.len(), 4);
        // Touching the stop coordinate counts
        assert_eq!(candidates.candidates(&Interval::new(200, 200)), vec![0]);
        assert_eq!(candidates.candidates(&Interval::new(150, 350)), vec![0, 1, 2]);
        // Both bins of record 0 hit, reported once
        assert_eq!(candidates.candidates(&Interval::new(150, 550)), vec![0, 1, 2]);
        assert!(candidates.candidates(&Interval::new(700, 800)).is_empty());
    }

    #[test]
    fn test_candidates_at_coordinate_limit() {
        let candidates = CandidateIndex::new(vec![
            (Interval::new(u64::MAX, u64::MAX), 0),
            (Interval::new(u64::MAX - 10, u64::MAX), 1),
            (Interval::new(10, 20), 2),
        ]);

        assert_eq!(candidates.candidates(&Interval::new(u64::MAX, u64::MAX)), vec![0, 1]);
        assert_eq!(candidates.candidates(&Interval::new(u64::MAX - 5, u64::MAX - 1)), vec![1]);
        assert_eq!(candidates.candidates(&Interval::new(0, u64::MAX)), vec![0, 1, 2]);
    }
}
