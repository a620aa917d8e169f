//! Record types consumed and produced by the matchers
//!
//! Rows arrive from the parsing layer already split into named fields; the
//! positional column layout of the input files stops at the parser.

use crate::core::index::canonical_chrom;
use crate::core::Interval;

/// Anything that can be bucketed by chromosome
pub trait ChromKeyed {
    /// Chromosome used as the bucket key
    fn chrom(&self) -> &str;

    /// Rewrite chromosome names into their `chr`-prefixed form
    fn canonicalize_chrom(&mut self);

    /// Chromosome of the second end, for two-ended records
    fn mate_chrom(&self) -> Option<&str> {
        None
    }
}

/// A feature or target row: `chrom start stop id [extra...]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenomicRecord {
    pub chrom: String,
    pub interval: Interval,
    pub id: String,
    /// Trailing columns, kept verbatim
    pub extra: Vec<String>,
}

impl GenomicRecord {
    pub fn new(chrom: impl Into<String>, start: u64, stop: u64, id: impl Into<String>) -> Self {
        Self {
            chrom: chrom.into(),
            interval: Interval::new(start, stop),
            id: id.into(),
            extra: Vec::new(),
        }
    }

    /// Attach trailing pass-through columns
    pub fn with_extra(mut self, extra: Vec<String>) -> Self {
        self.extra = extra;
        self
    }

    #[inline]
    pub fn start(&self) -> u64 {
        self.interval.start
    }

    #[inline]
    pub fn stop(&self) -> u64 {
        self.interval.stop
    }

    /// The first four columns (`chrom start stop id`) as output fields
    pub fn bed4_fields(&self) -> [String; 4] {
        [
            self.chrom.clone(),
            self.interval.start.to_string(),
            self.interval.stop.to_string(),
            self.id.clone(),
        ]
    }

    /// Identity used when counting unique anchored features
    pub fn feature_key(&self) -> FeatureKey {
        FeatureKey {
            chrom: self.chrom.clone(),
            start: self.interval.start,
            stop: self.interval.stop,
            id: self.id.clone(),
        }
    }
}

impl ChromKeyed for GenomicRecord {
    fn chrom(&self) -> &str {
        &self.chrom
    }

    fn canonicalize_chrom(&mut self) {
        if let std::borrow::Cow::Owned(name) = canonical_chrom(&self.chrom) {
            self.chrom = name;
        }
    }
}

/// A chromatin loop row: `chr1 start1 stop1 chr2 start2 stop2 [annotations...]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoopRecord {
    /// Chromosome of bin1, used for bucketing
    pub chrom: String,
    pub bin1: Interval,
    /// Chromosome of bin2 as written in the input
    pub mate_chrom: String,
    pub bin2: Interval,
    /// Loop-specific columns (count, FDR, contact id, ...) in input order
    pub annotations: Vec<String>,
}

impl LoopRecord {
    /// Intra-chromosomal loop
    pub fn new(chrom: impl Into<String>, bin1: Interval, bin2: Interval) -> Self {
        let chrom = chrom.into();
        Self {
            mate_chrom: chrom.clone(),
            chrom,
            bin1,
            bin2,
            annotations: Vec::new(),
        }
    }

    pub fn with_mate_chrom(mut self, mate_chrom: impl Into<String>) -> Self {
        self.mate_chrom = mate_chrom.into();
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<String>) -> Self {
        self.annotations = annotations;
        self
    }

    /// Both ends of the loop do not agree on chromosome
    pub fn has_chrom_mismatch(&self) -> bool {
        self.chrom != self.mate_chrom
    }

    /// The six coordinate columns followed by the annotations
    pub fn fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(6 + self.annotations.len());
        fields.push(self.chrom.clone());
        fields.push(self.bin1.start.to_string());
        fields.push(self.bin1.stop.to_string());
        fields.push(self.mate_chrom.clone());
        fields.push(self.bin2.start.to_string());
        fields.push(self.bin2.stop.to_string());
        fields.extend(self.annotations.iter().cloned());
        fields
    }

    /// Identity used when counting unique anchored loops
    pub fn loop_key(&self) -> LoopKey {
        LoopKey {
            chrom: self.chrom.clone(),
            bin1: self.bin1,
            mate_chrom: self.mate_chrom.clone(),
            bin2: self.bin2,
        }
    }
}

impl ChromKeyed for LoopRecord {
    fn chrom(&self) -> &str {
        &self.chrom
    }

    fn canonicalize_chrom(&mut self) {
        if let std::borrow::Cow::Owned(name) = canonical_chrom(&self.chrom) {
            self.chrom = name;
        }
        if let std::borrow::Cow::Owned(name) = canonical_chrom(&self.mate_chrom) {
            self.mate_chrom = name;
        }
    }

    fn mate_chrom(&self) -> Option<&str> {
        Some(&self.mate_chrom)
    }
}

/// A loop already anchored by one element in one of its bins
///
/// Produced by an anchoring pass; the anchor sits in the trailing four
/// columns of the row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnchoredLoop {
    pub loop_record: LoopRecord,
    pub anchor: GenomicRecord,
}

impl AnchoredLoop {
    pub fn new(loop_record: LoopRecord, anchor: GenomicRecord) -> Self {
        Self { loop_record, anchor }
    }
}

impl ChromKeyed for AnchoredLoop {
    fn chrom(&self) -> &str {
        &self.loop_record.chrom
    }

    fn canonicalize_chrom(&mut self) {
        self.loop_record.canonicalize_chrom();
        self.anchor.canonicalize_chrom();
    }

    fn mate_chrom(&self) -> Option<&str> {
        Some(&self.loop_record.mate_chrom)
    }
}

/// `(chrom, start, stop, id)` of an anchored feature
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureKey {
    pub chrom: String,
    pub start: u64,
    pub stop: u64,
    pub id: String,
}

/// The six coordinate columns of an anchored loop
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoopKey {
    pub chrom: String,
    pub bin1: Interval,
    pub mate_chrom: String,
    pub bin2: Interval,
}
