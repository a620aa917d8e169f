//! Result aggregation
//!
//! Matched rows are collected per chromosome, identical rows are kept once,
//! and `into_sorted` produces the chromosome-then-position ordering that the
//! writer emits.

use std::collections::{BTreeMap, HashMap, HashSet};

/// A matched pair that can be written as one output row
pub trait MatchRow {
    /// Chromosome the row is grouped under
    fn chrom(&self) -> &str;

    /// Leading interval of the row, used for intra-chromosome ordering
    fn sort_key(&self) -> (u64, u64);

    /// Output columns in order
    fn fields(&self) -> Vec<String>;
}

/// Write-once accumulator of matched rows for a single run
#[derive(Debug, Clone)]
pub struct ResultAggregator<M> {
    rows: HashMap<String, Vec<M>>,
    seen: HashSet<Vec<String>>,
}

impl<M> Default for ResultAggregator<M> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            seen: HashSet::new(),
        }
    }
}

impl<M: MatchRow> ResultAggregator<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row unless an identical row is already present
    ///
    /// Returns `true` if the row was new.
    pub fn push(&mut self, row: M) -> bool {
        if !self.seen.insert(row.fields()) {
            return false;
        }
        self.rows
            .entry(row.chrom().to_string())
            .or_default()
            .push(row);
        true
    }

    /// Fold another aggregator's rows in, keeping their order
    pub fn merge(&mut self, other: ResultAggregator<M>) {
        let mut chroms: Vec<String> = other.rows.keys().cloned().collect();
        chroms.sort_unstable();
        let mut rows = other.rows;
        for chrom in chroms {
            if let Some(bucket) = rows.remove(&chrom) {
                for row in bucket {
                    self.push(row);
                }
            }
        }
    }

    /// Number of distinct rows held
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Order chromosomes lexicographically and rows by their sort key
    ///
    /// The row sort is stable, so rows with equal keys keep insertion order.
    pub fn into_sorted(self) -> SortedResults<M> {
        let by_chrom = self
            .rows
            .into_iter()
            .map(|(chrom, mut rows)| {
                rows.sort_by_key(|row| row.sort_key());
                (chrom, rows)
            })
            .collect();
        SortedResults { by_chrom }
    }
}

impl<M: MatchRow> FromIterator<M> for ResultAggregator<M> {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        let mut aggregator = Self::new();
        for row in iter {
            aggregator.push(row);
        }
        aggregator
    }
}

/// Deterministically ordered rows, grouped by chromosome
#[derive(Debug, Clone)]
pub struct SortedResults<M> {
    by_chrom: BTreeMap<String, Vec<M>>,
}

impl<M> Default for SortedResults<M> {
    fn default() -> Self {
        Self {
            by_chrom: BTreeMap::new(),
        }
    }
}

impl<M> SortedResults<M> {
    /// Rows of one chromosome
    pub fn get(&self, chrom: &str) -> Option<&[M]> {
        self.by_chrom.get(chrom).map(|rows| rows.as_slice())
    }

    pub fn chroms(&self) -> impl Iterator<Item = &str> {
        self.by_chrom.keys().map(|s| s.as_str())
    }

    /// `(chrom, rows)` in chromosome order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[M])> {
        self.by_chrom
            .iter()
            .map(|(chrom, rows)| (chrom.as_str(), rows.as_slice()))
    }

    /// Every row in output order
    pub fn rows(&self) -> impl Iterator<Item = &M> {
        self.by_chrom.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_chrom.values().map(|rows| rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_chrom.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<M>> {
        self.by_chrom
    }
}
