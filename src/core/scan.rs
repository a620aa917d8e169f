//! Matching options and the per-chromosome scan driver
//!
//! Every chromosome is scanned independently. With more than one thread the
//! scans run on a dedicated rayon pool; results always come back in the
//! order of the chromosome list so merging stays deterministic.

use log::{debug, warn};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// How candidate pairs inside one chromosome are enumerated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStrategy {
    /// Interval-tree prefilter, exact predicate on the candidates
    #[default]
    Indexed,
    /// Every pair in the bucket is tested
    Exhaustive,
}

/// Shared flag that stops new chromosome scans from starting
///
/// Scans already running finish normally; their output is kept.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Options shared by both matchers
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Worker threads (1 = sequential)
    pub threads: usize,
    pub strategy: ScanStrategy,
    pub cancel: Option<CancelToken>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threads: 1,
            strategy: ScanStrategy::Indexed,
            cancel: None,
        }
    }
}

impl MatchOptions {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_strategy(mut self, strategy: ScanStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().map(|c| c.is_cancelled()).unwrap_or(false)
    }
}

/// Run `scan` once per chromosome
///
/// Returns one entry per chromosome in input order; `None` marks a chromosome
/// skipped because the cancel token was set before it started.
pub(crate) fn scan_chromosomes<T, F>(chroms: &[&str], options: &MatchOptions, scan: F) -> Vec<Option<T>>
where
    F: Fn(&str) -> T + Sync + Send,
    T: Send,
{
    let run = |chrom: &&str| {
        if options.is_cancelled() {
            debug!("Cancelled before scanning {}", chrom);
            return None;
        }
        Some(scan(*chrom))
    };

    if options.threads > 1 && chroms.len() > 1 {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(options.threads)
            .build()
        {
            Ok(pool) => return pool.install(|| chroms.par_iter().map(&run).collect()),
            Err(e) => warn!("Failed to create thread pool ({}), scanning sequentially", e),
        }
    }

    chroms.iter().map(&run).collect()
}
