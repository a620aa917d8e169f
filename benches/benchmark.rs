//! Performance benchmarks for LoopAnchor
//!
//! Run with: cargo bench
//!
//! Uses synthetic loops and features so no data files are needed.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use loop_anchor::core::{
    AnchoredLoop, ChromosomeIndex, DistalConnectivityMatcher, GenomicRecord, Interval,
    LoopAnchorMatcher, LoopRecord, MatchOptions, ScanStrategy,
};
use loop_anchor::formats::parse_loop_line;

const CHROMS: [&str; 4] = ["chr1", "chr2", "chr3", "chrX"];
const BIN: u64 = 5_000;

/// Deterministic pseudo-random positions (xorshift)
struct Positions(u64);

impl Positions {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0 % bound
    }
}

fn synthetic_loops(count: usize) -> Vec<LoopRecord> {
    let mut rng = Positions(0x9e37_79b9_7f4a_7c15);
    (0..count)
        .map(|i| {
            let a = rng.next(10_000) * BIN;
            let b = a + (1 + rng.next(200)) * BIN;
            LoopRecord::new(
                CHROMS[i % CHROMS.len()],
                Interval::new(a, a + BIN),
                Interval::new(b, b + BIN),
            )
            .with_annotations(vec![i.to_string()])
        })
        .collect()
}

fn synthetic_features(count: usize, seed: u64) -> Vec<GenomicRecord> {
    let mut rng = Positions(seed);
    (0..count)
        .map(|i| {
            let start = rng.next(10_000 * BIN);
            GenomicRecord::new(CHROMS[i % CHROMS.len()], start, start + 500, format!("f{}", i))
        })
        .collect()
}

/// Benchmark anchoring with both candidate strategies
fn bench_anchor(c: &mut Criterion) {
    let mut group = c.benchmark_group("anchor");
    group.sample_size(20);

    for size in [1_000usize, 5_000] {
        let loops = ChromosomeIndex::build(synthetic_loops(size));
        let features = ChromosomeIndex::build(synthetic_features(size, 0x2545_f491_4f6c_dd1d));
        group.throughput(Throughput::Elements((size * size) as u64));

        for (name, strategy) in [("indexed", ScanStrategy::Indexed), ("exhaustive", ScanStrategy::Exhaustive)] {
            let matcher = LoopAnchorMatcher::with_options(MatchOptions::default().with_strategy(strategy));
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| black_box(matcher.run(black_box(&features), black_box(&loops))))
            });
        }
    }

    group.finish();
}

/// Benchmark the degree-1 pass on loops anchored at their second bin
fn bench_deg1(c: &mut Criterion) {
    let mut group = c.benchmark_group("deg1");
    group.sample_size(20);

    let size = 5_000;
    let anchored = ChromosomeIndex::build(synthetic_loops(size).into_iter().map(|lp| {
        let anchor = GenomicRecord::new(lp.chrom.clone(), lp.bin2.start + 10, lp.bin2.start + 20, "a");
        AnchoredLoop::new(lp, anchor)
    }));
    let targets = ChromosomeIndex::build(synthetic_features(size, 0x1234_5678_9abc_def1));

    for threads in [1usize, 4] {
        let matcher = DistalConnectivityMatcher::with_options(MatchOptions::default().with_threads(threads));
        group.bench_with_input(BenchmarkId::new("threads", threads), &threads, |b, _| {
            b.iter(|| black_box(matcher.run(black_box(&anchored), black_box(&targets))))
        });
    }

    group.finish();
}

/// Benchmark loop row parsing
fn bench_parse(c: &mut Criterion) {
    let line = "chr1\t1000000\t1005000\tchr1\t1250000\t1255000\t12\t0.0003\tloop_42";
    c.bench_function("parse_loop_line", |b| {
        b.iter(|| black_box(parse_loop_line(black_box(line), 1)))
    });
}

criterion_group!(benches, bench_anchor, bench_deg1, bench_parse);
criterion_main!(benches);
