//! LoopAnchor CLI entry point
//!
//! Anchors chromatin loops to features and reports degree-1 distal
//! connections through anchored loops.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use loop_anchor::core::{
    ChromosomeIndex, DistalConnectivityMatcher, LoopAnchorMatcher, MatchOptions, ScanStrategy,
};
use loop_anchor::formats;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Pair enumeration inside a chromosome (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum StrategyArg {
    /// Interval-tree prefilter
    #[default]
    #[value(name = "indexed")]
    Indexed,
    /// Test every pair
    #[value(name = "exhaustive")]
    Exhaustive,
}

impl From<StrategyArg> for ScanStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Indexed => ScanStrategy::Indexed,
            StrategyArg::Exhaustive => ScanStrategy::Exhaustive,
        }
    }
}

#[derive(Parser)]
#[command(name = "loop-anchor")]
#[command(about = "Anchor chromatin loops to genomic features")]
#[command(version)]
struct Cli {
    /// Candidate enumeration strategy
    #[arg(long, global = true, default_value = "indexed")]
    strategy: StrategyArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find loops with a feature in at least one contact bin
    Anchor {
        /// Loop file (chr1 start1 stop1 chr2 start2 stop2 [annotations...])
        loops: PathBuf,
        /// Feature file (chrom start stop id [extra...])
        features: PathBuf,
        /// Output file
        #[arg(default_value = "anchored_loops.txt")]
        output: PathBuf,
        /// Number of threads
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },
    /// Find targets in the bin opposite an anchored element
    Deg1 {
        /// Anchored-loop file, as written by `anchor`
        anchored_loops: PathBuf,
        /// Label of the anchor set, used in the summary
        anchor_name: String,
        /// Target file (chrom start stop id [extra...])
        targets: PathBuf,
        /// Label of the target set, used in the summary
        target_name: String,
        /// Output file
        #[arg(default_value = "deg1_connections.txt")]
        output: PathBuf,
        /// Number of threads
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },
}

fn load<T, F>(what: &str, path: &Path, read: F) -> anyhow::Result<Vec<T>>
where
    F: FnOnce(&Path) -> loop_anchor::core::ParseResult<Vec<T>>,
{
    let start = Instant::now();
    let records = read(path).with_context(|| format!("Failed to read {} file {:?}", what, path))?;
    eprintln!(
        "Loaded {} {} records from {:?} in {:.2}s",
        records.len(),
        what,
        path,
        start.elapsed().as_secs_f64()
    );
    Ok(records)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Anchor { loops, features, output, threads } => {
            let loops = ChromosomeIndex::build(load("loop", &loops, |p| formats::read_loops(p))?);
            let features =
                ChromosomeIndex::build(load("feature", &features, |p| formats::read_features(p))?);

            let options = MatchOptions::default()
                .with_threads(threads)
                .with_strategy(cli.strategy.into());
            let report = LoopAnchorMatcher::with_options(options).run(&features, &loops);
            let lines = formats::write_results_file(&report.results, &output)
                .with_context(|| format!("Failed to write {:?}", output))?;

            println!("# Number of anchored features = {}", report.anchored_features);
            println!("# Number of anchored loops = {}", report.anchored_loops);
            println!("# Number of lines = {}", lines);

            eprintln!("\n=== Anchoring Statistics ===");
            eprintln!("Output:            {:?}", output);
            eprintln!("Mismatched loops:  {}", report.chrom_mismatches);
            eprintln!("Time elapsed:      {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Deg1 { anchored_loops, anchor_name, targets, target_name, output, threads } => {
            let anchored_loops = ChromosomeIndex::build(load("anchored loop", &anchored_loops, |p| {
                formats::read_anchored_loops(p)
            })?);
            let targets =
                ChromosomeIndex::build(load("target", &targets, |p| formats::read_features(p))?);

            let options = MatchOptions::default()
                .with_threads(threads)
                .with_strategy(cli.strategy.into());
            let report = DistalConnectivityMatcher::with_options(options).run(&anchored_loops, &targets);
            let lines = formats::write_results_file(&report.results, &output)
                .with_context(|| format!("Failed to write {:?}", output))?;

            println!(
                "# Number of contacts in which {} is directly looped to {} (i.e. 1\u{b0} {}) = {}",
                target_name, anchor_name, anchor_name, report.connected_targets
            );

            eprintln!("\n=== Connectivity Statistics ===");
            eprintln!("Output:            {:?} ({} lines)", output, lines);
            eprintln!("Unplaced anchors:  {}", report.unplaced_anchors);
            eprintln!("Mismatched loops:  {}", report.chrom_mismatches);
            eprintln!("Time elapsed:      {:.2}s", start.elapsed().as_secs_f64());
        }
    }

    Ok(())
}
