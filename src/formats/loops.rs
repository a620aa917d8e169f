//! Loop and anchored-loop file adapters
//!
//! Loop rows: `chr1 start1 stop1 chr2 start2 stop2 [annotations...]`.
//! Anchored-loop rows append the anchor's `chrom start stop id` as the last
//! four columns, which is exactly what the anchoring output looks like.

use crate::core::{AnchoredLoop, LoopRecord, ParseResult};
use crate::formats::bed::{parse_feature_fields, parse_interval, require_fields};
use crate::formats::reader::{read_records, read_records_from, split_fields};
use std::io::BufRead;
use std::path::Path;

/// Minimum columns in a loop row
pub const LOOP_MIN_FIELDS: usize = 6;

/// Minimum columns in an anchored-loop row: six loop columns plus a BED4 anchor
pub const ANCHORED_LOOP_MIN_FIELDS: usize = 10;

const ANCHOR_FIELDS: usize = 4;

/// Build a loop from its six coordinate columns and the given annotations
fn loop_from_parts(coords: &[&str], annotations: &[&str], line: usize) -> ParseResult<LoopRecord> {
    let bin1 = parse_interval(coords[1], coords[2], ("start1", "stop1"), line)?;
    let bin2 = parse_interval(coords[4], coords[5], ("start2", "stop2"), line)?;

    Ok(LoopRecord {
        chrom: coords[0].to_string(),
        bin1,
        mate_chrom: coords[3].to_string(),
        bin2,
        annotations: annotations.iter().map(|s| s.to_string()).collect(),
    })
}

pub fn parse_loop_fields(fields: &[&str], line: usize) -> ParseResult<LoopRecord> {
    require_fields(fields, LOOP_MIN_FIELDS, line)?;
    loop_from_parts(&fields[..LOOP_MIN_FIELDS], &fields[LOOP_MIN_FIELDS..], line)
}

/// Split an anchored-loop row into its loop and its trailing anchor
///
/// Columns between the sixth and the anchor become the loop annotations.
pub fn parse_anchored_loop_fields(fields: &[&str], line: usize) -> ParseResult<AnchoredLoop> {
    require_fields(fields, ANCHORED_LOOP_MIN_FIELDS, line)?;
    let anchor_at = fields.len() - ANCHOR_FIELDS;

    let loop_record = loop_from_parts(
        &fields[..LOOP_MIN_FIELDS],
        &fields[LOOP_MIN_FIELDS..anchor_at],
        line,
    )?;
    let anchor = parse_feature_fields(&fields[anchor_at..], line)?;
    Ok(AnchoredLoop::new(loop_record, anchor))
}

/// Parse a single loop row
///
/// # Examples
/// ```
/// use loop_anchor::formats::parse_loop_line;
///
/// let lp = parse_loop_line("chr1\t100\t200\tchr1\t500\t600\t5\t0.01\tloopA", 1).unwrap();
/// assert_eq!(lp.bin2.start, 500);
/// assert_eq!(lp.annotations, vec!["5", "0.01", "loopA"]);
/// ```
pub fn parse_loop_line(line: &str, line_number: usize) -> ParseResult<LoopRecord> {
    parse_loop_fields(&split_fields(line.trim_end_matches(['\n', '\r'])), line_number)
}

pub fn parse_anchored_loop_line(line: &str, line_number: usize) -> ParseResult<AnchoredLoop> {
    parse_anchored_loop_fields(&split_fields(line.trim_end_matches(['\n', '\r'])), line_number)
}

/// Read all loops from a file (plain, gzip or bzip2)
pub fn read_loops<P: AsRef<Path>>(path: P) -> ParseResult<Vec<LoopRecord>> {
    read_records(path, parse_loop_fields)
}

pub fn read_loops_from<R: BufRead>(reader: R) -> ParseResult<Vec<LoopRecord>> {
    read_records_from(reader, parse_loop_fields)
}

/// Read all anchored loops from a file (plain, gzip or bzip2)
pub fn read_anchored_loops<P: AsRef<Path>>(path: P) -> ParseResult<Vec<AnchoredLoop>> {
    read_records(path, parse_anchored_loop_fields)
}

pub fn read_anchored_loops_from<R: BufRead>(reader: R) -> ParseResult<Vec<AnchoredLoop>> {
    read_records_from(reader, parse_anchored_loop_fields)
}
