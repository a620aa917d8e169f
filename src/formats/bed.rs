//! Feature / target file adapter
//!
//! Rows are `chrom start stop id [extra...]`. Columns past the fourth are kept
//! verbatim on the record.

use crate::core::{GenomicRecord, Interval, ParseError, ParseResult};
use crate::formats::reader::{read_records, read_records_from, split_fields};
use std::io::BufRead;
use std::path::Path;

/// Minimum columns in a feature row
pub const FEATURE_MIN_FIELDS: usize = 4;

pub(crate) fn require_fields(fields: &[&str], expected: usize, line: usize) -> ParseResult<()> {
    if fields.len() < expected {
        return Err(ParseError::TooFewFields {
            line,
            expected,
            found: fields.len(),
        });
    }
    Ok(())
}

pub(crate) fn parse_coord(value: &str, field: &'static str, line: usize) -> ParseResult<u64> {
    value.trim().parse().map_err(|_| ParseError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

/// Parse a start/stop column pair into an `Interval`
pub(crate) fn parse_interval(
    start: &str,
    stop: &str,
    names: (&'static str, &'static str),
    line: usize,
) -> ParseResult<Interval> {
    let start = parse_coord(start, names.0, line)?;
    let stop = parse_coord(stop, names.1, line)?;
    Interval::try_new(start, stop).map_err(|_| ParseError::InvalidInterval { line, start, stop })
}

/// Build a feature from already split columns
pub fn parse_feature_fields(fields: &[&str], line: usize) -> ParseResult<GenomicRecord> {
    require_fields(fields, FEATURE_MIN_FIELDS, line)?;
    let interval = parse_interval(fields[1], fields[2], ("start", "stop"), line)?;

    Ok(GenomicRecord {
        chrom: fields[0].to_string(),
        interval,
        id: fields[3].to_string(),
        extra: fields[4..].iter().map(|s| s.to_string()).collect(),
    })
}

/// Parse a single feature row
///
/// # Examples
/// ```
/// use loop_anchor::formats::parse_feature_line;
///
/// let rec = parse_feature_line("chr1\t150\t160\tfeatX\t0.5", 1).unwrap();
/// assert_eq!(rec.start(), 150);
/// assert_eq!(rec.id, "featX");
/// assert_eq!(rec.extra, vec!["0.5"]);
/// ```
pub fn parse_feature_line(line: &str, line_number: usize) -> ParseResult<GenomicRecord> {
    parse_feature_fields(&split_fields(line.trim_end_matches(['\n', '\r'])), line_number)
}

/// Read all features from a file (plain, gzip or bzip2)
pub fn read_features<P: AsRef<Path>>(path: P) -> ParseResult<Vec<GenomicRecord>> {
    read_records(path, parse_feature_fields)
}

pub fn read_features_from<R: BufRead>(reader: R) -> ParseResult<Vec<GenomicRecord>> {
    read_records_from(reader, parse_feature_fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_minimal() {
        let rec = parse_feature_line("chr1\t100\t200\tpeak1", 3).unwrap();
        assert_eq!(rec, GenomicRecord::new("chr1", 100, 200, "peak1"));
        assert!(rec.extra.is_empty());
    }

    #[test]
    fn test_parse_feature_keeps_chrom_verbatim() {
        // Normalization happens in the index, not the parser
        let rec = parse_feature_line("7\t1\t2\tx", 1).unwrap();
        assert_eq!(rec.chrom, "7");
    }

    #[test]
    fn test_parse_feature_too_few_fields() {
        let err = parse_feature_line("chr1\t100\t200", 5).unwrap_err();
        assert!(matches!(
            err,
            ParseError::TooFewFields { line: 5, expected: 4, found: 3 }
        ));
    }

    #[test]
    fn test_parse_feature_bad_number() {
        let err = parse_feature_line("chr1\tabc\t200\tp", 2).unwrap_err();
        match err {
            ParseError::InvalidNumber { line, field, value } => {
                assert_eq!(line, 2);
                assert_eq!(field, "start");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_feature_reversed_interval() {
        let err = parse_feature_line("chr1\t300\t200\tp", 9).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidInterval { line: 9, start: 300, stop: 200 }
        ));
    }

    #[test]
    fn test_read_features_from_reader() {
        let data = b"#chrom\tstart\tstop\tid\nchr1\t10\t20\ta\n\nchr2\t30\t40\tb\tx\ty\n";
        let features = read_features_from(&data[..]).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[1].chrom, "chr2");
        assert_eq!(features[1].extra, vec!["x", "y"]);
    }

    #[test]
    fn test_read_features_error_carries_line() {
        let data = b"chr1\t10\t20\ta\nchr1\t10\n";
        let err = read_features_from(&data[..]).unwrap_err();
        assert!(matches!(err, ParseError::TooFewFields { line: 2, .. }));
    }
}
