//! Tab-delimited result writer

use crate::core::{MatchRow, SortedResults};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Output buffer size (128KB)
pub const WRITE_BUFFER_SIZE: usize = 128 * 1024;

/// Write rows in chromosome-then-position order, one per line
///
/// Returns the number of lines written.
pub fn write_results<M: MatchRow, W: Write>(results: &SortedResults<M>, writer: &mut W) -> io::Result<usize> {
    let mut lines = 0;
    for row in results.rows() {
        writeln!(writer, "{}", row.fields().join("\t"))?;
        lines += 1;
    }
    Ok(lines)
}

/// Write rows to a file, replacing it if present
pub fn write_results_file<M: MatchRow, P: AsRef<Path>>(results: &SortedResults<M>, path: P) -> io::Result<usize> {
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, File::create(path.as_ref())?);
    let lines = write_results(results, &mut writer)?;
    writer.flush()?;
    Ok(lines)
}
