//! Input reading for tab-delimited files
//!
//! Opens plain, gzip or bzip2 input behind a single `BufRead`, memory-maps
//! large plain files, and walks rows while skipping blank, comment, `track`
//! and `browser` lines.

use crate::core::{ParseError, ParseResult};
use memchr::memchr_iter;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Default buffer size for BufReader (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Large buffer size for high-throughput I/O (1MB)
pub const LARGE_BUFFER_SIZE: usize = 1024 * 1024;

/// Threshold for using memory mapping (100MB)
pub const MMAP_THRESHOLD: u64 = 100 * 1024 * 1024;

/// Compression format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detect compression format from file extension, then magic bytes
pub fn detect_compression(path: &Path) -> io::Result<CompressionFormat> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if extension == "gz" {
        return Ok(CompressionFormat::Gzip);
    }
    if extension == "bz2" {
        return Ok(CompressionFormat::Bzip2);
    }

    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    if bytes_read >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
        return Ok(CompressionFormat::Gzip);
    }
    // BZ2 magic: "BZh"
    if bytes_read >= 3 && magic == [0x42, 0x5a, 0x68] {
        return Ok(CompressionFormat::Bzip2);
    }

    Ok(CompressionFormat::Plain)
}

/// Memory-mapped file reader
pub struct MappedReader {
    mmap: Mmap,
    position: usize,
}

impl MappedReader {
    pub fn new(file: &File) -> io::Result<Self> {
        // SAFETY: We assume the file won't be modified while mapped
        let mmap = unsafe { Mmap::map(file)? };
        Ok(Self { mmap, position: 0 })
    }

    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }
}

impl Read for MappedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = &self.mmap[self.position..];
        let to_read = std::cmp::min(buf.len(), remaining.len());
        buf[..to_read].copy_from_slice(&remaining[..to_read]);
        self.position += to_read;
        Ok(to_read)
    }
}

impl BufRead for MappedReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(&self.mmap[self.position..])
    }

    fn consume(&mut self, amt: usize) {
        self.position = std::cmp::min(self.position + amt, self.mmap.len());
    }
}

/// Any supported input source behind one `BufRead`
pub enum InputReader {
    Buffered(BufReader<File>),
    Mapped(MappedReader),
    Gzip(BufReader<flate2::read::GzDecoder<File>>),
    Bzip2(BufReader<bzip2::read::BzDecoder<File>>),
}

impl InputReader {
    /// Open a file, picking decompression and buffering automatically
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let format = detect_compression(path)?;
        let file = File::open(path)?;

        match format {
            CompressionFormat::Gzip => Ok(InputReader::Gzip(BufReader::with_capacity(
                DEFAULT_BUFFER_SIZE,
                flate2::read::GzDecoder::new(file),
            ))),
            CompressionFormat::Bzip2 => Ok(InputReader::Bzip2(BufReader::with_capacity(
                DEFAULT_BUFFER_SIZE,
                bzip2::read::BzDecoder::new(file),
            ))),
            CompressionFormat::Plain => {
                let file_size = file.metadata()?.len();
                if file_size >= MMAP_THRESHOLD {
                    Ok(InputReader::Mapped(MappedReader::new(&file)?))
                } else {
                    let buf_size = if file_size > 10 * 1024 * 1024 {
                        LARGE_BUFFER_SIZE
                    } else {
                        DEFAULT_BUFFER_SIZE
                    };
                    Ok(InputReader::Buffered(BufReader::with_capacity(buf_size, file)))
                }
            }
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, InputReader::Mapped(_))
    }
}

impl Read for InputReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            InputReader::Buffered(reader) => reader.read(buf),
            InputReader::Mapped(reader) => reader.read(buf),
            InputReader::Gzip(reader) => reader.read(buf),
            InputReader::Bzip2(reader) => reader.read(buf),
        }
    }
}

impl BufRead for InputReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            InputReader::Buffered(reader) => reader.fill_buf(),
            InputReader::Mapped(reader) => reader.fill_buf(),
            InputReader::Gzip(reader) => reader.fill_buf(),
            InputReader::Bzip2(reader) => reader.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            InputReader::Buffered(reader) => reader.consume(amt),
            InputReader::Mapped(reader) => reader.consume(amt),
            InputReader::Gzip(reader) => reader.consume(amt),
            InputReader::Bzip2(reader) => reader.consume(amt),
        }
    }
}

/// Split a row on tabs
///
/// # Examples
/// ```
/// use loop_anchor::formats::split_fields;
///
/// assert_eq!(split_fields("chr1\t100\t200"), vec!["chr1", "100", "200"]);
/// assert_eq!(split_fields("a\t\tb"), vec!["a", "", "b"]);
/// ```
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(16);
    let mut start = 0;
    for tab in memchr_iter(b'\t', line.as_bytes()) {
        fields.push(&line[start..tab]);
        start = tab + 1;
    }
    fields.push(&line[start..]);
    fields
}

/// Lines that carry no record
fn is_skippable(line: &[u8]) -> bool {
    line.iter().all(|b| b.is_ascii_whitespace())
        || line.starts_with(b"#")
        || line.starts_with(b"track")
        || line.starts_with(b"browser")
}

/// One data row: 1-based line number and its fields
#[derive(Debug, PartialEq, Eq)]
pub struct Row<'a> {
    pub line: usize,
    pub fields: Vec<&'a str>,
}

/// Row iterator that reuses a buffer between lines
pub struct RowReader<R: BufRead> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> RowReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::with_capacity(4096),
            line_number: 0,
        }
    }

    /// Next data row, or `None` at EOF
    pub fn next_row(&mut self) -> Option<ParseResult<Row<'_>>> {
        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(ParseError::Io(e))),
            }
            self.line_number += 1;

            if self.buffer.last() == Some(&b'\n') {
                self.buffer.pop();
                if self.buffer.last() == Some(&b'\r') {
                    self.buffer.pop();
                }
            }
            if !is_skippable(&self.buffer) {
                break;
            }
        }

        let line = self.line_number;
        match std::str::from_utf8(&self.buffer) {
            Ok(text) => Some(Ok(Row {
                line,
                fields: split_fields(text),
            })),
            Err(_) => Some(Err(ParseError::InvalidUtf8 { line })),
        }
    }

    /// Lines consumed so far, skipped lines included
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

/// Parse every data row of `reader` with `parse`
pub fn read_records_from<B, T, F>(reader: B, mut parse: F) -> ParseResult<Vec<T>>
where
    B: BufRead,
    F: FnMut(&[&str], usize) -> ParseResult<T>,
{
    let mut rows = RowReader::new(reader);
    let mut records = Vec::new();
    while let Some(row) = rows.next_row() {
        let row = row?;
        records.push(parse(&row.fields, row.line)?);
    }
    Ok(records)
}

/// Parse every data row of the file at `path`
pub fn read_records<P, T, F>(path: P, parse: F) -> ParseResult<Vec<T>>
where
    P: AsRef<Path>,
    F: FnMut(&[&str], usize) -> ParseResult<T>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(ParseError::FileNotFound(path.to_path_buf()));
    }
    read_records_from(InputReader::open(path)?, parse)
}
