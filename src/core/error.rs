//! Error types for LoopAnchor
//!
//! Defines all error types used throughout the library. The matching core
//! itself never fails; errors come from building records and reading files.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for LoopAnchor operations
#[derive(Debug, Error)]
pub enum LoopAnchorError {
    /// Input parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Interval construction errors
    #[error("Interval error: {0}")]
    Interval(#[from] IntervalError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning a tab-delimited row into a record
#[derive(Debug, Error)]
pub enum ParseError {
    /// Row does not carry the minimum number of columns
    #[error("Too few fields at line {line}: expected at least {expected}, found {found}")]
    TooFewFields {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A coordinate column is not an unsigned integer
    #[error("Invalid number in field '{field}' at line {line}: {value}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// Coordinates are numeric but start > stop
    #[error("Invalid interval at line {line}: start ({start}) > stop ({stop})")]
    InvalidInterval { line: usize, start: u64, stop: u64 },

    /// Row is not valid UTF-8
    #[error("Invalid UTF-8 at line {line}")]
    InvalidUtf8 { line: usize },

    /// Input file not found
    #[error("Input file not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when constructing an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("Invalid coordinate range: start ({start}) > stop ({stop})")]
    StartAfterStop { start: u64, stop: u64 },
}

/// Result type alias for LoopAnchor operations
pub type Result<T> = std::result::Result<T, LoopAnchorError>;

/// Result type alias for parsing operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;
