//! File format adapters
//!
//! Readers for loop, anchored-loop and feature files (plain, gzip or bzip2)
//! and the tab-delimited result writer.

pub mod bed;
pub mod loops;
pub mod reader;
pub mod writer;

pub use bed::{parse_feature_fields, parse_feature_line, read_features, read_features_from, FEATURE_MIN_FIELDS};
pub use loops::{
    parse_anchored_loop_fields, parse_anchored_loop_line, parse_loop_fields, parse_loop_line,
    read_anchored_loops, read_anchored_loops_from, read_loops, read_loops_from,
    ANCHORED_LOOP_MIN_FIELDS, LOOP_MIN_FIELDS,
};
pub use reader::{detect_compression, split_fields, CompressionFormat, InputReader, RowReader};
pub use writer::{write_results, write_results_file};
