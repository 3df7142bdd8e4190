//! Data collection: analyze files and aggregate statistics.
//!
//! This module handles the second stage of the pipeline. It provides:
//!
//! - **Analysis**: Decode a file and classify each line as code, comment or blank
//! - **Statistics**: Core data structures (`LineCounts`, `FileRecord`, totals)
//! - **Counting**: The pipeline driver and accumulator (`count_directory`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use codestatlib::data::{count_directory, CountOptions};
//!
//! let result = count_directory(".", &CountOptions::new())?;
//! println!("Total code lines: {}", result.summary.total_code_lines);
//! ```

pub mod analyzer;
pub mod counter;
pub mod stats;

pub use analyzer::{analyze_file, analyze_lines, analyze_str, decode_content, split_lines};
pub use counter::{
    count_directory, count_file, directory_label, Accumulator, CountOptions, CountResult,
};
pub use stats::{
    CategoryTotals, DirectoryTotals, FileRecord, LineCounts, RunSummary, ROOT_DIR_LABEL,
};
