//! # codestatlib
//!
//! A directory line counter library that splits code, comment and blank lines
//! and aggregates them by file category and by directory.
//!
//! ## Overview
//!
//! The library is a single forward pipeline:
//!
//! 1. **Source**: walk the tree, prune excluded directories, skip excluded
//!    file names, classify each file into a category
//! 2. **Data**: decode each countable file, classify its lines, accumulate
//!    per-file records and per-category/per-directory totals
//! 3. **Query**: sort aggregates and pick the largest files
//! 4. **Output**: render a text report or a JSON export
//!
//! Line classification is a prefix heuristic, not a lexer:
//!
//! - **C-style** (`.c`, `.cpp`, `.rs`, `.js`, ...): `//` and `/* */`
//! - **Python** (`.py`): `#`, plus lines opening with `"""` or `'''`
//! - **CMake** (`.cmake`, `CMakeLists.txt`): `#`
//! - Everything else: any non-blank line is code
//!
//! ## Example
//!
//! ```rust
//! use codestatlib::{count_directory, export_json, render_report, CountOptions, ReportQuerySet};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::create_dir(dir.path().join("src")).unwrap();
//! fs::write(dir.path().join("src/main.cpp"), "// entry\nint main() {}\n").unwrap();
//! fs::write(dir.path().join("CMakeLists.txt"), "# build\nproject(demo)\n").unwrap();
//!
//! let result = count_directory(dir.path(), &CountOptions::new()).unwrap();
//! assert_eq!(result.summary.total_files, 2);
//! assert_eq!(result.by_category["CMake file"].files, 1);
//!
//! let report = render_report(&ReportQuerySet::from_result(&result, 20));
//! assert!(report.contains("C++ source"));
//!
//! let json = export_json(&result).unwrap();
//! assert!(json.contains("\"file_details\""));
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod query;
pub mod source;

pub use data::{
    analyze_file, count_directory, count_file, CategoryTotals, CountOptions, CountResult,
    DirectoryTotals, FileRecord, LineCounts, RunSummary,
};
pub use error::CodestatError;
pub use output::{export_json, render_report, Export};
pub use query::{ReportQuerySet, DEFAULT_TOP_FILES};
pub use source::{classify, Category, CategoryKind, CommentSyntax, ExcludeConfig};

/// Result type for codestatlib operations
pub type Result<T> = std::result::Result<T, CodestatError>;
