//! Source discovery: find and classify files to analyze.
//!
//! This module handles the first stage of the pipeline. It provides:
//!
//! - **Traversal**: Walk a root directory, pruning excluded directories and
//!   skipping excluded file names
//! - **Classification**: Map each file to a category label and comment syntax
//!
//! ## Example
//!
//! ```rust,ignore
//! use codestatlib::source::{classify, discover_files, ExcludeConfig};
//!
//! let files = discover_files(".", &ExcludeConfig::new())?;
//! for file in files {
//!     println!("{} -> {}", file.relative.display(), classify(&file.path).label);
//! }
//! ```

pub mod classify;
pub mod exclude;

pub use classify::{classify, comment_syntax, Category, CategoryKind, CommentSyntax};
pub use exclude::{discover_files, walk, Candidate, ExcludeConfig};
