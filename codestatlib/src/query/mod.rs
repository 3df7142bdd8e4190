//! Query processing: order aggregates for presentation.
//!
//! This module handles the third stage of the pipeline - turning a raw
//! [`CountResult`](crate::CountResult) into sorted rows:
//!
//! - Categories and directories by descending total lines
//! - The largest files, capped at a row limit
//!
//! ## Example
//!
//! ```rust,ignore
//! use codestatlib::query::{ReportQuerySet, DEFAULT_TOP_FILES};
//!
//! let queryset = ReportQuerySet::from_result(&result, DEFAULT_TOP_FILES);
//! for item in &queryset.categories {
//!     println!("{}: {}", item.label, item.stats.counts.total);
//! }
//! ```

pub mod queryset;

pub use queryset::{QueryItem, ReportQuerySet, DEFAULT_TOP_FILES};
