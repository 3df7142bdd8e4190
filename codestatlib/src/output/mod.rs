//! Output formatting: present results as a text report or JSON export.
//!
//! This module handles the fourth and final stage of the pipeline:
//!
//! - **Report**: Fixed-width text tables built from a `ReportQuerySet`
//! - **Export**: The complete state as JSON, never truncated
//!
//! Both return strings; writing them anywhere is up to the caller.
//!
//! ## Example
//!
//! ```rust,ignore
//! use codestatlib::output::{export_json, render_report};
//! use codestatlib::query::{ReportQuerySet, DEFAULT_TOP_FILES};
//!
//! let text = render_report(&ReportQuerySet::from_result(&result, DEFAULT_TOP_FILES));
//! let json = export_json(&result)?;
//! ```

pub mod export;
pub mod report;

pub use export::{export_json, Export};
pub use report::{format_count, render_report, truncate_name};
