//! Structured export of a count result.
//!
//! Key names are fixed:
//! `timestamp`, `summary`, `stats_by_type`, `stats_by_dir` and
//! `file_details`. Maps are ordered by key and `file_details` keeps
//! traversal order.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::data::counter::CountResult;
use crate::data::stats::{CategoryTotals, DirectoryTotals, FileRecord, RunSummary};
use crate::Result;

/// Borrowed view of a count result, shaped for serialization.
#[derive(Debug, Serialize)]
pub struct Export<'a> {
    pub timestamp: DateTime<Local>,
    pub summary: &'a RunSummary,
    pub stats_by_type: &'a BTreeMap<String, CategoryTotals>,
    pub stats_by_dir: &'a BTreeMap<String, DirectoryTotals>,
    pub file_details: &'a [FileRecord],
}

impl<'a> Export<'a> {
    /// Build the export view of a result.
    pub fn from_result(result: &'a CountResult) -> Self {
        Export {
            timestamp: result.summary.timestamp,
            summary: &result.summary,
            stats_by_type: &result.by_category,
            stats_by_dir: &result.by_directory,
            file_details: &result.files,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Serialize a result to pretty-printed JSON.
pub fn export_json(result: &CountResult) -> Result<String> {
    Export::from_result(result).to_json()
}
