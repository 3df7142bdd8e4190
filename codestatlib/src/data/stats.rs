//! Core data structures for line statistics.
//!
//! Every analyzed line is exactly one of three kinds:
//!
//! - **code**: anything not blank and not recognized as a comment
//! - **comment**: line or block comments, per the file's comment syntax
//! - **blank**: whitespace-only lines
//!
//! so `total == code + comment + blank` holds for every count here.
//!
//! Field names on the wire (`lines`, `code_lines`, ...) are the keys of the
//! structured export and stay stable.

use std::ops::{Add, AddAssign};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Label used for files sitting directly in the scan root.
pub const ROOT_DIR_LABEL: &str = "(root)";

/// Line counts for a file or a group of files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCounts {
    /// Total line count
    #[serde(rename = "lines")]
    pub total: u64,
    /// Lines that are neither blank nor comments
    #[serde(rename = "code_lines")]
    pub code: u64,
    /// Comment lines
    #[serde(rename = "comment_lines")]
    pub comment: u64,
    /// Whitespace-only lines
    #[serde(rename = "blank_lines")]
    pub blank: u64,
}

impl LineCounts {
    /// Create a new LineCounts with all zeros.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no lines were counted.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Whether `total` equals the sum of the three line kinds.
    pub fn is_consistent(&self) -> bool {
        self.total == self.code + self.comment + self.blank
    }

    /// Percentage of `part` in the total, or 0.0 when there are no lines.
    pub fn percent(&self, part: u64) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            part as f64 / self.total as f64 * 100.0
        }
    }
}

impl Add for LineCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            code: self.code + other.code,
            comment: self.comment + other.comment,
            blank: self.blank + other.blank,
        }
    }
}

impl AddAssign for LineCounts {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.code += other.code;
        self.comment += other.comment;
        self.blank += other.blank;
    }
}

/// Record of one analyzed file. Created once, never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the scan root
    pub path: String,
    /// Category label
    #[serde(rename = "type")]
    pub category: String,
    /// Line counts for this file
    #[serde(flatten)]
    pub counts: LineCounts,
    /// File size in bytes
    pub size: u64,
}

impl FileRecord {
    /// Create a new file record.
    pub fn new(path: String, category: String, counts: LineCounts, size: u64) -> Self {
        Self {
            path,
            category,
            counts,
            size,
        }
    }

    /// Size in kilobytes.
    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }
}

/// Running totals for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    /// Number of files
    pub files: u64,
    /// Summed line counts
    #[serde(flatten)]
    pub counts: LineCounts,
    /// Relative paths of the contributing files
    pub file_list: Vec<String>,
}

impl CategoryTotals {
    /// Create empty totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to these totals.
    pub fn add_file(&mut self, record: &FileRecord) {
        self.files += 1;
        self.counts += record.counts;
        self.file_list.push(record.path.clone());
    }
}

/// Running totals for one directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryTotals {
    /// Number of files directly in this directory
    pub files: u64,
    /// Summed line counts
    #[serde(flatten)]
    pub counts: LineCounts,
}

impl DirectoryTotals {
    /// Create empty totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to these totals.
    pub fn add_file(&mut self, record: &FileRecord) {
        self.files += 1;
        self.counts += record.counts;
    }
}

/// Global totals for a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// When the summary was computed
    #[serde(skip)]
    pub timestamp: DateTime<Local>,
    pub total_files: u64,
    pub total_lines: u64,
    pub total_code_lines: u64,
    pub total_comment_lines: u64,
    pub total_blank_lines: u64,
}

impl RunSummary {
    /// Compute the summary from the per-file records.
    pub fn from_records(records: &[FileRecord], timestamp: DateTime<Local>) -> Self {
        let counts = records
            .iter()
            .fold(LineCounts::new(), |acc, r| acc + r.counts);

        Self {
            timestamp,
            total_files: records.len() as u64,
            total_lines: counts.total,
            total_code_lines: counts.code,
            total_comment_lines: counts.comment,
            total_blank_lines: counts.blank,
        }
    }

    /// The summed line counts.
    pub fn counts(&self) -> LineCounts {
        LineCounts {
            total: self.total_lines,
            code: self.total_code_lines,
            comment: self.total_comment_lines,
            blank: self.total_blank_lines,
        }
    }
}
