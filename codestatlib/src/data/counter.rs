//! High-level counting API.
//!
//! This module drives the pipeline: traversal, classification, line analysis
//! and aggregation. The [`Accumulator`] is the only mutable state of a run; it
//! is owned by [`count_directory`] and touched by its loop alone.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Local;
use serde::Serialize;

use crate::error::CodestatError;
use crate::source::classify::classify;
use crate::source::exclude::{walk, Candidate, ExcludeConfig};
use crate::Result;

use super::analyzer::analyze_file;
use super::stats::{
    CategoryTotals, DirectoryTotals, FileRecord, LineCounts, RunSummary, ROOT_DIR_LABEL,
};

/// Options for a scan.
#[derive(Debug, Clone, Default)]
pub struct CountOptions {
    /// Also count documentation files
    pub include_docs: bool,
    /// Exclusion rules
    pub exclude: ExcludeConfig,
    /// Set from outside to abort the scan
    pub interrupt: Option<Arc<AtomicBool>>,
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include documentation files.
    pub fn include_docs(mut self, include: bool) -> Self {
        self.include_docs = include;
        self
    }

    /// Set exclusion rules.
    pub fn exclude(mut self, exclude: ExcludeConfig) -> Self {
        self.exclude = exclude;
        self
    }

    /// Abort the scan once `flag` is set.
    pub fn interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    fn is_interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

/// Map a root-relative directory to its aggregate key.
pub fn directory_label(relative_dir: &Path) -> String {
    if relative_dir.as_os_str().is_empty() {
        ROOT_DIR_LABEL.to_string()
    } else {
        relative_dir.to_string_lossy().to_string()
    }
}

/// Running totals for a single forward pass over the file set.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    records: Vec<FileRecord>,
    by_category: BTreeMap<String, CategoryTotals>,
    by_directory: BTreeMap<String, DirectoryTotals>,
    skipped: usize,
}

impl Accumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one analyzed file. Empty files are ignored.
    pub fn add(&mut self, record: FileRecord, directory: String) {
        if record.counts.is_empty() {
            return;
        }

        self.by_category
            .entry(record.category.clone())
            .or_default()
            .add_file(&record);
        self.by_directory
            .entry(directory)
            .or_default()
            .add_file(&record);
        self.records.push(record);
    }

    /// Note a file that could not be read or decoded.
    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    /// Take the outcome of analyzing one file.
    ///
    /// Per-file failures are logged and counted as skipped; any other error
    /// is returned and ends the run.
    pub fn record(&mut self, outcome: Result<FileRecord>, directory: String) -> Result<()> {
        match outcome {
            Ok(record) => {
                tracing::debug!(
                    "{} ({}) - {} lines",
                    record.path,
                    record.category,
                    record.counts.total
                );
                self.add(record, directory);
                Ok(())
            }
            Err(e) if e.is_per_file() => {
                tracing::warn!("{}", e);
                self.skip();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Number of files recorded so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finish the run and compute the summary.
    pub fn finish(self, root: PathBuf) -> CountResult {
        let summary = RunSummary::from_records(&self.records, Local::now());
        CountResult {
            root,
            summary,
            by_category: self.by_category,
            by_directory: self.by_directory,
            files: self.records,
            skipped: self.skipped,
        }
    }
}

/// Result of scanning a directory.
#[derive(Debug, Clone, Serialize)]
pub struct CountResult {
    /// Root that was scanned
    pub root: PathBuf,
    /// Global totals
    pub summary: RunSummary,
    /// Totals keyed by category label
    pub by_category: BTreeMap<String, CategoryTotals>,
    /// Totals keyed by directory label
    pub by_directory: BTreeMap<String, DirectoryTotals>,
    /// Per-file records in traversal order
    pub files: Vec<FileRecord>,
    /// Files skipped after a read or decode failure
    pub skipped: usize,
}

/// Analyze one candidate into a record.
fn analyze_candidate(candidate: &Candidate, label: String) -> Result<FileRecord> {
    let counts = analyze_file(&candidate.path)?;
    let size = std::fs::metadata(&candidate.path)
        .map(|m| m.len())
        .map_err(|e| CodestatError::FileRead {
            path: candidate.path.clone(),
            source: e,
        })?;

    Ok(FileRecord::new(
        candidate.relative.to_string_lossy().to_string(),
        label,
        counts,
        size,
    ))
}

/// Count lines in every countable file under a directory.
///
/// Unreadable or undecodable files are logged and skipped. The scan stops
/// with [`CodestatError::Interrupted`] once the interrupt flag is set.
///
/// # Example
///
/// ```rust
/// use codestatlib::{count_directory, CountOptions};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::create_dir(dir.path().join("src")).unwrap();
/// fs::write(dir.path().join("src/main.c"), "// entry\nint main() {}\n").unwrap();
/// fs::write(dir.path().join("notes.md"), "# Notes\n").unwrap();
///
/// let result = count_directory(dir.path(), &CountOptions::new()).unwrap();
/// assert_eq!(result.summary.total_files, 1);
/// assert_eq!(result.summary.total_comment_lines, 1);
///
/// let with_docs = count_directory(dir.path(), &CountOptions::new().include_docs(true)).unwrap();
/// assert_eq!(with_docs.summary.total_files, 2);
/// ```
pub fn count_directory(path: impl AsRef<Path>, options: &CountOptions) -> Result<CountResult> {
    let root = path.as_ref();

    if !root.exists() {
        return Err(CodestatError::PathNotFound(root.to_path_buf()));
    }

    tracing::debug!("walking {}", root.display());
    let mut acc = Accumulator::new();

    for candidate in walk(root, &options.exclude) {
        if options.is_interrupted() {
            return Err(CodestatError::Interrupted);
        }

        let category = classify(&candidate.path);
        if !category.is_countable(options.include_docs) {
            continue;
        }

        acc.record(
            analyze_candidate(&candidate, category.label),
            directory_label(candidate.relative_dir()),
        )?;
    }

    if options.is_interrupted() {
        return Err(CodestatError::Interrupted);
    }

    let result = acc.finish(root.to_path_buf());
    tracing::info!(
        "Scan complete: {} files, {} lines",
        result.summary.total_files,
        result.summary.total_lines
    );
    Ok(result)
}

/// Count lines in a single file.
///
/// # Example
///
/// ```rust
/// use codestatlib::count_file;
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// let file_path = dir.path().join("tool.py");
/// fs::write(&file_path, "# header comment\n\nprint(1)\n").unwrap();
///
/// let counts = count_file(&file_path).unwrap();
/// assert_eq!((counts.total, counts.code, counts.comment, counts.blank), (3, 1, 1, 1));
/// ```
pub fn count_file(path: impl AsRef<Path>) -> Result<LineCounts> {
    analyze_file(path)
}
