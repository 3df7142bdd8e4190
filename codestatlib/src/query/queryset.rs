//! Query set: aggregates sorted and ready for rendering.
//!
//! Every ordering here is total: ties on line count fall back to the label
//! (or path), so two runs over the same tree produce the same rows.
//!
//! The data pipeline is:
//! 1. Raw Data (CountResult)
//! 2. QuerySet (sorted, top files cut)
//! 3. Text report (formatted strings for display)

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::data::counter::CountResult;
use crate::data::stats::{CategoryTotals, DirectoryTotals, FileRecord, LineCounts, RunSummary};

/// Number of rows in the largest-files table unless told otherwise.
pub const DEFAULT_TOP_FILES: usize = 20;

/// A single labelled row before string formatting.
#[derive(Debug, Clone, Serialize)]
pub struct QueryItem<T> {
    /// Row label (category or directory)
    pub label: String,
    /// Statistics for this item
    pub stats: T,
}

/// Sorted view of a count result.
#[derive(Debug, Clone, Serialize)]
pub struct ReportQuerySet {
    /// When the underlying summary was computed
    pub timestamp: DateTime<Local>,
    /// Global totals
    pub summary: RunSummary,
    /// Categories by descending total lines
    pub categories: Vec<QueryItem<CategoryTotals>>,
    /// Directories by descending total lines
    pub directories: Vec<QueryItem<DirectoryTotals>>,
    /// Requested length of the largest-files list
    pub top: usize,
    /// Largest files by descending total lines, at most `top` entries
    pub top_files: Vec<FileRecord>,
}

impl ReportQuerySet {
    /// Build a query set, keeping at most `top` files in the largest-files list.
    pub fn from_result(result: &CountResult, top: usize) -> Self {
        let categories = sorted_items(
            result
                .by_category
                .iter()
                .map(|(label, stats)| (label, stats, stats.counts)),
        );
        let directories = sorted_items(
            result
                .by_directory
                .iter()
                .map(|(label, stats)| (label, stats, stats.counts)),
        );

        ReportQuerySet {
            timestamp: result.summary.timestamp,
            summary: result.summary.clone(),
            categories,
            directories,
            top,
            top_files: top_files(&result.files, top),
        }
    }

    /// The summed line counts of the run.
    pub fn totals(&self) -> LineCounts {
        self.summary.counts()
    }
}

/// Sort labelled stats by descending total lines, then by label.
fn sorted_items<'a, T, I>(iter: I) -> Vec<QueryItem<T>>
where
    T: Clone + 'a,
    I: Iterator<Item = (&'a String, &'a T, LineCounts)>,
{
    let mut items: Vec<(&String, &T, u64)> = iter
        .map(|(label, stats, counts)| (label, stats, counts.total))
        .collect();
    items.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)));

    items
        .into_iter()
        .map(|(label, stats, _)| QueryItem {
            label: label.clone(),
            stats: stats.clone(),
        })
        .collect()
}

/// The `top` largest files by total lines, ties broken by path.
pub fn top_files(files: &[FileRecord], top: usize) -> Vec<FileRecord> {
    let mut sorted: Vec<&FileRecord> = files.iter().collect();
    sorted.sort_by(|a, b| {
        b.counts
            .total
            .cmp(&a.counts.total)
            .then_with(|| a.path.cmp(&b.path))
    });
    sorted.into_iter().take(top).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::counter::Accumulator;
    use std::path::PathBuf;

    fn record(path: &str, category: &str, total: u64) -> FileRecord {
        let counts = LineCounts {
            total,
            code: total,
            comment: 0,
            blank: 0,
        };
        FileRecord::new(path.to_string(), category.to_string(), counts, total * 10)
    }

    fn sample_result() -> CountResult {
        let mut acc = Accumulator::new();
        acc.add(record("a.c", "C source", 10), "(root)".into());
        acc.add(record("src/b.cpp", "C++ source", 30), "src".into());
        acc.add(record("src/c.cpp", "C++ source", 20), "src".into());
        acc.add(record("lib/d.py", "Python", 40), "lib".into());
        acc.add(record("lib/e.py", "Python", 10), "lib".into());
        acc.finish(PathBuf::from("."))
    }

    #[test]
    fn test_categories_sorted_desc() {
        let qs = ReportQuerySet::from_result(&sample_result(), DEFAULT_TOP_FILES);
        let labels: Vec<&str> = qs.categories.iter().map(|i| i.label.as_str()).collect();

        // Python and C++ tie at 50; the label decides
        assert_eq!(labels, vec!["C++ source", "Python", "C source"]);
        assert_eq!(qs.categories[0].stats.file_list, vec!["src/b.cpp", "src/c.cpp"]);
    }

    #[test]
    fn test_directories_sorted_desc() {
        let qs = ReportQuerySet::from_result(&sample_result(), DEFAULT_TOP_FILES);
        let labels: Vec<&str> = qs.directories.iter().map(|i| i.label.as_str()).collect();

        // lib and src tie at 50
        assert_eq!(labels, vec!["lib", "src", "(root)"]);
    }

    #[test]
    fn test_top_files_ties_and_limit() {
        let result = sample_result();
        let top = top_files(&result.files, 3);
        let paths: Vec<&str> = top.iter().map(|f| f.path.as_str()).collect();

        assert_eq!(paths, vec!["lib/d.py", "src/b.cpp", "src/c.cpp"]);

        let all = top_files(&result.files, DEFAULT_TOP_FILES);
        assert_eq!(all.len(), 5);
        // a.c and lib/e.py tie at 10
        assert_eq!(all[3].path, "a.c");
        assert_eq!(all[4].path, "lib/e.py");
        assert!(all
            .windows(2)
            .all(|w| w[0].counts.total >= w[1].counts.total));
    }

    #[test]
    fn test_top_files_empty() {
        assert!(top_files(&[], DEFAULT_TOP_FILES).is_empty());
    }
}
