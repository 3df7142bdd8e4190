//! Directory traversal with exclusion rules.
//!
//! Walks a root directory and yields candidate files. Two fixed rule sets
//! apply, plus any glob patterns the caller adds:
//!
//! - Directories whose base name is in [`EXCLUDED_DIRS`] are pruned before
//!   descent, so nothing below them is ever visited.
//! - Files whose name matches [`EXCLUDED_FILE_PATTERNS`] (case-insensitive)
//!   are skipped.
//! - User patterns are matched against the path relative to the root.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::{DirEntry, WalkDir};

use crate::error::CodestatError;
use crate::Result;

/// Directory names never descended into.
pub const EXCLUDED_DIRS: &[&str] = &[
    // version control
    ".git",
    ".svn",
    ".hg",
    // python caches
    "__pycache__",
    ".pytest_cache",
    "node_modules",
    // build output
    "build",
    "dist",
    "out",
    "bin",
    "obj",
    // IDE config
    ".vscode",
    ".idea",
    ".vs",
    // Visual Studio configurations and platforms
    "Debug",
    "Release",
    "x64",
    "x86",
];

/// File name patterns never counted.
pub const EXCLUDED_FILE_PATTERNS: &[&str] = &[
    "*.o",
    "*.obj",
    "*.exe",
    "*.dll",
    "*.so",
    "*.a",
    "*.lib",
    "*.tmp",
    "*.log",
    "*.bak",
    "*~",
    "*.swp",
    "*.DS_Store",
    "Thumbs.db",
];

const NAME_MATCH: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Exclusion rules for a scan.
#[derive(Debug, Clone)]
pub struct ExcludeConfig {
    /// Fixed file name patterns
    name_patterns: Vec<Pattern>,
    /// Extra glob patterns matched against the root-relative path
    pub exclude: Vec<Pattern>,
}

impl Default for ExcludeConfig {
    fn default() -> Self {
        Self {
            name_patterns: EXCLUDED_FILE_PATTERNS
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .collect(),
            exclude: Vec::new(),
        }
    }
}

impl ExcludeConfig {
    /// Create a config holding only the fixed rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        let pat = Pattern::new(pattern).map_err(|e| CodestatError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.exclude.push(pat);
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Check if a directory name is pruned.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        EXCLUDED_DIRS.contains(&name)
    }

    /// Check if a file name matches one of the fixed patterns.
    pub fn is_excluded_name(&self, name: &str) -> bool {
        self.name_patterns
            .iter()
            .any(|p| p.matches_with(name, NAME_MATCH))
    }

    /// Check if a file should be skipped.
    pub fn is_excluded_file(&self, relative: &Path) -> bool {
        let name = relative
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        if self.is_excluded_name(&name) {
            return true;
        }

        let path_str = relative.to_string_lossy();
        self.exclude.iter().any(|p| p.matches(&path_str))
    }
}

/// A file found by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path as found on disk
    pub path: PathBuf,
    /// Path relative to the scan root
    pub relative: PathBuf,
}

impl Candidate {
    /// Parent directory relative to the root (empty for the root itself).
    pub fn relative_dir(&self) -> &Path {
        self.relative.parent().unwrap_or_else(|| Path::new(""))
    }
}

fn keep_entry(entry: &DirEntry, config: &ExcludeConfig) -> bool {
    // Always include the root directory
    if entry.depth() == 0 {
        return true;
    }
    if entry.file_type().is_dir() {
        let name = entry.file_name().to_str().unwrap_or("");
        return !config.is_excluded_dir(name);
    }
    true
}

/// Walk `root` lazily, yielding candidate files in file-name order.
///
/// Unreadable entries are logged and skipped. Links are not followed into
/// directories, but a link to a file yields that file. The caller must check that
/// `root` exists; see [`discover_files`].
pub fn walk<'a>(
    root: &'a Path,
    config: &'a ExcludeConfig,
) -> impl Iterator<Item = Candidate> + 'a {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| keep_entry(e, config))
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::warn!("skipping unreadable entry: {}", err);
                None
            }
        })
        // Symlinked files are counted through their target; symlinked
        // directories are never descended into
        .filter(|entry| {
            entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
        })
        .filter_map(move |entry| {
            let path = entry.into_path();
            let relative = if path == root {
                // Root is a single file
                PathBuf::from(path.file_name()?)
            } else {
                path.strip_prefix(root).ok()?.to_path_buf()
            };
            if config.is_excluded_file(&relative) {
                return None;
            }
            Some(Candidate { path, relative })
        })
}

/// Discover candidate files under a root directory.
///
/// Returns [`CodestatError::PathNotFound`] if `root` does not exist.
pub fn discover_files(root: impl AsRef<Path>, config: &ExcludeConfig) -> Result<Vec<Candidate>> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(CodestatError::PathNotFound(root.to_path_buf()));
    }

    Ok(walk(root, config).collect())
}
