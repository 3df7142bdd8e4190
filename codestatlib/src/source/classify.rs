//! File classification by name and extension.
//!
//! Every scanned file maps to exactly one category label. Three disjoint
//! lookup tables drive it:
//!
//! - **Source**: programming-language files (`.cpp`, `.rs`, `.py`, ...)
//! - **Config**: build and configuration files (`.cmake`, `.json`, `.toml`, ...)
//! - **Docs**: documentation files (`.md`, `.rst`, ...), only counted on request
//!
//! `CMakeLists.txt` is special-cased to the CMake category regardless of its
//! `.txt` extension. Anything else falls back to `other(.ext)`.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Build manifest file name that gets its own category.
pub const CMAKE_LISTS: &str = "CMakeLists.txt";

/// Category label used for `CMakeLists.txt` and `.cmake` files.
pub const CMAKE_LABEL: &str = "CMake file";

/// Source-code extensions and their labels.
pub const SOURCE_EXTENSIONS: &[(&str, &str)] = &[
    (".cpp", "C++ source"),
    (".cxx", "C++ source"),
    (".cc", "C++ source"),
    (".c", "C source"),
    (".h", "C/C++ header"),
    (".hpp", "C++ header"),
    (".hxx", "C++ header"),
    (".py", "Python"),
    (".js", "JavaScript"),
    (".ts", "TypeScript"),
    (".java", "Java"),
    (".cs", "C#"),
    (".go", "Go"),
    (".rs", "Rust"),
    (".php", "PHP"),
    (".rb", "Ruby"),
    (".swift", "Swift"),
    (".kt", "Kotlin"),
    (".scala", "Scala"),
];

/// Configuration extensions and their labels.
pub const CONFIG_EXTENSIONS: &[(&str, &str)] = &[
    (".cmake", CMAKE_LABEL),
    (".txt", "CMake/text file"),
    (".pro", "Qt project"),
    (".pri", "Qt include"),
    (".qrc", "Qt resource"),
    (".ui", "Qt UI form"),
    (".json", "JSON config"),
    (".xml", "XML config"),
    (".yaml", "YAML config"),
    (".yml", "YAML config"),
    (".toml", "TOML config"),
    (".ini", "INI config"),
    (".conf", "Config file"),
    (".cfg", "Config file"),
];

/// Documentation extensions and their labels.
///
/// `.txt` also appears in [`CONFIG_EXTENSIONS`], which wins.
pub const DOC_EXTENSIONS: &[(&str, &str)] = &[
    (".md", "Markdown"),
    (".rst", "reStructuredText"),
    (".txt", "Text document"),
    (".adoc", "AsciiDoc"),
];

/// Extensions whose files use `//` and `/* */` comments.
const C_STYLE_EXTENSIONS: &[&str] = &[
    ".cpp", ".cxx", ".cc", ".c", ".h", ".hpp", ".hxx", ".js", ".ts", ".java", ".cs", ".go", ".rs",
    ".php", ".swift", ".kt", ".scala",
];

/// Which table a category came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Source,
    Config,
    Doc,
    Other,
}

/// Comment rules applied by the line analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSyntax {
    /// `//` line comments and `/* ... */` block comments
    CStyle,
    /// `#` line comments, plus lines opening with `"""` or `'''`
    Python,
    /// `#` line comments only
    Hash,
    /// Every non-blank line is code
    None,
}

/// The classification of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Human-readable label (e.g. "C++ source", "other(.xyz)")
    pub label: String,
    /// Table the label came from
    pub kind: CategoryKind,
    /// Comment rules for the analyzer
    pub syntax: CommentSyntax,
}

impl Category {
    /// Whether the file is eligible for line analysis.
    ///
    /// Docs are only counted when `include_docs` is set.
    pub fn is_countable(&self, include_docs: bool) -> bool {
        match self.kind {
            CategoryKind::Source | CategoryKind::Config => true,
            CategoryKind::Doc => include_docs,
            CategoryKind::Other => false,
        }
    }
}

/// Lower-cased extension with its leading dot, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

fn lookup(table: &[(&str, &'static str)], ext: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, label)| *label)
}

/// Comment syntax for a file, from its name and extension.
pub fn comment_syntax(path: &Path) -> CommentSyntax {
    let ext = extension_of(path);
    if C_STYLE_EXTENSIONS.contains(&ext.as_str()) {
        CommentSyntax::CStyle
    } else if ext == ".py" {
        CommentSyntax::Python
    } else if ext == ".cmake" || is_cmake_lists(path) {
        CommentSyntax::Hash
    } else {
        CommentSyntax::None
    }
}

fn is_cmake_lists(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == CMAKE_LISTS)
}

/// Classify a file path into exactly one category.
///
/// # Example
///
/// ```rust
/// use codestatlib::source::classify::{classify, CategoryKind};
/// use std::path::Path;
///
/// let cat = classify(Path::new("src/main.cpp"));
/// assert_eq!(cat.label, "C++ source");
/// assert_eq!(cat.kind, CategoryKind::Source);
///
/// let other = classify(Path::new("logo.PNG"));
/// assert_eq!(other.label, "other(.png)");
/// ```
pub fn classify(path: &Path) -> Category {
    let syntax = comment_syntax(path);

    if is_cmake_lists(path) {
        return Category {
            label: CMAKE_LABEL.to_string(),
            kind: CategoryKind::Config,
            syntax,
        };
    }

    let ext = extension_of(path);
    let tables = [
        (SOURCE_EXTENSIONS, CategoryKind::Source),
        (CONFIG_EXTENSIONS, CategoryKind::Config),
        (DOC_EXTENSIONS, CategoryKind::Doc),
    ];

    for (table, kind) in tables {
        if let Some(label) = lookup(table, &ext) {
            return Category {
                label: label.to_string(),
                kind,
                syntax,
            };
        }
    }

    Category {
        label: format!("other({})", ext),
        kind: CategoryKind::Other,
        syntax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_extensions() {
        assert_eq!(classify(Path::new("a.cpp")).label, "C++ source");
        assert_eq!(classify(Path::new("a.cc")).label, "C++ source");
        assert_eq!(classify(Path::new("a.h")).label, "C/C++ header");
        assert_eq!(classify(Path::new("lib.rs")).kind, CategoryKind::Source);
        assert_eq!(classify(Path::new("tool.py")).label, "Python");
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(classify(Path::new("MAIN.CPP")).label, "C++ source");
        assert_eq!(comment_syntax(Path::new("MAIN.CPP")), CommentSyntax::CStyle);
    }

    #[test]
    fn test_cmake_lists_override() {
        let cat = classify(Path::new("src/CMakeLists.txt"));
        assert_eq!(cat.label, CMAKE_LABEL);
        assert_eq!(cat.kind, CategoryKind::Config);
        assert_eq!(cat.syntax, CommentSyntax::Hash);

        // Any other .txt is the config-table text label
        let notes = classify(Path::new("notes.txt"));
        assert_eq!(notes.label, "CMake/text file");
        assert_eq!(notes.syntax, CommentSyntax::None);
    }

    #[test]
    fn test_docs_only_countable_on_request() {
        let readme = classify(Path::new("README.md"));
        assert_eq!(readme.kind, CategoryKind::Doc);
        assert!(!readme.is_countable(false));
        assert!(readme.is_countable(true));
    }

    #[test]
    fn test_other_fallback() {
        let cat = classify(Path::new("image.png"));
        assert_eq!(cat.label, "other(.png)");
        assert!(!cat.is_countable(true));

        let bare = classify(Path::new("Makefile"));
        assert_eq!(bare.label, "other()");
        assert!(!bare.is_countable(true));
    }

    #[test]
    fn test_comment_syntax_families() {
        assert_eq!(comment_syntax(Path::new("x.go")), CommentSyntax::CStyle);
        assert_eq!(comment_syntax(Path::new("x.py")), CommentSyntax::Python);
        assert_eq!(comment_syntax(Path::new("x.cmake")), CommentSyntax::Hash);
        // Ruby is a source file but has no comment rules
        assert_eq!(comment_syntax(Path::new("x.rb")), CommentSyntax::None);
        assert_eq!(comment_syntax(Path::new("x.toml")), CommentSyntax::None);
    }

    #[test]
    fn test_tables_are_disjoint_except_txt() {
        for (ext, _) in SOURCE_EXTENSIONS {
            assert!(lookup(CONFIG_EXTENSIONS, ext).is_none());
            assert!(lookup(DOC_EXTENSIONS, ext).is_none());
        }
        for (ext, _) in CONFIG_EXTENSIONS {
            if *ext != ".txt" {
                assert!(lookup(DOC_EXTENSIONS, ext).is_none());
            }
        }
    }
}
