//! Line classification for a single file.
//!
//! Lines are classified by prefix heuristics after trimming whitespace, not
//! by a real lexer:
//!
//! 1. An empty line is **blank**.
//! 2. While inside a block comment, the line is a **comment**; a `*/` on it
//!    closes the block.
//! 3. C-style files: a line starting with `/*` is a comment and opens a block
//!    unless `*/` also appears on it; a line starting with `//` is a comment.
//! 4. Python files: a line starting with `#`, `"""` or `'''` is a comment.
//!    Docstring bodies are not tracked, so only the opening line counts.
//! 5. CMake files: a line starting with `#` is a comment.
//! 6. Everything else is **code**.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, GBK, UTF_8, WINDOWS_1252};

use crate::error::CodestatError;
use crate::source::classify::{comment_syntax, CommentSyntax};
use crate::Result;

use super::stats::LineCounts;

/// Text encodings tried in order; the first clean decode wins.
///
/// GBK is a superset of GB2312, so one attempt covers both.
pub const ENCODINGS: &[&Encoding] = &[UTF_8, GBK, WINDOWS_1252];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const BLOCK_OPEN: &str = "/*";
const BLOCK_CLOSE: &str = "*/";
const LINE_COMMENT: &str = "//";
const HASH_COMMENT: &str = "#";
const TRIPLE_QUOTES: [&str; 2] = ["\"\"\"", "'''"];

/// Decode raw file content with the first encoding that accepts it.
///
/// Returns `None` if every attempt hits malformed input.
pub fn decode_content(bytes: &[u8]) -> Option<Cow<'_, str>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    ENCODINGS
        .iter()
        .find_map(|encoding| encoding.decode_without_bom_handling_and_without_replacement(bytes))
}

/// Split text into lines, treating `\n`, `\r\n` and a lone `\r` as breaks.
///
/// A trailing line break does not start a new line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\n', '\r']) {
            Some(idx) => {
                let line = &rest[..idx];
                let skip = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + skip..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// Classify lines and return the counts.
///
/// # Example
///
/// ```rust
/// use codestatlib::data::analyzer::analyze_lines;
/// use codestatlib::source::classify::CommentSyntax;
///
/// let counts = analyze_lines(["# header", "", "print(1)"], CommentSyntax::Python);
/// assert_eq!((counts.total, counts.code, counts.comment, counts.blank), (3, 1, 1, 1));
/// ```
pub fn analyze_lines<'a, I>(lines: I, syntax: CommentSyntax) -> LineCounts
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = LineCounts::new();
    let mut in_block = false;

    for raw in lines {
        counts.total += 1;
        let line = raw.trim();

        if line.is_empty() {
            counts.blank += 1;
            continue;
        }

        if in_block {
            counts.comment += 1;
            if line.contains(BLOCK_CLOSE) {
                in_block = false;
            }
            continue;
        }

        let is_comment = match syntax {
            CommentSyntax::CStyle => {
                if line.starts_with(BLOCK_OPEN) {
                    in_block = !line.contains(BLOCK_CLOSE);
                    true
                } else {
                    line.starts_with(LINE_COMMENT)
                }
            }
            CommentSyntax::Python => {
                line.starts_with(HASH_COMMENT)
                    || TRIPLE_QUOTES.iter().any(|q| line.starts_with(q))
            }
            CommentSyntax::Hash => line.starts_with(HASH_COMMENT),
            CommentSyntax::None => false,
        };

        if is_comment {
            counts.comment += 1;
        } else {
            counts.code += 1;
        }
    }

    counts
}

/// Analyze text content using the comment syntax of `path`.
pub fn analyze_str(text: &str, path: &Path) -> LineCounts {
    analyze_lines(split_lines(text), comment_syntax(path))
}

/// Read, decode and analyze one file.
///
/// Read failures yield [`CodestatError::FileRead`] and undecodable content
/// yields [`CodestatError::Decode`]; both only concern this file.
pub fn analyze_file(path: impl AsRef<Path>) -> Result<LineCounts> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| CodestatError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let text = decode_content(&bytes).ok_or_else(|| CodestatError::Decode(path.to_path_buf()))?;

    Ok(analyze_str(&text, path))
}
