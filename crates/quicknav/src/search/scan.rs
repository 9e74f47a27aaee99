//! Per-file content scan.

use std::path::{Path, PathBuf};

use memchr::memmem;

/// One content match, indexed 1:1 with the rendered picker items so a
/// selection index maps straight back to its match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub file: PathBuf,
    /// 1-based line number.
    pub line: u32,
    /// 1-based byte offset of the match within the case-folded line.
    /// For queries whose Unicode folding changes byte length the offset can
    /// drift from the original line; a known limitation of the fold-then-
    /// search approach.
    pub column: u32,
    /// The matching line, trimmed.
    pub content: String,
}

/// Scans one file for case-insensitive substring matches of `needle`
/// (already lowercased). Returns at most `max_matches` matches in line
/// order.
///
/// Oversized files, non-regular files, files with null bytes (binary
/// heuristic), and any stat/read failure all yield an empty result; a bad
/// file never aborts the surrounding search.
pub(crate) async fn scan_file(
    path: PathBuf,
    needle: &str,
    max_file_size: u64,
    max_matches: usize,
) -> Vec<SearchMatch> {
    let Ok(metadata) = tokio::fs::metadata(&path).await else {
        return Vec::new();
    };
    if !metadata.is_file() || metadata.len() > max_file_size {
        return Vec::new();
    }

    let Ok(bytes) = tokio::fs::read(&path).await else {
        return Vec::new();
    };
    if memchr::memchr(0, &bytes).is_some() {
        return Vec::new();
    }

    let text = String::from_utf8_lossy(&bytes);
    scan_text(&path, &text, needle, max_matches)
}

fn scan_text(path: &Path, text: &str, needle: &str, max_matches: usize) -> Vec<SearchMatch> {
    let finder = memmem::Finder::new(needle.as_bytes());
    let mut matches = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let folded = line.to_lowercase();
        if let Some(position) = finder.find(folded.as_bytes()) {
            matches.push(SearchMatch {
                file: path.to_path_buf(),
                line: index as u32 + 1,
                column: position as u32 + 1,
                content: line.trim().to_string(),
            });
            if matches.len() >= max_matches {
                break;
            }
        }
    }

    matches
}
