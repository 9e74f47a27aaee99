//! Classification of raw input-field transitions.
//!
//! The browse picker re-purposes its text field for three things:
//! navigating up, descending through typed path segments, and filtering
//! the current listing. Classification works on explicit
//! `(previous, current)` value pairs so backspace-past-blank detection is
//! an input transition rather than scattered comparisons against a magic
//! string.

use crate::listing::DirectoryEntry;

/// Placeholder written into the input field after every directory change.
/// Distinguishes "field explicitly cleared by backspace" (was the sentinel,
/// now empty) from "field never touched".
pub const BLANK_SENTINEL: &str = " ";

/// What one input transition asks the navigator to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Move to the parent of the current directory.
    AscendParent,
    /// Descend into a cached subdirectory; `remainder` is what is left of
    /// the typed path once the matched segment is consumed.
    Descend { entry: String, remainder: String },
    /// Filter the cached listing.
    Filter(String),
}

/// Strips the leading blank sentinel, if present.
pub fn strip_sentinel(value: &str) -> &str {
    value.strip_prefix(BLANK_SENTINEL).unwrap_or(value)
}

/// Classifies one `(previous, current)` input transition against the
/// cached entries of the current directory.
///
/// Precedence: up-navigation, then path traversal, then filtering.
pub fn classify(previous: &str, current: &str, entries: &[DirectoryEntry]) -> InputCommand {
    // Backspacing past the sentinel empties the field.
    if current.is_empty() && previous == BLANK_SENTINEL {
        return InputCommand::AscendParent;
    }

    let text = strip_sentinel(current);
    if text == "-" {
        return InputCommand::AscendParent;
    }

    if let Some(separator) = text.find(std::path::is_separator) {
        let (first, rest) = text.split_at(separator);
        let remainder = &rest[1..];
        if !first.is_empty() {
            let matched = entries
                .iter()
                .find(|entry| entry.is_dir && entry.name.eq_ignore_ascii_case(first));
            if let Some(entry) = matched {
                return InputCommand::Descend {
                    entry: entry.name.clone(),
                    remainder: remainder.to_string(),
                };
            }
        }
    }

    InputCommand::Filter(text.to_string())
}

/// Filters the cached listing case-insensitively.
///
/// Hidden entries (leading `.`) are excluded unless the filter itself
/// starts with `.`, which flips the view to hidden entries only.
pub fn filter_entries(entries: &[DirectoryEntry], filter: &str) -> Vec<DirectoryEntry> {
    let show_hidden = filter.starts_with('.');
    let needle = filter.to_ascii_lowercase();

    entries
        .iter()
        .filter(|entry| entry.is_hidden() == show_hidden)
        .filter(|entry| {
            needle.is_empty() || entry.name.to_ascii_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
