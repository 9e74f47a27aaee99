//! Candidate-file enumeration for a search session.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use crate::exclude::ExcludeSpec;

/// Walks `root` breadth-first and returns up to `max_files` file paths,
/// honoring the exclude spec. Children are sorted per directory so the
/// enumeration order is deterministic for a given tree.
///
/// Unreadable directories and entries are skipped; enumeration itself
/// never fails.
pub(crate) fn enumerate_candidates(
    root: &Path,
    exclude: &ExcludeSpec,
    max_files: usize,
) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut errors = 0usize;
    let mut queue = VecDeque::new();
    queue.push_back(root.to_path_buf());

    'outer: while let Some(current) = queue.pop_front() {
        let reader = match fs::read_dir(&current) {
            Ok(reader) => reader,
            Err(_) => {
                errors += 1;
                continue;
            }
        };

        let mut children: Vec<PathBuf> = Vec::new();
        for entry in reader {
            match entry {
                Ok(entry) => children.push(entry.path()),
                Err(_) => errors += 1,
            }
        }
        children.sort();

        for child in children {
            let Ok(relative) = child.strip_prefix(root) else {
                continue;
            };
            let Ok(file_type) = fs::symlink_metadata(&child).map(|m| m.file_type()) else {
                errors += 1;
                continue;
            };

            if file_type.is_dir() {
                if !exclude.is_excluded_dir(relative) {
                    queue.push_back(child);
                }
            } else if file_type.is_file() {
                if exclude.is_excluded(relative) {
                    continue;
                }
                files.push(child);
                if files.len() >= max_files {
                    break 'outer;
                }
            }
            // Symlinks are neither followed nor scanned.
        }
    }

    log::debug!(
        "enumerated {} candidate files under {} ({errors} errors)",
        files.len(),
        root.display()
    );
    files
}
