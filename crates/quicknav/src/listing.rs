//! Single-level directory listing for the browse picker.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use crate::error::{NavError, Result};

/// One directory entry as the browse picker sees it. Rebuilt on every
/// directory read; never cached across directory changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirectoryEntry {
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Reads one directory level and returns its entries, directories first,
/// each group sorted lexicographically ascending by name.
///
/// An unreadable directory is an error the caller surfaces; entries that
/// fail to stat individually are skipped.
pub fn list_directory(dir: &Path) -> Result<Vec<DirectoryEntry>> {
    let reader = fs::read_dir(dir).map_err(|source| NavError::DirUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for entry in reader {
        let Ok(entry) = entry else {
            continue;
        };
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        entries.push(DirectoryEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: file_type.is_dir(),
        });
    }

    entries.sort_by(compare_entries);
    Ok(entries)
}

fn compare_entries(left: &DirectoryEntry, right: &DirectoryEntry) -> Ordering {
    match (left.is_dir, right.is_dir) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => left.name.cmp(&right.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn directories_sort_before_files() {
        let temp = TempDir::new().unwrap();
        File::create(temp.path().join("a.ts")).unwrap();
        fs::create_dir(temp.path().join("zeta")).unwrap();
        fs::create_dir(temp.path().join("alpha")).unwrap();
        File::create(temp.path().join("b.rs")).unwrap();

        let names: Vec<_> = list_directory(temp.path())
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(names, vec!["alpha", "zeta", "a.ts", "b.rs"]);
    }

    #[test]
    fn ordering_within_a_group_is_case_sensitive() {
        let temp = TempDir::new().unwrap();
        File::create(temp.path().join("a.ts")).unwrap();
        File::create(temp.path().join("B.ts")).unwrap();

        let names: Vec<_> = list_directory(temp.path())
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        // Uppercase sorts before lowercase in byte order.
        assert_eq!(names, vec!["B.ts", "a.ts"]);
    }

    #[test]
    fn empty_directory_lists_empty() {
        let temp = TempDir::new().unwrap();
        assert!(list_directory(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn unreadable_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");
        let error = list_directory(&missing).expect_err("missing dir should fail");
        assert!(matches!(error, NavError::DirUnreadable { .. }));
    }

    #[test]
    fn hidden_entries_are_listed_and_flagged() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        File::create(temp.path().join("a.ts")).unwrap();

        let entries = list_directory(temp.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_hidden());
        assert_eq!(entries[0].name, ".git");
    }
}
