//! Filesystem mutations behind the browse picker.
//!
//! Callers check existence and decide intent; these helpers only perform
//! the mutation and report the `io::Error` for the caller to surface.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Creates `path` and all missing intermediate directories.
pub(crate) fn create_directory(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Creates an empty file at `path`, creating missing parent directories
/// first. Fails if the file already exists.
pub(crate) fn create_file(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    Ok(())
}

/// Removes an entry: recursively for directories, a single unlink for
/// files.
pub(crate) fn remove_entry(path: &Path, is_dir: bool) -> io::Result<()> {
    if is_dir {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Renames `old_name` inside `dir` to `new_name`, returning the new path.
pub(crate) fn rename_entry(dir: &Path, old_name: &str, new_name: &str) -> io::Result<PathBuf> {
    let target = dir.join(new_name);
    fs::rename(dir.join(old_name), &target)?;
    Ok(target)
}

/// Byte range of `name` to pre-select in a rename prompt: the stem,
/// excluding the extension.
pub(crate) fn stem_selection(name: &str) -> (usize, usize) {
    let stem_len = Path::new(name)
        .file_stem()
        .map(|stem| stem.len())
        .unwrap_or(name.len());
    (0, stem_len)
}
