//! Initial browsing root resolution.

use std::path::PathBuf;

use crate::host::HostEnv;

/// Resolves where a browse session starts. Total: falls back through the
/// focused document's directory, the workspace root, the home directory,
/// and finally the filesystem root.
pub fn resolve_start_path(host: &dyn HostEnv) -> PathBuf {
    if let Some(document) = host.active_document() {
        if document.is_file() {
            if let Some(parent) = document.parent() {
                return parent.to_path_buf();
            }
        }
    }

    if let Some(root) = host.workspace_root() {
        return root;
    }

    if let Some(home) = host.home_dir() {
        return home;
    }

    PathBuf::from(std::path::MAIN_SEPARATOR_STR)
}
