//! Host-side collaborators the pickers are built against.
//!
//! The editor owns the actual quick-pick widget, clipboard, dialogs, and
//! document state; the engines only see these traits. Implementations are
//! expected to be cheap to call from the UI event stream.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// One row in a picker's item list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerItem {
    pub label: String,
    pub description: Option<String>,
    pub detail: Option<String>,
}

impl PickerItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// The abstract quick-pick surface: a text input, a filterable list, and
/// title/busy indicators. Events flow the other way: the host forwards
/// value-changed/accept/button events into the controllers.
pub trait Picker: Send {
    fn set_title(&mut self, title: &str);
    fn set_busy(&mut self, busy: bool);
    fn set_placeholder(&mut self, text: &str);
    fn set_items(&mut self, items: Vec<PickerItem>);
    /// Overrides the input field. The host must report the new value back
    /// through its value-changed event so chained traversal keeps going.
    fn set_value(&mut self, value: &str);
    fn show(&mut self);
    fn hide(&mut self);
}

/// Editor environment queries and interactive primitives.
#[async_trait]
pub trait HostEnv: Send + Sync {
    /// Path of the focused document, if it is backed by a real file.
    fn active_document(&self) -> Option<PathBuf>;

    /// First workspace root, if a workspace is open.
    fn workspace_root(&self) -> Option<PathBuf>;

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn write_clipboard(&self, text: &str);

    /// Transient, non-modal message surface for user-actionable failures.
    fn show_message(&self, message: &str);

    /// Modal yes/no confirmation.
    async fn confirm(&self, prompt: &str) -> bool;

    /// Single-line input prompt. `selection` is the byte range of `initial`
    /// to pre-select. Returns `None` when dismissed.
    async fn prompt_input(&self, initial: &str, selection: (usize, usize)) -> Option<String>;

    /// Opens the file in the editor.
    async fn open_file(&self, path: &Path);
}
