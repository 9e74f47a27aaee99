//! The directory-browsing session state machine.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::NavError;
use crate::event::{NavEvent, NavEventSender};
use crate::host::HostEnv;
use crate::listing::{list_directory, DirectoryEntry};
use crate::navigator::input::{classify, filter_entries, strip_sentinel, InputCommand};
use crate::navigator::ops;
use crate::navigator::BLANK_SENTINEL;
use crate::start_path::resolve_start_path;

/// What the browse picker should show after an input transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavUpdate {
    /// Entries to render, already filtered.
    pub visible: Vec<DirectoryEntry>,
    /// When set, the host must write this into the input field (and echo
    /// it back through its value-changed event, which keeps chained
    /// traversal going).
    pub reset_value: Option<String>,
}

/// Result of an accept gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptOutcome {
    /// Descended into a directory; the session continues.
    Descended,
    /// Opened a file; the session is over.
    Opened(PathBuf),
    /// Nothing happened (blank input, or a failed mutation already
    /// surfaced to the host).
    Unchanged,
}

/// Stateful directory browser behind the browse picker.
///
/// All operations take `&mut self`, so mutations are serialized by
/// construction; a second mutation cannot start while one is in flight.
pub struct DirectoryNavigator<H: HostEnv> {
    host: Arc<H>,
    events: NavEventSender,
    current_dir: PathBuf,
    entries: Vec<DirectoryEntry>,
    previous_input: String,
}

impl<H: HostEnv> DirectoryNavigator<H> {
    /// Opens a session at the host's start path and reads its entries.
    pub fn start(host: Arc<H>, events: NavEventSender) -> Self {
        let current_dir = resolve_start_path(host.as_ref());
        let mut navigator = Self {
            host,
            events,
            current_dir,
            entries: Vec::new(),
            previous_input: BLANK_SENTINEL.to_string(),
        };
        navigator.refresh();
        navigator
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Applies one input transition and returns what to display.
    ///
    /// Directory changes re-read entries synchronously and reset the input
    /// to the blank sentinel before the update is returned, so filtering
    /// never runs against a stale cache.
    pub fn handle_input_changed(&mut self, current: &str) -> NavUpdate {
        let previous = std::mem::replace(&mut self.previous_input, current.to_string());

        match classify(&previous, current, &self.entries) {
            InputCommand::AscendParent => {
                self.ascend();
                NavUpdate {
                    visible: filter_entries(&self.entries, ""),
                    reset_value: Some(BLANK_SENTINEL.to_string()),
                }
            }
            InputCommand::Descend { entry, remainder } => {
                let target = self.current_dir.join(&entry);
                self.change_dir(target);
                let reseed = format!("{BLANK_SENTINEL}{remainder}");
                self.previous_input = reseed.clone();
                NavUpdate {
                    visible: filter_entries(&self.entries, ""),
                    reset_value: Some(reseed),
                }
            }
            InputCommand::Filter(filter) => NavUpdate {
                visible: filter_entries(&self.entries, &filter),
                reset_value: None,
            },
        }
    }

    /// Confirms the current selection.
    ///
    /// A highlighted entry is descended into or opened. Without a
    /// highlight, non-blank input is a create request: an existing target
    /// is navigated/opened instead, a trailing separator creates and
    /// enters a directory, and anything else creates an empty file (plus
    /// missing parents) and opens it.
    pub async fn accept(&mut self, highlighted: Option<&str>, raw_input: &str) -> AcceptOutcome {
        if let Some(name) = highlighted {
            let Some(entry) = self
                .entries
                .iter()
                .find(|entry| entry.name == name)
                .cloned()
            else {
                return AcceptOutcome::Unchanged;
            };
            let target = self.current_dir.join(&entry.name);
            return if entry.is_dir {
                self.change_dir(target);
                AcceptOutcome::Descended
            } else {
                self.open_file(target).await
            };
        }

        let text = strip_sentinel(raw_input).trim();
        if text.is_empty() {
            return AcceptOutcome::Unchanged;
        }

        let target = self.current_dir.join(text);
        if target.exists() {
            return if target.is_dir() {
                self.change_dir(target);
                AcceptOutcome::Descended
            } else {
                self.open_file(target).await
            };
        }

        if text.ends_with(std::path::is_separator) {
            match ops::create_directory(&target) {
                Ok(()) => {
                    self.change_dir(target);
                    AcceptOutcome::Descended
                }
                Err(error) => self.surface_failure("create directory", &target, &error),
            }
        } else {
            match ops::create_file(&target) {
                Ok(()) => self.open_file(target).await,
                Err(error) => self.surface_failure("create file", &target, &error),
            }
        }
    }

    /// Deletes the named entry after a modal confirmation.
    ///
    /// Failures are surfaced and leave both the filesystem intent and the
    /// cached listing untouched.
    pub async fn delete_entry(&mut self, name: &str) {
        let Some(entry) = self.entries.iter().find(|entry| entry.name == name).cloned() else {
            return;
        };
        let prompt = if entry.is_dir {
            format!("Delete folder '{name}' and all of its contents?")
        } else {
            format!("Delete file '{name}'?")
        };
        if !self.host.confirm(&prompt).await {
            return;
        }

        let target = self.current_dir.join(&entry.name);
        match ops::remove_entry(&target, entry.is_dir) {
            Ok(()) => self.refresh(),
            Err(error) => {
                self.surface_failure("delete", &target, &error);
            }
        }
    }

    /// Renames the named entry through the host's input prompt, with the
    /// stem (sans extension) pre-selected. Empty or unchanged replies are
    /// a no-op; failures are surfaced without refreshing.
    pub async fn rename_entry(&mut self, name: &str) {
        if !self.entries.iter().any(|entry| entry.name == name) {
            return;
        }

        let selection = ops::stem_selection(name);
        let Some(reply) = self.host.prompt_input(name, selection).await else {
            return;
        };
        let new_name = reply.trim();
        if new_name.is_empty() || new_name == name {
            return;
        }

        match ops::rename_entry(&self.current_dir, name, new_name) {
            Ok(_) => self.refresh(),
            Err(error) => {
                let target = self.current_dir.join(name);
                self.surface_failure("rename", &target, &error);
            }
        }
    }

    /// Copies the named entry's full path to the clipboard. No filesystem
    /// mutation.
    pub fn copy_path(&self, name: &str) {
        if self.entries.iter().any(|entry| entry.name == name) {
            let target = self.current_dir.join(name);
            self.host.write_clipboard(&target.to_string_lossy());
        }
    }

    fn ascend(&mut self) {
        let Some(parent) = self.current_dir.parent().map(Path::to_path_buf) else {
            // Already at the filesystem root.
            self.previous_input = BLANK_SENTINEL.to_string();
            return;
        };
        self.change_dir(parent);
    }

    fn change_dir(&mut self, target: PathBuf) {
        self.current_dir = target;
        self.refresh();
        self.previous_input = BLANK_SENTINEL.to_string();
        let _ = self
            .events
            .send(NavEvent::DirectoryVisited(self.current_dir.clone()));
    }

    fn refresh(&mut self) {
        match list_directory(&self.current_dir) {
            Ok(entries) => self.entries = entries,
            Err(error) => {
                log::warn!("listing failed for {}: {error}", self.current_dir.display());
                self.host.show_message(&error.user_message());
                self.entries = Vec::new();
            }
        }
    }

    async fn open_file(&mut self, target: PathBuf) -> AcceptOutcome {
        self.host.open_file(&target).await;
        let _ = self.events.send(NavEvent::FileOpened(target.clone()));
        AcceptOutcome::Opened(target)
    }

    fn surface_failure(
        &self,
        operation: &str,
        target: &Path,
        error: &std::io::Error,
    ) -> AcceptOutcome {
        let failure = NavError::Io(std::io::Error::new(
            error.kind(),
            format!("failed to {operation} {}: {error}", target.display()),
        ));
        log::warn!("{failure}");
        self.host.show_message(&failure.user_message());
        AcceptOutcome::Unchanged
    }
}
