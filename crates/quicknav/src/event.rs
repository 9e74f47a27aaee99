//! Navigation events consumed by the recent-entries sink.

use std::path::PathBuf;

use tokio::sync::mpsc;

/// Emitted by the navigator and picker controllers whenever the user lands
/// somewhere worth remembering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    DirectoryVisited(PathBuf),
    FileOpened(PathBuf),
}

pub type NavEventSender = mpsc::UnboundedSender<NavEvent>;
pub type NavEventReceiver = mpsc::UnboundedReceiver<NavEvent>;

/// Creates the event channel shared by the navigator and its consumers.
pub fn channel() -> (NavEventSender, NavEventReceiver) {
    mpsc::unbounded_channel()
}
