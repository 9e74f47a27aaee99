use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tempfile::TempDir;

use crate::event::{self, NavEvent, NavEventReceiver};
use crate::host::HostEnv;
use crate::navigator::{AcceptOutcome, DirectoryNavigator, BLANK_SENTINEL};

#[derive(Default)]
struct MockHost {
    workspace: Option<PathBuf>,
    confirm_answer: bool,
    prompt_reply: Option<String>,
    messages: Mutex<Vec<String>>,
    opened: Mutex<Vec<PathBuf>>,
    clipboard: Mutex<Vec<String>>,
}

#[async_trait]
impl HostEnv for MockHost {
    fn active_document(&self) -> Option<PathBuf> {
        None
    }

    fn workspace_root(&self) -> Option<PathBuf> {
        self.workspace.clone()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        None
    }

    fn write_clipboard(&self, text: &str) {
        self.clipboard.lock().push(text.to_string());
    }

    fn show_message(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }

    async fn confirm(&self, _prompt: &str) -> bool {
        self.confirm_answer
    }

    async fn prompt_input(&self, _initial: &str, _selection: (usize, usize)) -> Option<String> {
        self.prompt_reply.clone()
    }

    async fn open_file(&self, path: &Path) {
        self.opened.lock().push(path.to_path_buf());
    }
}

fn navigator_at(
    root: &Path,
    host: MockHost,
) -> (
    DirectoryNavigator<MockHost>,
    Arc<MockHost>,
    NavEventReceiver,
) {
    let host = Arc::new(MockHost {
        workspace: Some(root.to_path_buf()),
        ..host
    });
    let (sender, receiver) = event::channel();
    let navigator = DirectoryNavigator::start(Arc::clone(&host), sender);
    (navigator, host, receiver)
}

fn drain(receiver: &mut NavEventReceiver) -> Vec<NavEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn sentinel_to_empty_navigates_to_parent() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    let (mut navigator, _host, mut events) = navigator_at(&temp.path().join("sub"), MockHost::default());

    let update = navigator.handle_input_changed("");

    assert_eq!(navigator.current_dir(), temp.path());
    assert_eq!(update.reset_value.as_deref(), Some(BLANK_SENTINEL));
    assert!(drain(&mut events)
        .contains(&NavEvent::DirectoryVisited(temp.path().to_path_buf())));
}

#[tokio::test]
async fn dash_navigates_to_parent() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    let (mut navigator, _host, _events) = navigator_at(&temp.path().join("sub"), MockHost::default());

    navigator.handle_input_changed(" -");
    assert_eq!(navigator.current_dir(), temp.path());
}

#[tokio::test]
async fn ascend_at_filesystem_root_is_a_no_op() {
    let root = PathBuf::from(std::path::MAIN_SEPARATOR_STR);
    let (mut navigator, _host, mut events) = navigator_at(&root, MockHost::default());

    navigator.handle_input_changed("");
    assert_eq!(navigator.current_dir(), root.as_path());
    assert!(drain(&mut events).is_empty());
}

#[tokio::test]
async fn typed_path_descends_through_cached_directories() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("Alpha/beta")).unwrap();
    let (mut navigator, _host, mut events) = navigator_at(temp.path(), MockHost::default());

    // Case-insensitive on the typed segment; remainder is reseeded.
    let update = navigator.handle_input_changed(" alpha/beta/");
    assert_eq!(navigator.current_dir(), temp.path().join("Alpha"));
    assert_eq!(update.reset_value.as_deref(), Some(" beta/"));

    // The host echoes the reseeded value back, continuing the chain.
    let update = navigator.handle_input_changed(" beta/");
    assert_eq!(navigator.current_dir(), temp.path().join("Alpha/beta"));
    assert_eq!(update.reset_value.as_deref(), Some(BLANK_SENTINEL));

    let visited: Vec<_> = drain(&mut events);
    assert_eq!(
        visited,
        vec![
            NavEvent::DirectoryVisited(temp.path().join("Alpha")),
            NavEvent::DirectoryVisited(temp.path().join("Alpha/beta")),
        ]
    );
}

#[tokio::test]
async fn filtering_runs_against_the_fresh_cache_after_a_change() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    File::create(temp.path().join("sub/inner.txt")).unwrap();
    File::create(temp.path().join("outer.txt")).unwrap();
    let (mut navigator, _host, _events) = navigator_at(temp.path(), MockHost::default());

    navigator.handle_input_changed(" sub/");
    let update = navigator.handle_input_changed(" inner");
    let names: Vec<_> = update.visible.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["inner.txt"]);
}

#[tokio::test]
async fn accepting_a_highlighted_directory_descends() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    let (mut navigator, _host, mut events) = navigator_at(temp.path(), MockHost::default());

    let outcome = navigator.accept(Some("sub"), BLANK_SENTINEL).await;
    assert_eq!(outcome, AcceptOutcome::Descended);
    assert_eq!(navigator.current_dir(), temp.path().join("sub"));
    assert!(drain(&mut events)
        .contains(&NavEvent::DirectoryVisited(temp.path().join("sub"))));
}

#[tokio::test]
async fn accepting_a_highlighted_file_opens_it() {
    let temp = TempDir::new().unwrap();
    File::create(temp.path().join("notes.txt")).unwrap();
    let (mut navigator, host, mut events) = navigator_at(temp.path(), MockHost::default());

    let outcome = navigator.accept(Some("notes.txt"), BLANK_SENTINEL).await;
    assert_eq!(
        outcome,
        AcceptOutcome::Opened(temp.path().join("notes.txt"))
    );
    assert_eq!(host.opened.lock().as_slice(), &[temp.path().join("notes.txt")]);
    assert!(drain(&mut events)
        .contains(&NavEvent::FileOpened(temp.path().join("notes.txt"))));
}

#[tokio::test]
async fn accepting_a_nested_path_creates_parents_and_the_file() {
    let temp = TempDir::new().unwrap();
    let (mut navigator, host, _events) = navigator_at(temp.path(), MockHost::default());

    let outcome = navigator.accept(None, " a/b/c.txt").await;

    let created = temp.path().join("a/b/c.txt");
    assert_eq!(outcome, AcceptOutcome::Opened(created.clone()));
    assert!(created.is_file());
    assert!(temp.path().join("a").is_dir());
    assert!(temp.path().join("a/b").is_dir());
    assert_eq!(host.opened.lock().as_slice(), &[created]);
}

#[tokio::test]
async fn accepting_a_trailing_separator_creates_and_enters_the_directory() {
    let temp = TempDir::new().unwrap();
    let (mut navigator, _host, mut events) = navigator_at(temp.path(), MockHost::default());

    let outcome = navigator.accept(None, " fresh/nested/").await;
    let created = temp.path().join("fresh/nested");
    assert_eq!(outcome, AcceptOutcome::Descended);
    assert!(created.is_dir());
    assert_eq!(navigator.current_dir(), created);
    assert!(drain(&mut events).contains(&NavEvent::DirectoryVisited(created)));
}

#[tokio::test]
async fn accepting_an_existing_path_navigates_instead_of_creating() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("existing")).unwrap();
    let (mut navigator, _host, _events) = navigator_at(temp.path(), MockHost::default());

    let outcome = navigator.accept(None, " existing").await;
    assert_eq!(outcome, AcceptOutcome::Descended);
    assert_eq!(navigator.current_dir(), temp.path().join("existing"));
}

#[tokio::test]
async fn blank_input_accept_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    let (mut navigator, _host, _events) = navigator_at(temp.path(), MockHost::default());

    let outcome = navigator.accept(None, BLANK_SENTINEL).await;
    assert_eq!(outcome, AcceptOutcome::Unchanged);
    assert_eq!(navigator.current_dir(), temp.path());
}

#[tokio::test]
async fn confirmed_delete_removes_and_refreshes() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("doomed")).unwrap();
    File::create(temp.path().join("doomed/inner.txt")).unwrap();
    let host = MockHost {
        confirm_answer: true,
        ..MockHost::default()
    };
    let (mut navigator, _host, _events) = navigator_at(temp.path(), host);

    navigator.delete_entry("doomed").await;
    assert!(!temp.path().join("doomed").exists());
    assert!(navigator.entries().is_empty());
}

#[tokio::test]
async fn declined_delete_changes_nothing() {
    let temp = TempDir::new().unwrap();
    File::create(temp.path().join("keep.txt")).unwrap();
    let (mut navigator, _host, _events) = navigator_at(temp.path(), MockHost::default());

    navigator.delete_entry("keep.txt").await;
    assert!(temp.path().join("keep.txt").is_file());
    assert_eq!(navigator.entries().len(), 1);
}

#[tokio::test]
async fn failed_delete_surfaces_a_message_and_keeps_the_cache() {
    let temp = TempDir::new().unwrap();
    File::create(temp.path().join("ghost.txt")).unwrap();
    let host = MockHost {
        confirm_answer: true,
        ..MockHost::default()
    };
    let (mut navigator, host, _events) = navigator_at(temp.path(), host);

    // The file vanishes behind the navigator's back.
    fs::remove_file(temp.path().join("ghost.txt")).unwrap();
    navigator.delete_entry("ghost.txt").await;

    assert!(!host.messages.lock().is_empty());
    // Cached listing untouched: no refresh happened.
    assert_eq!(navigator.entries().len(), 1);
}

#[tokio::test]
async fn rename_applies_the_reply_and_refreshes() {
    let temp = TempDir::new().unwrap();
    File::create(temp.path().join("old.txt")).unwrap();
    let host = MockHost {
        prompt_reply: Some("new.txt".to_string()),
        ..MockHost::default()
    };
    let (mut navigator, _host, _events) = navigator_at(temp.path(), host);

    navigator.rename_entry("old.txt").await;
    assert!(temp.path().join("new.txt").is_file());
    assert!(!temp.path().join("old.txt").exists());
    assert_eq!(navigator.entries()[0].name, "new.txt");
}

#[tokio::test]
async fn rename_with_unchanged_or_empty_reply_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    File::create(temp.path().join("same.txt")).unwrap();
    let host = MockHost {
        prompt_reply: Some("same.txt".to_string()),
        ..MockHost::default()
    };
    let (mut navigator, host, _events) = navigator_at(temp.path(), host);

    navigator.rename_entry("same.txt").await;
    assert!(temp.path().join("same.txt").is_file());
    assert!(host.messages.lock().is_empty());
}

#[tokio::test]
async fn copy_path_hands_the_full_path_to_the_clipboard() {
    let temp = TempDir::new().unwrap();
    File::create(temp.path().join("copied.txt")).unwrap();
    let (navigator, host, _events) = navigator_at(temp.path(), MockHost::default());

    navigator.copy_path("copied.txt");
    assert_eq!(
        host.clipboard.lock().as_slice(),
        &[temp.path().join("copied.txt").to_string_lossy().to_string()]
    );
}

#[tokio::test]
async fn unreadable_start_directory_shows_empty_and_surfaces_the_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("gone");
    let (navigator, host, _events) = navigator_at(&missing, MockHost::default());

    assert!(navigator.entries().is_empty());
    assert!(!host.messages.lock().is_empty());
}
