//! Controllers binding the engines to the abstract picker surface.
//!
//! One controller per picker: directory browsing, project content search,
//! project file-name search, and recent entries. The host forwards its
//! widget events (value-changed, accept, button presses) into these; the
//! controllers render items back through the [`Picker`] trait.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::SearchConfig;
use crate::event::{NavEvent, NavEventSender};
use crate::exclude::ExcludeSpec;
use crate::host::{HostEnv, Picker, PickerItem};
use crate::listing::DirectoryEntry;
use crate::navigator::{AcceptOutcome, DirectoryNavigator, BLANK_SENTINEL};
use crate::recent::{RecentEntryStore, RecentKind};
use crate::search::{enumerate_candidates, SearchEngine, SearchMatch, SearchUpdate};


/// Directory browser / file manager picker.
pub struct BrowseController<P: Picker, H: HostEnv> {
    picker: P,
    navigator: DirectoryNavigator<H>,
}

impl<P: Picker, H: HostEnv> BrowseController<P, H> {
    pub fn new(mut picker: P, host: Arc<H>, events: NavEventSender) -> Self {
        let navigator = DirectoryNavigator::start(host, events);
        picker.set_placeholder("Type to filter, end with / to descend, - for parent");
        picker.set_value(BLANK_SENTINEL);
        picker.show();
        let mut controller = Self { picker, navigator };
        controller.render_current();
        controller
    }

    pub fn on_value_changed(&mut self, value: &str) {
        let update = self.navigator.handle_input_changed(value);
        if let Some(reset) = &update.reset_value {
            self.picker.set_value(reset);
        }
        self.picker
            .set_title(&self.navigator.current_dir().to_string_lossy());
        self.picker.set_items(render_entries(&update.visible));
    }

    pub async fn on_accept(&mut self, highlighted: Option<&str>, value: &str) {
        match self.navigator.accept(highlighted, value).await {
            AcceptOutcome::Opened(_) => self.picker.hide(),
            AcceptOutcome::Descended => {
                self.picker.set_value(BLANK_SENTINEL);
                self.render_current();
            }
            AcceptOutcome::Unchanged => {}
        }
    }

    pub async fn on_delete(&mut self, highlighted: &str) {
        self.navigator.delete_entry(highlighted).await;
        self.render_current();
    }

    pub async fn on_rename(&mut self, highlighted: &str) {
        self.navigator.rename_entry(highlighted).await;
        self.render_current();
    }

    pub fn on_copy_path(&mut self, highlighted: &str) {
        self.navigator.copy_path(highlighted);
    }

    fn render_current(&mut self) {
        self.picker
            .set_title(&self.navigator.current_dir().to_string_lossy());
        let update = self.navigator.handle_input_changed(BLANK_SENTINEL);
        self.picker.set_items(render_entries(&update.visible));
    }
}

fn render_entries(entries: &[DirectoryEntry]) -> Vec<PickerItem> {
    entries
        .iter()
        .map(|entry| {
            let item = PickerItem::new(&entry.name);
            if entry.is_dir {
                item.with_description("folder")
            } else {
                item
            }
        })
        .collect()
}

/// Project full-text search picker.
pub struct TextSearchController<P: Picker, H: HostEnv> {
    picker: P,
    host: Arc<H>,
    events: NavEventSender,
    engine: SearchEngine,
    matches: Vec<SearchMatch>,
    last_generation: u64,
}

impl<P: Picker, H: HostEnv> TextSearchController<P, H> {
    /// Creates the controller and the update stream the host must pump
    /// back into [`Self::on_update`].
    pub fn new(
        mut picker: P,
        host: Arc<H>,
        events: NavEventSender,
        config: SearchConfig,
    ) -> (Self, mpsc::UnboundedReceiver<SearchUpdate>) {
        let (engine, updates) = SearchEngine::new(config);
        picker.set_placeholder("Search file contents");
        let controller = Self {
            picker,
            host,
            events,
            engine,
            matches: Vec::new(),
            last_generation: 0,
        };
        (controller, updates)
    }

    pub async fn start(&mut self, root: PathBuf) {
        self.picker.set_title(&root.to_string_lossy());
        self.picker.show();
        self.picker.set_busy(true);
        self.engine.start_session(root).await;
        self.picker.set_busy(false);
    }

    pub fn on_value_changed(&mut self, value: &str) {
        if value.trim().chars().count() >= self.engine.config().min_query_len {
            self.picker.set_busy(true);
        }
        self.engine.on_query_changed(value);
    }

    /// Applies a committed result set. Updates stamped with an older
    /// generation than the newest one seen are stale and dropped.
    pub fn on_update(&mut self, update: SearchUpdate) {
        if update.generation < self.last_generation {
            return;
        }
        self.last_generation = update.generation;
        self.matches = update.results;

        let root = self.engine.root().map(Path::to_path_buf);
        let items = self
            .matches
            .iter()
            .map(|found| render_match(found, root.as_deref()))
            .collect();
        self.picker.set_items(items);
        if update.complete {
            self.picker.set_busy(false);
        }
    }

    /// Opens the match behind the given item index.
    pub async fn on_accept(&mut self, index: usize) {
        let Some(found) = self.matches.get(index) else {
            return;
        };
        self.host.open_file(&found.file).await;
        let _ = self.events.send(NavEvent::FileOpened(found.file.clone()));
        self.engine.end_session();
        self.picker.hide();
    }

    pub fn on_hide(&mut self) {
        self.engine.end_session();
    }
}

fn render_match(found: &SearchMatch, root: Option<&Path>) -> PickerItem {
    let location = format!("{}:{}:{}", display_path(&found.file, root), found.line, found.column);
    PickerItem::new(&found.content).with_description(location)
}

/// Project file-name search picker: a synchronous substring filter over
/// the enumerated candidate list.
pub struct NameSearchController<P: Picker, H: HostEnv> {
    picker: P,
    host: Arc<H>,
    events: NavEventSender,
    config: SearchConfig,
    root: Option<PathBuf>,
    candidates: Arc<Vec<PathBuf>>,
    results: Vec<PathBuf>,
}

impl<P: Picker, H: HostEnv> NameSearchController<P, H> {
    pub fn new(mut picker: P, host: Arc<H>, events: NavEventSender, config: SearchConfig) -> Self {
        picker.set_placeholder("Search files by name");
        Self {
            picker,
            host,
            events,
            config,
            root: None,
            candidates: Arc::new(Vec::new()),
            results: Vec::new(),
        }
    }

    /// Enumerates the candidate list once for the session.
    pub async fn start(&mut self, root: PathBuf) {
        self.picker.set_title(&root.to_string_lossy());
        self.picker.show();
        self.picker.set_busy(true);
        let walk_root = root.clone();
        let max_files = self.config.max_candidate_files;
        let files = tokio::task::spawn_blocking(move || {
            let exclude = ExcludeSpec::build(&walk_root);
            enumerate_candidates(&walk_root, &exclude, max_files)
        })
        .await
        .unwrap_or_default();
        self.candidates = Arc::new(files);
        self.root = Some(root);
        self.picker.set_busy(false);
    }

    pub fn on_value_changed(&mut self, value: &str) {
        let needle = value.trim().to_lowercase();
        if needle.chars().count() < self.config.min_query_len {
            self.results.clear();
            self.picker.set_items(Vec::new());
            return;
        }

        let root = self.root.as_deref();
        self.results = self
            .candidates
            .iter()
            .filter(|path| {
                display_path(path, root).to_lowercase().contains(&needle)
            })
            .take(self.config.max_results)
            .cloned()
            .collect();

        let items = self
            .results
            .iter()
            .map(|path| {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string_lossy().into_owned());
                PickerItem::new(name).with_description(display_path(path, root))
            })
            .collect();
        self.picker.set_items(items);
    }

    pub async fn on_accept(&mut self, index: usize) {
        let Some(path) = self.results.get(index).cloned() else {
            return;
        };
        self.host.open_file(&path).await;
        let _ = self.events.send(NavEvent::FileOpened(path));
        self.picker.hide();
    }
}

/// Outcome of accepting a recent entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecentAccept {
    /// A file entry was opened.
    Opened(PathBuf),
    /// A directory entry exists; the host should start a browse session
    /// there.
    BrowseDirectory(PathBuf),
    /// The path no longer exists and the user agreed to forget it.
    Removed(PathBuf),
    /// Nothing happened.
    Unchanged,
}

/// Recently-used entries picker.
pub struct RecentController<P: Picker, H: HostEnv> {
    picker: P,
    host: Arc<H>,
    store: Arc<parking_lot::Mutex<RecentEntryStore>>,
    shown: Vec<(PathBuf, RecentKind)>,
}

impl<P: Picker, H: HostEnv> RecentController<P, H> {
    pub fn new(
        mut picker: P,
        host: Arc<H>,
        store: Arc<parking_lot::Mutex<RecentEntryStore>>,
    ) -> Self {
        picker.set_title("Recently used");
        picker.set_placeholder("Type to filter recent entries");
        picker.show();
        let mut controller = Self {
            picker,
            host,
            store,
            shown: Vec::new(),
        };
        controller.render("");
        controller
    }

    pub fn on_value_changed(&mut self, value: &str) {
        self.render(value.trim());
    }

    /// Opens a recent file, hands a recent directory back to the host, or
    /// offers to forget an entry whose path no longer exists.
    pub async fn on_accept(&mut self, index: usize) -> RecentAccept {
        let Some((path, kind)) = self.shown.get(index).cloned() else {
            return RecentAccept::Unchanged;
        };

        if !path.exists() {
            let prompt = format!("'{}' no longer exists. Remove it from the list?", path.display());
            if self.host.confirm(&prompt).await {
                self.store.lock().remove(&path);
                self.render("");
                return RecentAccept::Removed(path);
            }
            return RecentAccept::Unchanged;
        }

        match kind {
            RecentKind::File => {
                self.host.open_file(&path).await;
                self.picker.hide();
                RecentAccept::Opened(path)
            }
            RecentKind::Directory => {
                self.picker.hide();
                RecentAccept::BrowseDirectory(path)
            }
        }
    }

    fn render(&mut self, filter: &str) {
        let needle = filter.to_lowercase();
        let store = self.store.lock();
        self.shown = store
            .entries()
            .iter()
            .filter(|entry| {
                needle.is_empty()
                    || entry.path.to_string_lossy().to_lowercase().contains(&needle)
            })
            .map(|entry| (entry.path.clone(), entry.kind))
            .collect();
        drop(store);

        let items = self
            .shown
            .iter()
            .map(|(path, kind)| {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string_lossy().into_owned());
                let item = PickerItem::new(name).with_detail(path.to_string_lossy());
                match kind {
                    RecentKind::Directory => item.with_description("folder"),
                    RecentKind::File => item,
                }
            })
            .collect();
        self.picker.set_items(items);
    }
}

/// Renders a path relative to the session root when possible.
fn display_path(path: &Path, root: Option<&Path>) -> String {
    root.and_then(|root| path.strip_prefix(root).ok())
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
