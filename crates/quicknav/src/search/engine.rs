//! The debounced, cancellable content-search engine.
//!
//! One engine drives one search session: candidates are enumerated once
//! when the session starts, then each qualifying query edit schedules a
//! debounced scan over the cached list. Scans run in fixed-width batches
//! (files within a batch concurrently, batches sequentially) and publish
//! committed results as [`SearchUpdate`] events. A newer query supersedes
//! any in-flight scan through the generation token; superseded work
//! discards its output at the next token check instead of publishing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::future::join_all;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::cancel::{SearchGeneration, SearchToken};
use crate::config::SearchConfig;
use crate::exclude::ExcludeSpec;
use crate::search::{enumerate_candidates, scan_file, SearchMatch};

/// A committed result set, published from the batch loop.
#[derive(Debug, Clone)]
pub struct SearchUpdate {
    /// Generation the results belong to; consumers drop updates stamped
    /// with anything but the newest generation they have seen.
    pub generation: u64,
    /// Full result set committed so far, in enumeration-then-line order.
    pub results: Vec<SearchMatch>,
    /// Set on the last update of a scan (or a synchronous clear).
    pub complete: bool,
}

struct Session {
    root: PathBuf,
    files: Arc<Vec<PathBuf>>,
    generation: SearchGeneration,
    results: Arc<Mutex<Vec<SearchMatch>>>,
}

/// Content-search engine for a single picker session.
pub struct SearchEngine {
    config: SearchConfig,
    updates: mpsc::UnboundedSender<SearchUpdate>,
    session: Option<Session>,
    debounce: Option<JoinHandle<()>>,
}

impl SearchEngine {
    /// Creates an engine and the update stream its scans publish to.
    pub fn new(config: SearchConfig) -> (Self, mpsc::UnboundedReceiver<SearchUpdate>) {
        let (updates, receiver) = mpsc::unbounded_channel();
        let engine = Self {
            config,
            updates,
            session: None,
            debounce: None,
        };
        (engine, receiver)
    }

    /// Starts a session rooted at `root`: resets the generation, clears
    /// results, and enumerates the candidate list once.
    ///
    /// Enumeration failure degrades to an empty candidate list; the engine
    /// then answers every query with no results rather than failing.
    pub async fn start_session(&mut self, root: PathBuf) {
        self.end_session();

        let walk_root = root.clone();
        let max_files = self.config.max_candidate_files;
        let files = tokio::task::spawn_blocking(move || {
            let exclude = ExcludeSpec::build(&walk_root);
            enumerate_candidates(&walk_root, &exclude, max_files)
        })
        .await
        .unwrap_or_else(|error| {
            log::warn!("candidate enumeration failed for {}: {error}", root.display());
            Vec::new()
        });

        log::debug!(
            "search session started root={} candidates={}",
            root.display(),
            files.len()
        );
        self.session = Some(Session {
            root,
            files: Arc::new(files),
            generation: SearchGeneration::new(),
            results: Arc::new(Mutex::new(Vec::new())),
        });
    }

    /// Reacts to a query edit: cancels any pending debounce, clears
    /// synchronously below the minimum query length, otherwise restarts
    /// the debounce timer that will run the scan.
    pub fn on_query_changed(&mut self, text: &str) {
        self.abort_debounce();

        let Some(session) = &self.session else {
            return;
        };

        let query = text.trim().to_string();
        if query.chars().count() < self.config.min_query_len {
            session.generation.invalidate();
            session.results.lock().clear();
            let _ = self.updates.send(SearchUpdate {
                generation: session.generation.current(),
                results: Vec::new(),
                complete: true,
            });
            return;
        }

        let files = Arc::clone(&session.files);
        let generation = session.generation.clone();
        let results = Arc::clone(&session.results);
        let updates = self.updates.clone();
        let config = self.config.clone();
        let delay = self.config.debounce();

        self.debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let token = generation.next();
            run_search(files, token, query, results, updates, config).await;
        }));
    }

    /// Cancels pending and in-flight work and clears committed results.
    /// The session's candidate cache stays usable for the next query.
    pub fn cancel(&mut self) {
        self.abort_debounce();
        if let Some(session) = &self.session {
            session.generation.invalidate();
            session.results.lock().clear();
        }
    }

    /// Session teardown: cancels everything and drops the candidate cache.
    /// Late completions from in-flight reads see a stale token and no-op.
    pub fn end_session(&mut self) {
        self.cancel();
        self.session = None;
    }

    /// Snapshot of the committed result set, index-aligned with the items
    /// the host is showing.
    pub fn results(&self) -> Vec<SearchMatch> {
        self.session
            .as_ref()
            .map(|session| session.results.lock().clone())
            .unwrap_or_default()
    }

    /// The session's cached candidate list (shared with the file-name
    /// search picker).
    pub fn candidate_files(&self) -> Option<Arc<Vec<PathBuf>>> {
        self.session.as_ref().map(|session| Arc::clone(&session.files))
    }

    pub fn root(&self) -> Option<&Path> {
        self.session.as_ref().map(|session| session.root.as_path())
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn abort_debounce(&mut self) {
        if let Some(handle) = self.debounce.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchEngine {
    fn drop(&mut self) {
        self.end_session();
    }
}

/// Executes one scan under `token`. Batches are processed sequentially,
/// the files inside a batch concurrently; results are committed and
/// published only from this loop, never from the per-file tasks.
async fn run_search(
    files: Arc<Vec<PathBuf>>,
    token: SearchToken,
    query: String,
    results: Arc<Mutex<Vec<SearchMatch>>>,
    updates: mpsc::UnboundedSender<SearchUpdate>,
    config: SearchConfig,
) {
    let needle = query.to_lowercase();
    let mut committed: Vec<SearchMatch> = Vec::new();

    'batches: for batch in files.chunks(config.batch_width.max(1)) {
        if token.live().is_none() {
            return;
        }

        let handles: Vec<_> = batch
            .iter()
            .map(|path| {
                let path = path.clone();
                let needle = needle.clone();
                let max_file_size = config.max_file_size;
                let max_matches = config.max_matches_per_file;
                tokio::spawn(
                    async move { scan_file(path, &needle, max_file_size, max_matches).await },
                )
            })
            .collect();
        let outcomes = join_all(handles).await;

        let mut added = 0usize;
        for outcome in outcomes {
            if token.live().is_none() {
                return;
            }
            let file_matches = outcome.unwrap_or_default();
            let capacity = config.max_results.saturating_sub(committed.len());
            if capacity == 0 {
                break;
            }
            let take = file_matches.len().min(capacity);
            added += take;
            committed.extend(file_matches.into_iter().take(take));
        }

        if added > 0 {
            *results.lock() = committed.clone();
            let _ = updates.send(SearchUpdate {
                generation: token.version(),
                results: committed.clone(),
                complete: false,
            });
        }

        if committed.len() >= config.max_results {
            break 'batches;
        }
    }

    if token.live().is_none() {
        return;
    }
    log::debug!(
        "search complete generation={} query={query:?} matches={}",
        token.version(),
        committed.len()
    );
    *results.lock() = committed.clone();
    let _ = updates.send(SearchUpdate {
        generation: token.version(),
        results: committed,
        complete: true,
    });
}
