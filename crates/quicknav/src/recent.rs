//! Recently-visited entries.
//!
//! An ordered, de-duplicated, capacity-bounded list of paths the user
//! landed on, fed by the navigation event channel and persisted through
//! the host's key-value storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::config::RecentConfig;
use crate::error::{NavError, Result};
use crate::event::{NavEvent, NavEventReceiver};

/// What kind of entry was recorded; decides how accepting it behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecentKind {
    Directory,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub path: PathBuf,
    pub kind: RecentKind,
}

/// Host-side persistence for the recent list.
#[async_trait]
pub trait RecentStorage: Send + Sync {
    async fn load(&self) -> Result<Vec<RecentEntry>>;
    async fn save(&self, entries: &[RecentEntry]) -> Result<()>;
}

/// Bounded most-recent-first list of visited paths.
#[derive(Debug)]
pub struct RecentEntryStore {
    entries: Vec<RecentEntry>,
    capacity: usize,
}

impl RecentEntryStore {
    pub fn new(config: RecentConfig) -> Self {
        Self {
            entries: Vec::new(),
            capacity: config.max_entries,
        }
    }

    /// Restores the persisted list, clamped to capacity.
    pub async fn load(config: RecentConfig, storage: &dyn RecentStorage) -> Self {
        let mut store = Self::new(config);
        match storage.load().await {
            Ok(entries) => {
                store.entries = entries;
                store.entries.truncate(store.capacity);
            }
            Err(error) => {
                log::debug!("recent entries unavailable: {error}");
            }
        }
        store
    }

    pub async fn persist(&self, storage: &dyn RecentStorage) {
        if let Err(error) = storage.save(&self.entries).await {
            log::warn!("failed to persist recent entries: {error}");
        }
    }

    /// Most-recent-first snapshot.
    pub fn entries(&self) -> &[RecentEntry] {
        &self.entries
    }

    /// Records a visit: an existing entry for the same path moves to the
    /// front, the list never grows past capacity.
    pub fn record(&mut self, path: PathBuf, kind: RecentKind) {
        self.entries.retain(|entry| entry.path != path);
        self.entries.insert(0, RecentEntry { path, kind });
        self.entries.truncate(self.capacity);
    }

    /// Drops one entry, e.g. after the user confirms removing a path that
    /// no longer exists.
    pub fn remove(&mut self, path: &Path) {
        self.entries.retain(|entry| entry.path != path);
    }

    /// Drops every entry whose path no longer exists.
    pub fn prune_missing(&mut self) {
        self.entries.retain(|entry| entry.path.exists());
    }

    /// Applies one navigation event.
    pub fn apply_event(&mut self, event: &NavEvent) {
        match event {
            NavEvent::DirectoryVisited(path) => self.record(path.clone(), RecentKind::Directory),
            NavEvent::FileOpened(path) => self.record(path.clone(), RecentKind::File),
        }
    }
}

/// File-backed storage: the recent list as a JSON document.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl RecentStorage for JsonFileStorage {
    async fn load(&self) -> Result<Vec<RecentEntry>> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|error| NavError::Storage(format!("read {}: {error}", self.path.display())))?;
        serde_json::from_str(&contents)
            .map_err(|error| NavError::Storage(format!("parse {}: {error}", self.path.display())))
    }

    async fn save(&self, entries: &[RecentEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|error| {
                NavError::Storage(format!("create {}: {error}", parent.display()))
            })?;
        }
        let payload = serde_json::to_string(entries)
            .map_err(|error| NavError::Storage(format!("encode recent entries: {error}")))?;
        tokio::fs::write(&self.path, payload)
            .await
            .map_err(|error| NavError::Storage(format!("write {}: {error}", self.path.display())))
    }
}

/// Pumps navigation events into the store until the channel closes.
pub fn spawn_recorder(
    store: Arc<Mutex<RecentEntryStore>>,
    mut events: NavEventReceiver,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            store.lock().apply_event(&event);
        }
    })
}
