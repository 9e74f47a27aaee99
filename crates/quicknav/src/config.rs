//! Tunable limits for the search engine and picker sessions.
//!
//! Every bound the engines enforce lives here so hosts can override them;
//! the defaults keep scans responsive on medium-sized project trees.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Limits applied by the content-search engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of candidate files enumerated per session.
    pub max_candidate_files: usize,
    /// Files larger than this are skipped by the content scan (bytes).
    pub max_file_size: u64,
    /// Maximum matches reported per file.
    pub max_matches_per_file: usize,
    /// Maximum matches reported per search.
    pub max_results: usize,
    /// Quiet period between keystrokes before a scan starts (milliseconds).
    pub debounce_ms: u64,
    /// Number of files scanned concurrently per batch.
    pub batch_width: usize,
    /// Queries shorter than this (after trimming) clear results instead of
    /// scheduling a scan.
    pub min_query_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_candidate_files: 5000,
            max_file_size: 512 * 1024,
            max_matches_per_file: 10,
            max_results: 100,
            debounce_ms: 150,
            batch_width: 16,
            min_query_len: 2,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Limits applied by the recent-entries store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentConfig {
    /// Maximum number of remembered entries.
    pub max_entries: usize,
}

impl Default for RecentConfig {
    fn default() -> Self {
        Self { max_entries: 50 }
    }
}
