//! Generation-stamped cancellation for search work.
//!
//! Each scan captures a [`SearchToken`] at dispatch time. Starting a newer
//! scan (or tearing the session down) advances the live generation, so any
//! unit of work holding an older token sees itself as stale and discards
//! its output instead of publishing it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic generation counter owned by a search session.
///
/// Advancing the generation cancels every token handed out before the
/// advance. Tokens hold a shared reference to the counter, so they stay
/// valid for as long as any in-flight work needs them.
#[derive(Debug, Clone, Default)]
pub struct SearchGeneration {
    live: Arc<AtomicU64>,
}

impl SearchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the generation and returns a token stamped with it.
    ///
    /// Any token from an earlier call reports stale from this point on.
    pub fn next(&self) -> SearchToken {
        let version = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        SearchToken {
            live: Arc::clone(&self.live),
            version,
        }
    }

    /// Advances the generation without handing out a token.
    ///
    /// Used at teardown: every outstanding token becomes stale and no new
    /// work is stamped.
    pub fn invalidate(&self) {
        self.live.fetch_add(1, Ordering::SeqCst);
    }

    /// Current live generation.
    pub fn current(&self) -> u64 {
        self.live.load(Ordering::SeqCst)
    }
}

/// A by-value cancellation token stamped with the generation it was
/// dispatched under.
#[derive(Debug, Clone)]
pub struct SearchToken {
    live: Arc<AtomicU64>,
    version: u64,
}

impl SearchToken {
    /// Token that never reports stale. Useful in tests.
    pub fn noop() -> Self {
        Self {
            live: Arc::new(AtomicU64::new(0)),
            version: 0,
        }
    }

    /// Generation this token was stamped with.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_live(&self) -> bool {
        self.version == self.live.load(Ordering::Relaxed)
    }

    /// `Some(())` while live, `None` once superseded. Shaped for use with
    /// the `?` operator in scan loops.
    pub fn live(&self) -> Option<()> {
        self.is_live().then_some(())
    }
}
