//! Time-boxed catalog cache with stale-on-error fallback
//!
//! The cache holds one immutable catalog snapshot. Readers either see the old
//! snapshot or the new one, never a mixture. A refetch happens when the
//! snapshot is older than the TTL (or was invalidated by `force_refresh`), and
//! concurrent callers that find the cache stale share a single refetch.
//!
//! Failure policy:
//! - refetch succeeds with at least one track: swap in the new snapshot
//! - refetch fails, previous snapshot is non-empty: keep serving it unchanged
//! - refetch fails, nothing cached yet: install the bundled sample catalog
//!
//! `get()` never returns an error.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::normalizer::{normalize_rows, ColumnLayout};
use super::sample::sample_catalog;
use super::Catalog;
use crate::error::{Error, Result};
use crate::models::SheetValues;

/// Default freshness window (5 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Raw tabular payload provider
#[async_trait]
pub trait TabularSource: Send + Sync {
    /// Human-readable origin for log lines (must not contain secrets)
    fn describe(&self) -> String;

    /// Fetch the full value grid, header row included
    async fn fetch_values(&self) -> Result<SheetValues>;
}

/// Where the currently served snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheOrigin {
    /// Last refetch succeeded
    Remote,
    /// Bundled sample catalog (remote never succeeded)
    Sample,
    /// Remote snapshot kept after a failed refetch
    Stale,
}

/// Point-in-time view of the cache for health and source endpoints
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub tracks: usize,
    pub origin: CacheOrigin,
    /// Wall-clock time the snapshot was installed
    pub fetched_at: DateTime<Utc>,
    pub ttl_secs: u64,
    /// Error of the most recent failed refetch, cleared on success
    pub last_error: Option<String>,
}

struct Entry {
    tracks: Catalog,
    /// `None` after `force_refresh`: treated as infinitely old
    fetched_at: Option<Instant>,
    fetched_wall: DateTime<Utc>,
    origin: CacheOrigin,
}

#[derive(Default)]
struct State {
    entry: Option<Entry>,
    last_error: Option<String>,
}

pub struct CatalogCache {
    source: Arc<dyn TabularSource>,
    layout: ColumnLayout,
    ttl: Duration,
    state: RwLock<State>,
    /// Serializes refetches
    refetch: Mutex<()>,
    /// Completed refetch attempts; lets a waiter see that someone else refetched
    attempts: AtomicU64,
}

impl CatalogCache {
    pub fn new(source: Arc<dyn TabularSource>, layout: ColumnLayout, ttl: Duration) -> Self {
        Self {
            source,
            layout,
            ttl,
            state: RwLock::new(State::default()),
            refetch: Mutex::new(()),
            attempts: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current catalog, refetching first when stale
    pub async fn get(&self) -> Catalog {
        // Loaded before the freshness check so a refetch finishing in between is joined
        let seen = self.attempts.load(Ordering::Acquire);
        if let Some(tracks) = self.fresh().await {
            return tracks;
        }

        let _gate = self.refetch.lock().await;

        if self.attempts.load(Ordering::Acquire) != seen {
            // Another caller refetched while we waited for the gate
            if let Some(tracks) = self.current().await {
                debug!("Joined concurrent catalog refetch");
                return tracks;
            }
        }

        let tracks = self.refetch_locked().await;
        self.attempts.fetch_add(1, Ordering::Release);
        tracks
    }

    /// Invalidate freshness so the next `get()` refetches unconditionally
    ///
    /// The current snapshot stays available as the stale-on-error fallback.
    pub async fn force_refresh(&self) {
        let mut state = self.state.write().await;
        if let Some(entry) = state.entry.as_mut() {
            entry.fetched_at = None;
        }
        info!("Catalog cache invalidated");
    }

    /// Status of the served snapshot, `None` before the first `get()`
    pub async fn snapshot(&self) -> Option<CacheStatus> {
        let state = self.state.read().await;
        state.entry.as_ref().map(|entry| CacheStatus {
            tracks: entry.tracks.len(),
            origin: entry.origin,
            fetched_at: entry.fetched_wall,
            ttl_secs: self.ttl.as_secs(),
            last_error: state.last_error.clone(),
        })
    }

    async fn fresh(&self) -> Option<Catalog> {
        let state = self.state.read().await;
        let entry = state.entry.as_ref()?;
        let fetched_at = entry.fetched_at?;
        (fetched_at.elapsed() < self.ttl).then(|| Arc::clone(&entry.tracks))
    }

    async fn current(&self) -> Option<Catalog> {
        let state = self.state.read().await;
        state.entry.as_ref().map(|entry| Arc::clone(&entry.tracks))
    }

    async fn load_remote(&self) -> Result<Catalog> {
        let values = self.source.fetch_values().await?;
        let tracks = normalize_rows(&values.values, &self.layout);
        if tracks.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        Ok(Arc::new(tracks))
    }

    /// Caller must hold the refetch gate
    async fn refetch_locked(&self) -> Catalog {
        info!(source = %self.source.describe(), "Fetching fresh catalog");

        match self.load_remote().await {
            Ok(tracks) => {
                info!(tracks = tracks.len(), "Catalog loaded");
                let mut state = self.state.write().await;
                state.entry = Some(Entry {
                    tracks: Arc::clone(&tracks),
                    fetched_at: Some(Instant::now()),
                    fetched_wall: Utc::now(),
                    origin: CacheOrigin::Remote,
                });
                state.last_error = None;
                tracks
            }
            Err(e) => {
                let mut state = self.state.write().await;
                state.last_error = Some(e.to_string());

                match state.entry.as_mut() {
                    Some(entry) if !entry.tracks.is_empty() => {
                        warn!(
                            error = %e,
                            tracks = entry.tracks.len(),
                            "Catalog refetch failed, serving previous snapshot"
                        );
                        if entry.origin == CacheOrigin::Remote {
                            entry.origin = CacheOrigin::Stale;
                        }
                        Arc::clone(&entry.tracks)
                    }
                    _ => {
                        let tracks = sample_catalog();
                        warn!(
                            error = %e,
                            tracks = tracks.len(),
                            "Catalog fetch failed, falling back to sample data"
                        );
                        state.entry = Some(Entry {
                            tracks: Arc::clone(&tracks),
                            fetched_at: Some(Instant::now()),
                            fetched_wall: Utc::now(),
                            origin: CacheOrigin::Sample,
                        });
                        tracks
                    }
                }
            }
        }
    }
}
