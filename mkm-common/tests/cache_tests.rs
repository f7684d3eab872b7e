//! Catalog cache behaviour: TTL, single-flight refetch, failure fallbacks
//!
//! Time is paused (`start_paused`) so TTL expiry is driven by
//! `tokio::time::advance` instead of wall-clock sleeps.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use mkm_common::catalog::{
    sample_catalog, CacheOrigin, CatalogCache, ColumnLayout, TabularSource,
};
use mkm_common::models::SheetValues;
use mkm_common::{Error, Result};

const TTL: Duration = Duration::from_secs(300);

/// Replays scripted replies; repeats the last one when the script runs out
struct ScriptedSource {
    calls: AtomicUsize,
    replies: Mutex<VecDeque<Reply>>,
    delay: Duration,
}

#[derive(Clone)]
enum Reply {
    Rows(Vec<&'static str>),
    Fail(u16),
}

impl ScriptedSource {
    fn new(replies: Vec<Reply>) -> Arc<Self> {
        Self::with_delay(replies, Duration::ZERO)
    }

    fn with_delay(replies: Vec<Reply>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            replies: Mutex::new(replies.into()),
            delay,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Header plus one 22-column row per track name
fn sheet(names: &[&str]) -> SheetValues {
    let mut values = vec![vec!["id".to_string(), "track_uri".to_string(), "track_name".to_string()]];
    for (i, name) in names.iter().enumerate() {
        let mut row = vec![String::new(); 22];
        row[0] = (100 + i).to_string();
        row[1] = format!("spotify:track:{}", i);
        row[2] = name.to_string();
        values.push(row);
    }
    SheetValues { values }
}

#[async_trait]
impl TabularSource for ScriptedSource {
    fn describe(&self) -> String {
        "scripted".to_string()
    }

    async fn fetch_values(&self) -> Result<SheetValues> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            if replies.len() > 1 {
                replies.pop_front()
            } else {
                replies.front().cloned()
            }
        };

        match reply {
            Some(Reply::Rows(names)) => Ok(sheet(&names)),
            Some(Reply::Fail(status)) => Err(Error::Upstream {
                status,
                body: "scripted failure".to_string(),
            }),
            None => Err(Error::Internal("empty script".to_string())),
        }
    }
}

fn cache(source: Arc<ScriptedSource>) -> CatalogCache {
    CatalogCache::new(source, ColumnLayout::V1, TTL)
}

fn names(tracks: &[mkm_common::Track]) -> Vec<String> {
    tracks
        .iter()
        .filter_map(|t| t.track_name.clone())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_reads_within_ttl_share_snapshot() {
    let source = ScriptedSource::new(vec![Reply::Rows(vec!["One", "Two"])]);
    let cache = cache(source.clone());

    let first = cache.get().await;
    tokio::time::advance(TTL - Duration::from_secs(1)).await;
    let second = cache.get().await;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(source.calls(), 1);
    assert_eq!(names(&first), vec!["One", "Two"]);

    let status = cache.snapshot().await.unwrap();
    assert_eq!(status.origin, CacheOrigin::Remote);
    assert_eq!(status.tracks, 2);
    assert!(status.last_error.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_expired_snapshot_is_refetched() {
    let source = ScriptedSource::new(vec![
        Reply::Rows(vec!["Old"]),
        Reply::Rows(vec!["New"]),
    ]);
    let cache = cache(source.clone());

    assert_eq!(names(&cache.get().await), vec!["Old"]);
    tokio::time::advance(TTL).await;
    assert_eq!(names(&cache.get().await), vec!["New"]);
    assert_eq!(source.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_callers_share_one_refetch() {
    let source = ScriptedSource::with_delay(
        vec![Reply::Rows(vec!["A", "B", "C"])],
        Duration::from_millis(250),
    );
    let cache = cache(source.clone());

    let results = join_all((0..10).map(|_| cache.get())).await;

    assert_eq!(source.calls(), 1);
    for tracks in &results {
        assert!(Arc::ptr_eq(tracks, &results[0]));
        assert_eq!(tracks.len(), 3);
    }
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_callers_share_one_failed_refetch() {
    let source = ScriptedSource::with_delay(vec![Reply::Fail(503)], Duration::from_millis(250));
    let cache = cache(source.clone());

    let results = join_all((0..5).map(|_| cache.get())).await;

    assert_eq!(source.calls(), 1);
    for tracks in &results {
        assert!(Arc::ptr_eq(tracks, &sample_catalog()));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_parallel_callers_share_one_refetch() {
    for _ in 0..50 {
        let source = ScriptedSource::with_delay(
            vec![Reply::Rows(vec!["A", "B"])],
            Duration::from_millis(5),
        );
        let cache = Arc::new(cache(source.clone()));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.get().await })
            })
            .collect();
        let results: Vec<_> = join_all(handles)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(source.calls(), 1);
        for tracks in &results {
            assert!(Arc::ptr_eq(tracks, &results[0]));
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_first_failure_serves_sample() {
    let source = ScriptedSource::new(vec![Reply::Fail(403)]);
    let cache = cache(source.clone());

    let tracks = cache.get().await;
    assert!(Arc::ptr_eq(&tracks, &sample_catalog()));

    let status = cache.snapshot().await.unwrap();
    assert_eq!(status.origin, CacheOrigin::Sample);
    assert!(status.last_error.unwrap().contains("403"));
}

#[tokio::test(start_paused = true)]
async fn test_sample_is_kept_for_one_ttl() {
    let source = ScriptedSource::new(vec![Reply::Fail(500), Reply::Rows(vec!["Live"])]);
    let cache = cache(source.clone());

    cache.get().await;
    tokio::time::advance(Duration::from_secs(10)).await;
    cache.get().await;
    assert_eq!(source.calls(), 1);

    tokio::time::advance(TTL).await;
    assert_eq!(names(&cache.get().await), vec!["Live"]);
    assert_eq!(cache.snapshot().await.unwrap().origin, CacheOrigin::Remote);
}

#[tokio::test(start_paused = true)]
async fn test_failure_after_success_keeps_previous_snapshot() {
    let source = ScriptedSource::new(vec![Reply::Rows(vec!["Keep"]), Reply::Fail(500)]);
    let cache = cache(source.clone());

    let first = cache.get().await;
    tokio::time::advance(TTL).await;
    let second = cache.get().await;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(source.calls(), 2);

    let status = cache.snapshot().await.unwrap();
    assert_eq!(status.origin, CacheOrigin::Stale);
    assert!(status.last_error.is_some());

    // fetched_at was not refreshed, so the next read retries
    cache.get().await;
    assert_eq!(source.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_empty_payload_takes_fallback_path() {
    let source = ScriptedSource::new(vec![Reply::Rows(vec![])]);
    let cache = cache(source.clone());

    let tracks = cache.get().await;
    assert!(Arc::ptr_eq(&tracks, &sample_catalog()));

    let status = cache.snapshot().await.unwrap();
    assert_eq!(status.origin, CacheOrigin::Sample);
    assert!(status.last_error.unwrap().contains("no tracks"));
}

#[tokio::test(start_paused = true)]
async fn test_nameless_rows_count_as_empty() {
    let source = ScriptedSource::new(vec![Reply::Rows(vec!["", "  "])]);
    let cache = cache(source);

    assert!(Arc::ptr_eq(&cache.get().await, &sample_catalog()));
}

#[tokio::test(start_paused = true)]
async fn test_force_refresh_refetches_within_ttl() {
    let source = ScriptedSource::new(vec![
        Reply::Rows(vec!["Before"]),
        Reply::Rows(vec!["After"]),
    ]);
    let cache = cache(source.clone());

    cache.get().await;
    cache.force_refresh().await;
    assert_eq!(names(&cache.get().await), vec!["After"]);
    assert_eq!(source.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_force_refresh_failure_keeps_snapshot() {
    let source = ScriptedSource::new(vec![Reply::Rows(vec!["Kept"]), Reply::Fail(502)]);
    let cache = cache(source.clone());

    let first = cache.get().await;
    cache.force_refresh().await;
    let second = cache.get().await;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.snapshot().await.unwrap().origin, CacheOrigin::Stale);
}
