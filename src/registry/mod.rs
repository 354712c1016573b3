//! Stream Registry
//!
//! Accumulates every observed manifest as an immutable [`StreamRecord`] and
//! keeps the collection ranked by quality score. The registry is a cloneable
//! handle over shared state so the observer taps and the presentation poller
//! can hold it independently; pass the instance to whatever consumes it
//! rather than reaching for a global.
//!
//! The collection is unbounded and never deduplicates on URL: a manifest
//! observed twice is two records. Acceptable for a page-lifetime tool;
//! known design limitation rather than a bug.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::manifest::{analyze_quality, declared_resolution, segment_count};
use crate::models::StreamRecord;
use crate::utils::url::obfuscate_credentials;

/// Ranked collection of observed streams.
///
/// All mutation happens through [`record`](Self::record), which appends and
/// re-sorts under a single write lock, so an in-progress insert is never
/// partially visible. No ordering is guaranteed between concurrent
/// completions; whichever acquires the lock first is recorded first.
#[derive(Clone, Default)]
pub struct StreamRegistry {
    records: Arc<RwLock<Vec<StreamRecord>>>,
}

impl StreamRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze a manifest body and append the resulting record.
    ///
    /// Runs the quality analysis, captures the variant-declared resolution
    /// (first `#EXT-X-STREAM-INF` line, not the scoring max), counts
    /// segment lines, then appends and stably re-sorts descending by
    /// quality score. Equal scores keep their insertion order.
    pub async fn record(&self, url: &str, body: &str) -> StreamRecord {
        let metrics = analyze_quality(body);
        let record = StreamRecord {
            timestamp: Utc::now(),
            url: url.to_string(),
            resolution: declared_resolution(body),
            bandwidth: (metrics.max_bandwidth > 0).then_some(metrics.max_bandwidth),
            segment_count: segment_count(body),
            quality_score: metrics.quality_score,
        };

        {
            let mut records = self.records.write().await;
            records.push(record.clone());
            records.sort_by(|a, b| b.quality_score.cmp(&a.quality_score));
        }

        debug!(
            target = "scout.registry",
            url = %obfuscate_credentials(url),
            score = record.quality_score,
            segments = record.segment_count,
            "stream recorded"
        );

        record
    }

    /// Highest-ranked record, if any.
    ///
    /// Rank means quality score, not recency; the persisted `lastStream`
    /// snapshot tracks recency instead.
    pub async fn best(&self) -> Option<StreamRecord> {
        self.records.read().await.first().cloned()
    }

    /// Full ranked sequence, best first. Returns an owned snapshot; the
    /// backing sequence can grow while the caller iterates.
    pub async fn all(&self) -> Vec<StreamRecord> {
        self.records.read().await.clone()
    }

    /// Number of records observed so far.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
