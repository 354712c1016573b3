//! Response taps
//!
//! The extension point the observed clients feed: every completed response
//! body is offered to each tap in the chain. Taps return an explicit result;
//! the observing client logs failures and never lets them reach the caller
//! whose request was tapped.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::ScoutResult;
use crate::manifest::is_manifest;
use crate::models::StreamRecord;
use crate::registry::StreamRegistry;
use crate::snapshot::{LAST_STREAM_KEY, SnapshotStore};
use crate::utils::url::obfuscate_credentials;

/// One interceptor in the response chain.
///
/// `on_response` receives the originating URL and the response body text.
/// Returning `Ok(None)` means the tap declined the response; `Ok(Some(_))`
/// means it produced a record. Errors are reported to the chain runner,
/// which logs and moves on.
#[async_trait]
pub trait ResponseTap: Send + Sync {
    async fn on_response(&self, url: &str, body: &str) -> ScoutResult<Option<StreamRecord>>;
}

/// Run a tap chain against one completed response.
///
/// Tap failures are contained here: logged under `scout.observe`, never
/// propagated, so a misbehaving tap cannot abort the request it observed.
pub(crate) async fn run_taps(taps: &[Arc<dyn ResponseTap>], url: &str, body: &str) {
    for tap in taps {
        if let Err(error) = tap.on_response(url, body).await {
            warn!(
                target = "scout.observe",
                url = %obfuscate_credentials(url),
                %error,
                "response tap failed"
            );
        }
    }
}

/// The detection pipeline as a tap: classify, record, snapshot.
///
/// Classification-negative responses are ignored. For every detection the
/// freshly analyzed record is persisted under [`LAST_STREAM_KEY`] — the
/// snapshot tracks recency while the registry tracks rank, and the two
/// deliberately diverge.
pub struct StreamDetector {
    registry: StreamRegistry,
    store: Arc<dyn SnapshotStore>,
}

impl StreamDetector {
    pub fn new(registry: StreamRegistry, store: Arc<dyn SnapshotStore>) -> Self {
        Self { registry, store }
    }

    /// Persist the record under the last-stream key. Best-effort: failures
    /// are logged and swallowed so persistence can never take down the
    /// observer.
    async fn persist_last(&self, record: &StreamRecord) {
        let payload = match serde_json::to_string(record) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(target = "scout.detect", %error, "snapshot encoding failed");
                return;
            }
        };
        if let Err(error) = self.store.put(LAST_STREAM_KEY, payload).await {
            warn!(
                target = "scout.detect",
                key = LAST_STREAM_KEY,
                %error,
                "snapshot persist failed"
            );
        }
    }
}

#[async_trait]
impl ResponseTap for StreamDetector {
    async fn on_response(&self, url: &str, body: &str) -> ScoutResult<Option<StreamRecord>> {
        if !is_manifest(url, body) {
            return Ok(None);
        }

        let record = self.registry.record(url, body).await;
        debug!(
            target = "scout.detect",
            url = %obfuscate_credentials(url),
            score = record.quality_score,
            bandwidth = ?record.bandwidth,
            resolution = ?record.resolution,
            "stream detected"
        );

        self.persist_last(&record).await;
        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::MemorySnapshotStore;

    fn detector() -> (StreamDetector, StreamRegistry, Arc<MemorySnapshotStore>) {
        let registry = StreamRegistry::new();
        let store = Arc::new(MemorySnapshotStore::new());
        let detector = StreamDetector::new(registry.clone(), store.clone());
        (detector, registry, store)
    }

    #[tokio::test]
    async fn non_manifest_responses_are_declined() {
        let (detector, registry, store) = detector();
        let result = detector
            .on_response("https://cdn.example.com/app.js", "console.log('hi')")
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(registry.is_empty().await);
        assert_eq!(store.get(LAST_STREAM_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn detections_are_recorded_and_snapshotted() {
        let (detector, registry, store) = detector();
        let record = detector
            .on_response(
                "https://cdn.example.com/master.m3u8",
                "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=4000000,RESOLUTION=1280x720\nhi.m3u8\n",
            )
            .await
            .unwrap()
            .expect("manifest should be detected");

        assert_eq!(record.quality_score, 50);
        assert_eq!(registry.len().await, 1);

        let stored = store.get(LAST_STREAM_KEY).await.unwrap().unwrap();
        let snapshot: StreamRecord = serde_json::from_str(&stored).unwrap();
        assert_eq!(snapshot, record);
    }

    #[tokio::test]
    async fn snapshot_tracks_recency_not_rank() {
        let (detector, registry, store) = detector();
        detector
            .on_response(
                "https://cdn.example.com/high.m3u8",
                "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=8000000\nhi.m3u8\n",
            )
            .await
            .unwrap();
        detector
            .on_response(
                "https://cdn.example.com/low.m3u8",
                "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=1600000\nlo.m3u8\n",
            )
            .await
            .unwrap();

        // Registry ranks by score; the snapshot holds whatever came last.
        assert_eq!(registry.best().await.unwrap().quality_score, 100);
        let stored = store.get(LAST_STREAM_KEY).await.unwrap().unwrap();
        let snapshot: StreamRecord = serde_json::from_str(&stored).unwrap();
        assert_eq!(snapshot.quality_score, 20);
        assert_eq!(snapshot.url, "https://cdn.example.com/low.m3u8");
    }

    #[tokio::test]
    async fn failing_store_does_not_fail_the_tap() {
        struct FailingStore;

        #[async_trait]
        impl SnapshotStore for FailingStore {
            async fn put(&self, key: &str, _value: String) -> crate::errors::SnapshotResult<()> {
                Err(crate::errors::SnapshotError::store_failed(key, "store offline"))
            }
            async fn get(&self, _key: &str) -> crate::errors::SnapshotResult<Option<String>> {
                Ok(None)
            }
        }

        let registry = StreamRegistry::new();
        let detector = StreamDetector::new(registry.clone(), Arc::new(FailingStore));
        let result = detector
            .on_response("https://cdn.example.com/a.m3u8", "#EXTM3U\nseg.ts\n")
            .await;
        assert!(result.is_ok());
        assert_eq!(registry.len().await, 1);
    }
}
