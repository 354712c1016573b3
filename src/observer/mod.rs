//! Network observation
//!
//! Passive taps over two independent request mechanisms: the trait-based
//! text client ([`ObservedHttpClient`]) and the raw reqwest client
//! ([`ObservedClient`]). Neither issues requests of its own; both forward
//! completed response bodies to the [`ResponseTap`] chain, where the
//! [`StreamDetector`] classifies, records and snapshots streams.
//!
//! The observer has a one-way lifecycle: [`NetworkObserver::install`] builds
//! both observed clients around a shared detector, and there is no
//! uninstall path. Hosts that stop wanting observation simply stop routing
//! requests through the observed clients.

pub mod client;
pub mod http_client;
pub mod tap;

pub use client::{ObservedClient, TappedResponse};
pub use http_client::{ObservedHttpClient, PlainHttpClient, TextFetch};
pub use tap::{ResponseTap, StreamDetector};

use std::sync::Arc;

use reqwest::Client;

use crate::config::ScoutConfig;
use crate::registry::StreamRegistry;
use crate::snapshot::SnapshotStore;

/// Installed observation over both request mechanisms.
///
/// Construction is installation. Both observed clients share one
/// [`StreamDetector`] feeding the same registry and snapshot store, so a
/// stream is ranked identically no matter which mechanism surfaced it.
pub struct NetworkObserver {
    fetch: ObservedClient,
    request: ObservedHttpClient<PlainHttpClient>,
    registry: StreamRegistry,
}

impl NetworkObserver {
    /// Install with default configuration.
    pub fn install(registry: StreamRegistry, store: Arc<dyn SnapshotStore>) -> Self {
        Self::install_with(&ScoutConfig::default(), registry, store, Vec::new())
    }

    /// Install with explicit configuration and any extra taps to append to
    /// the chain after the stream detector.
    pub fn install_with(
        config: &ScoutConfig,
        registry: StreamRegistry,
        store: Arc<dyn SnapshotStore>,
        extra_taps: Vec<Arc<dyn ResponseTap>>,
    ) -> Self {
        let detector: Arc<dyn ResponseTap> =
            Arc::new(StreamDetector::new(registry.clone(), store));
        let mut taps = vec![detector];
        taps.extend(extra_taps);

        let raw_client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            fetch: ObservedClient::new(raw_client, taps.clone()),
            request: ObservedHttpClient::new(PlainHttpClient::with_config(config), taps),
            registry,
        }
    }

    /// The observed raw client (fetch-style mechanism).
    pub fn fetch_client(&self) -> &ObservedClient {
        &self.fetch
    }

    /// The observed text client (request-object-style mechanism).
    pub fn request_client(&self) -> &ObservedHttpClient<PlainHttpClient> {
        &self.request
    }

    /// The registry both mechanisms feed.
    pub fn registry(&self) -> &StreamRegistry {
        &self.registry
    }
}
