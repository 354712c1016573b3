//! Trait-based text client and its observing decorator
//!
//! [`TextFetch`] is the request seam hosts already program against; wrapping
//! any implementation in [`ObservedHttpClient`] taps every successfully
//! fetched body without changing what the caller sees. This is one of the
//! two interception points — the other wraps a raw `reqwest::Client` in
//! [`super::client::ObservedClient`].

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use tracing::debug;

use crate::config::ScoutConfig;
use crate::errors::{FetchError, FetchResult};
use crate::observer::tap::{ResponseTap, run_taps};
use crate::utils::url::obfuscate_credentials;

/// Minimal text-fetch seam.
#[async_trait]
pub trait TextFetch: Send + Sync {
    /// Fetch a URL and return its body as text.
    async fn fetch_text(&self, url: &str) -> FetchResult<String>;
}

/// Plain [`TextFetch`] implementation over reqwest.
///
/// Body reads are streamed and truncated at the configured byte bound;
/// playlists are small and an oversized body is more likely a mislabeled
/// media segment than a manifest.
pub struct PlainHttpClient {
    client: Client,
    max_body_bytes: usize,
}

impl PlainHttpClient {
    pub fn new() -> Self {
        Self::with_config(&ScoutConfig::default())
    }

    pub fn with_config(config: &ScoutConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            max_body_bytes: config.max_body_bytes,
        }
    }

    /// Reuse an existing client (connection pools are worth sharing).
    pub fn from_client(client: Client, max_body_bytes: usize) -> Self {
        Self {
            client,
            max_body_bytes,
        }
    }
}

impl Default for PlainHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextFetch for PlainHttpClient {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: obfuscate_credentials(url),
            });
        }

        let mut stream = response.bytes_stream();
        let mut collected: Vec<u8> = Vec::with_capacity(8192);
        while let Some(chunk) = stream.next().await {
            let chunk =
                chunk.map_err(|e| FetchError::body_read(obfuscate_credentials(url), e.to_string()))?;
            if collected.len() + chunk.len() > self.max_body_bytes {
                collected.extend_from_slice(&chunk[..self.max_body_bytes - collected.len()]);
                break;
            }
            collected.extend_from_slice(&chunk);
        }

        debug!(
            target = "scout.fetch",
            url = %obfuscate_credentials(url),
            bytes = collected.len(),
            truncated = (collected.len() >= self.max_body_bytes),
            "fetched text body"
        );

        Ok(String::from_utf8_lossy(&collected).to_string())
    }
}

/// Observing decorator over any [`TextFetch`] implementation.
///
/// The inner client's result — body text or error — reaches the caller
/// byte-for-byte. Taps run against the completed body after the fetch; the
/// caller keeps its own owned `String`, so a tap can never consume or
/// mutate what the caller reads.
pub struct ObservedHttpClient<C> {
    inner: C,
    taps: Vec<Arc<dyn ResponseTap>>,
}

impl<C: TextFetch> ObservedHttpClient<C> {
    pub fn new(inner: C, taps: Vec<Arc<dyn ResponseTap>>) -> Self {
        Self { inner, taps }
    }

    /// The wrapped client, for calls that should bypass observation.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: TextFetch> TextFetch for ObservedHttpClient<C> {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        let text = self.inner.fetch_text(url).await?;
        run_taps(&self.taps, url, &text).await;
        Ok(text)
    }
}
