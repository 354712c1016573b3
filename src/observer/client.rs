//! Observed reqwest client
//!
//! The second interception point: a decorator over `reqwest::Client` whose
//! responses are inspected in flight. The response body is buffered exactly
//! once into [`bytes::Bytes`]; taps receive their own cheap clone of the
//! buffer, so inspection can never consume the bytes the caller reads.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};

use crate::errors::FetchResult;
use crate::observer::tap::{ResponseTap, run_taps};

/// A completed response with its body preserved for the caller.
///
/// Status, headers, final URL and body pass through from the underlying
/// response unchanged. The body is shared `Bytes`, so every read via
/// [`bytes`](Self::bytes) or [`text`](Self::text) is independent — nothing
/// here is a one-shot stream.
#[derive(Debug, Clone)]
pub struct TappedResponse {
    status: StatusCode,
    headers: HeaderMap,
    url: String,
    body: Bytes,
}

impl TappedResponse {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, url: String, body: Bytes) -> Self {
        Self {
            status,
            headers,
            url,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Final URL of the response, after any redirects.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The full body. Cheap to call repeatedly; each caller gets a handle
    /// to the same immutable buffer.
    pub fn bytes(&self) -> Bytes {
        self.body.clone()
    }

    /// The body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn content_length(&self) -> usize {
        self.body.len()
    }
}

/// Observing decorator over a `reqwest::Client`.
///
/// Transport errors and body-read errors surface to the caller exactly as
/// the underlying client produced them. Only successful (2xx) responses are
/// offered to the tap chain, and tap failures are logged, never propagated.
pub struct ObservedClient {
    inner: Client,
    taps: Vec<Arc<dyn ResponseTap>>,
}

impl ObservedClient {
    pub fn new(inner: Client, taps: Vec<Arc<dyn ResponseTap>>) -> Self {
        Self { inner, taps }
    }

    /// The wrapped client, for requests that should bypass observation.
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// GET a URL, observe the response, and hand the untouched response to
    /// the caller.
    pub async fn get(&self, url: &str) -> FetchResult<TappedResponse> {
        let response = self.inner.get(url).send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let final_url = response.url().to_string();
        let body = response.bytes().await?;

        if status.is_success() {
            let inspected = body.clone();
            let text = String::from_utf8_lossy(&inspected).to_string();
            run_taps(&self.taps, &final_url, &text).await;
        }

        Ok(TappedResponse::new(status, headers, final_url, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tapped_response_supports_repeated_independent_reads() {
        let body = Bytes::from_static(b"#EXTM3U\nseg1.ts\nseg2.ts\n");
        let response = TappedResponse::new(
            StatusCode::OK,
            HeaderMap::new(),
            "https://cdn.example.com/index.m3u8".to_string(),
            body,
        );

        // A tap-style read of a clone...
        let tap_copy = response.bytes();
        assert_eq!(&tap_copy[..], b"#EXTM3U\nseg1.ts\nseg2.ts\n");

        // ...leaves the caller's subsequent reads fully intact.
        assert_eq!(response.text(), "#EXTM3U\nseg1.ts\nseg2.ts\n");
        assert_eq!(response.bytes().len(), response.content_length());
        assert_eq!(response.text(), response.text());
    }

    #[test]
    fn tapped_response_preserves_metadata() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/vnd.apple.mpegurl".parse().unwrap());
        let response = TappedResponse::new(
            StatusCode::OK,
            headers,
            "https://cdn.example.com/index.m3u8".to_string(),
            Bytes::from_static(b"#EXTM3U"),
        );

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.url(), "https://cdn.example.com/index.m3u8");
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/vnd.apple.mpegurl"
        );
    }

    #[test]
    fn lossy_text_decode_never_fails() {
        let response = TappedResponse::new(
            StatusCode::OK,
            HeaderMap::new(),
            "https://cdn.example.com/blob".to_string(),
            Bytes::from_static(&[0x23, 0xff, 0xfe, 0x45]),
        );
        // Invalid UTF-8 is replaced, not fatal.
        assert!(response.text().starts_with('#'));
    }
}
