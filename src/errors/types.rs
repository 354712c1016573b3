//! Error type definitions for the stream scout
//!
//! This module defines all error types used throughout the crate, providing
//! a small hierarchical error system so callers can match on the layer that
//! actually failed.

use thiserror::Error;

/// Top-level crate error type
///
/// This enum represents all possible errors that can surface from the scout.
/// It uses `thiserror` to provide automatic error trait implementations and
/// proper error chaining.
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Fetch-layer errors (transport, status, body read)
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Snapshot persistence errors
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Record serialization failures
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Fetch-layer specific errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP transport errors from reqwest
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response status
    #[error("Non-success status {status} from {url}")]
    Status { status: u16, url: String },

    /// Failure while reading the response body stream
    #[error("Body read failed for {url}: {message}")]
    BodyRead { url: String, message: String },
}

/// Snapshot persistence specific errors
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The backing store rejected or failed the operation
    #[error("Store operation failed for key '{key}': {message}")]
    StoreFailed { key: String, message: String },

    /// Snapshot payload could not be encoded
    #[error("Snapshot encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Convenience methods for creating common error types
impl ScoutError {
    /// Create an internal error with a custom message
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl FetchError {
    /// Create a body-read error
    pub fn body_read<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::BodyRead {
            url: url.into(),
            message: message.into(),
        }
    }
}

impl SnapshotError {
    /// Create a store failure error
    pub fn store_failed<K: Into<String>, M: Into<String>>(key: K, message: M) -> Self {
        Self::StoreFailed {
            key: key.into(),
            message: message.into(),
        }
    }
}
