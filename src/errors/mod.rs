//! Centralized error handling for the stream scout
//!
//! This module unifies the error types used across the crate and provides
//! consistent aliases for fallible operations.
//!
//! # Error Categories
//!
//! - **Fetch Errors**: HTTP transport and body-read failures
//! - **Snapshot Errors**: key-value persistence failures (always best-effort)
//!
//! # Usage
//!
//! ```rust
//! use m3u8_scout::errors::{ScoutError, ScoutResult};
//!
//! async fn example_function() -> ScoutResult<String> {
//!     Ok("success".to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using ScoutError
pub type ScoutResult<T> = Result<T, ScoutError>;

/// Convenience type alias for fetch-layer Results
pub type FetchResult<T> = Result<T, FetchError>;

/// Convenience type alias for snapshot-layer Results
pub type SnapshotResult<T> = Result<T, SnapshotError>;
