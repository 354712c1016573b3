//! Configuration default values
//!
//! Central location for the crate's default knobs so they are changeable in
//! one place.

use std::time::Duration;

// Fetch defaults
pub const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub(super) fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

pub(super) fn default_connect_timeout() -> Duration {
    DEFAULT_CONNECT_TIMEOUT
}
