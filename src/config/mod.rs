//! Scout configuration
//!
//! The crate deliberately has no configuration file of its own; hosts embed
//! [`ScoutConfig`] in their own config tree (it is fully serde-able, with
//! human-readable durations) or just use the defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod defaults;
pub mod duration_serde;

use defaults::*;

/// Tunables for the observer's fetch side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Upper bound on bytes read from a response body by the crate's own
    /// text client. Playlists are small; anything larger is truncated at
    /// this bound before analysis.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Connection timeout for the crate's own text client. Total request
    /// time is left unbounded so long-lived transfers are not cut off.
    #[serde(default = "default_connect_timeout", with = "duration_serde::duration")]
    pub connect_timeout: Duration,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied_to_empty_config() {
        let config: ScoutConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn durations_accept_human_readable_strings() {
        let config: ScoutConfig =
            serde_json::from_str(r#"{"connect_timeout": "30s"}"#).unwrap();
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
    }

    #[test]
    fn durations_accept_bare_seconds() {
        let config: ScoutConfig = serde_json::from_str(r#"{"connect_timeout": 5}"#).unwrap();
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
    }
}
