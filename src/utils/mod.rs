//! Shared utilities

pub mod human_format;
pub mod url;

pub use human_format::format_bandwidth;
pub use url::obfuscate_credentials;
