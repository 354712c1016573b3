//! Manifest classification
//!
//! Decides whether a fetched payload is a media-playlist manifest worth
//! analyzing. Deliberately cheap: a substring probe on the body plus a
//! suffix probe on the URL, so it can run against every observed response.

/// Literal marker every HLS playlist starts with.
const MANIFEST_MARKER: &str = "#EXTM3U";

/// Playlist file suffix.
const MANIFEST_SUFFIX: &str = ".m3u8";

/// Returns true if `body` contains the `#EXTM3U` marker, or `url` ends with
/// the `.m3u8` suffix. Pure function, never fails.
///
/// Either signal alone is enough: servers routinely serve playlists from
/// extensionless URLs, and some playlist URLs return bodies only after a
/// redirect chain that loses the suffix.
pub fn is_manifest(url: &str, body: &str) -> bool {
    body.contains(MANIFEST_MARKER) || url.ends_with(MANIFEST_SUFFIX)
}
