//! Manifest inspection
//!
//! Pure-text analysis of media-playlist manifests: deciding whether a fetched
//! payload is a manifest at all, and extracting the declared quality metrics
//! the registry ranks on. No network access lives here.

pub mod classify;
pub mod quality;

pub use classify::is_manifest;
pub use quality::{
    QUALITY_CALIBRATION_BPS, QualityMetrics, analyze_quality, declared_resolution, segment_count,
};
