//! Quality analysis of manifest text
//!
//! Extracts declared bandwidth/resolution attributes from a playlist body and
//! derives a normalized 0-100 quality score from the peak bandwidth. All of
//! this operates on attribute declarations, not measured throughput.

use std::sync::OnceLock;

use regex::Regex;

/// Bandwidth (bits/sec) that maps to a full score of 100.
///
/// Fixed calibration point, not a computed threshold: 8 Mbps of declared
/// peak bandwidth is treated as "as good as it gets" and everything below
/// scales linearly. Tune here if the ceiling ever moves.
pub const QUALITY_CALIBRATION_BPS: u64 = 8_000_000;

/// Declared quality metrics extracted from one manifest body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QualityMetrics {
    /// Maximum `BANDWIDTH=` value found, 0 if none parsed
    pub max_bandwidth: u64,
    /// Maximum `width * height` across `RESOLUTION=` tags, 0 if none parsed
    pub max_resolution_area: u64,
    /// Normalized score in [0, 100]
    pub quality_score: u8,
}

fn bandwidth_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"BANDWIDTH=(\d+)").expect("valid bandwidth regex"))
}

fn resolution_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"RESOLUTION=(\d+)x(\d+)").expect("valid resolution regex"))
}

/// Analyze a manifest body and compute its declared quality metrics.
///
/// Malformed attribute values (digit runs that overflow, truncated tags)
/// are skipped rather than aborting the whole computation; a manifest with
/// no parseable `BANDWIDTH=` tag scores 0.
pub fn analyze_quality(body: &str) -> QualityMetrics {
    let max_bandwidth = bandwidth_regex()
        .captures_iter(body)
        .filter_map(|caps| caps[1].parse::<u64>().ok())
        .max()
        .unwrap_or(0);

    let max_resolution_area = resolution_regex()
        .captures_iter(body)
        .filter_map(|caps| {
            let width = caps[1].parse::<u64>().ok()?;
            let height = caps[2].parse::<u64>().ok()?;
            width.checked_mul(height)
        })
        .max()
        .unwrap_or(0);

    let quality_score = if max_bandwidth > 0 {
        let scaled = (max_bandwidth as f64 / QUALITY_CALIBRATION_BPS as f64) * 100.0;
        scaled.min(100.0).round() as u8
    } else {
        0
    };

    QualityMetrics {
        max_bandwidth,
        max_resolution_area,
        quality_score,
    }
}

/// First `WxH` declared on a stream-variant line.
///
/// Distinct from the max-area scan in [`analyze_quality`]: this is the
/// resolution a variant *declares about itself* on its `#EXT-X-STREAM-INF`
/// line, used for display, while scoring looks at every tag in the body.
pub fn declared_resolution(body: &str) -> Option<String> {
    for raw_line in body.lines() {
        let line = raw_line.trim();
        if !line.starts_with("#EXT-X-STREAM-INF") {
            continue;
        }
        if let Some(caps) = resolution_regex().captures(line) {
            return Some(format!("{}x{}", &caps[1], &caps[2]));
        }
    }
    None
}

/// Count segment-ish lines: non-empty after trimming and not tag/comment
/// lines. For a media playlist this is the segment URI count; for a master
/// playlist it counts variant URIs, which is still a useful size signal.
pub fn segment_count(body: &str) -> usize {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .count()
}
