//! Human-readable formatting for stream metrics

/// Format a declared bandwidth as megabits per second with two decimals,
/// or the `"unknown"` sentinel when no bandwidth was declared.
pub fn format_bandwidth(bandwidth: Option<u64>) -> String {
    match bandwidth {
        Some(bps) => {
            let mbps = bps as f64 / 1_000_000.0;
            format!("{mbps:.2} Mbps")
        }
        None => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_known_bandwidth_in_mbps() {
        assert_eq!(format_bandwidth(Some(8_000_000)), "8.00 Mbps");
        assert_eq!(format_bandwidth(Some(1_234_567)), "1.23 Mbps");
        assert_eq!(format_bandwidth(Some(500_000)), "0.50 Mbps");
    }

    #[test]
    fn formats_absent_bandwidth_as_unknown() {
        assert_eq!(format_bandwidth(None), "unknown");
    }
}
