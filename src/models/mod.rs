//! Stream Scout Models
//!
//! Data models for observed streams. A [`StreamRecord`] is an immutable
//! capture of one analyzed manifest; the registry only ever appends and
//! re-ranks records, never mutates one in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed manifest, captured at detection time.
///
/// `bandwidth` and `resolution` serialize as the `"unknown"` sentinel when
/// absent so the persisted JSON keeps the shape the presentation layer and
/// snapshot consumers expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRecord {
    /// Capture time (wall-clock, ISO-8601 over serde)
    pub timestamp: DateTime<Utc>,
    /// Source address of the manifest
    pub url: String,
    /// Declared `WxH` of the first stream-variant line, if any
    #[serde(with = "unknown_string")]
    pub resolution: Option<String>,
    /// Peak declared bandwidth across variants, bits/sec
    #[serde(with = "unknown_u64")]
    pub bandwidth: Option<u64>,
    /// Non-comment, non-blank lines in the manifest body
    pub segment_count: usize,
    /// Normalized quality score in [0, 100], pure function of `bandwidth`
    pub quality_score: u8,
}

impl StreamRecord {
    /// Quality tier band for this record's score.
    pub fn quality_tier(&self) -> QualityTier {
        QualityTier::from_score(self.quality_score)
    }
}

/// Coarse quality banding used by presentation layers to style a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl QualityTier {
    /// Band a score: >= 80 excellent, >= 60 good, >= 40 fair, else poor.
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => QualityTier::Excellent,
            60..=79 => QualityTier::Good,
            40..=59 => QualityTier::Fair,
            _ => QualityTier::Poor,
        }
    }
}

/// Serde adapter writing `None` as the literal string `"unknown"`.
mod unknown_string {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(v),
            None => serializer.serialize_str("unknown"),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct UnknownStringVisitor;

        impl<'de> Visitor<'de> for UnknownStringVisitor {
            type Value = Option<String>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, with \"unknown\" meaning absent")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value == "unknown" {
                    Ok(None)
                } else {
                    Ok(Some(value.to_string()))
                }
            }
        }

        deserializer.deserialize_str(UnknownStringVisitor)
    }
}

/// Serde adapter writing `None` as the literal string `"unknown"` and
/// `Some(n)` as a bare integer.
mod unknown_u64 {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_u64(*v),
            None => serializer.serialize_str("unknown"),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct UnknownU64Visitor;

        impl<'de> Visitor<'de> for UnknownU64Visitor {
            type Value = Option<u64>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer, or the string \"unknown\"")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Some(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(value)
                    .map(Some)
                    .map_err(|_| de::Error::custom("negative bandwidth"))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value == "unknown" {
                    Ok(None)
                } else {
                    Err(de::Error::custom(format!(
                        "expected integer or \"unknown\", got '{value}'"
                    )))
                }
            }
        }

        deserializer.deserialize_any(UnknownU64Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> StreamRecord {
        StreamRecord {
            timestamp: "2024-05-01T12:00:00Z".parse().unwrap(),
            url: "https://cdn.example.com/live/index.m3u8".to_string(),
            resolution: Some("1920x1080".to_string()),
            bandwidth: Some(6_000_000),
            segment_count: 5,
            quality_score: 75,
        }
    }

    #[test]
    fn record_serializes_known_fields_as_values() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["resolution"], "1920x1080");
        assert_eq!(json["bandwidth"], 6_000_000);
        assert_eq!(json["segmentCount"], 5);
        assert_eq!(json["qualityScore"], 75);
    }

    #[test]
    fn record_serializes_absent_fields_as_unknown_sentinel() {
        let record = StreamRecord {
            resolution: None,
            bandwidth: None,
            ..sample_record()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["resolution"], "unknown");
        assert_eq!(json["bandwidth"], "unknown");
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = StreamRecord {
            resolution: None,
            bandwidth: None,
            ..sample_record()
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: StreamRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);

        let known = sample_record();
        let json = serde_json::to_string(&known).unwrap();
        let back: StreamRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, known);
    }

    #[test]
    fn quality_tier_bands() {
        assert_eq!(QualityTier::from_score(100), QualityTier::Excellent);
        assert_eq!(QualityTier::from_score(80), QualityTier::Excellent);
        assert_eq!(QualityTier::from_score(79), QualityTier::Good);
        assert_eq!(QualityTier::from_score(60), QualityTier::Good);
        assert_eq!(QualityTier::from_score(40), QualityTier::Fair);
        assert_eq!(QualityTier::from_score(39), QualityTier::Poor);
        assert_eq!(QualityTier::from_score(0), QualityTier::Poor);
    }
}
