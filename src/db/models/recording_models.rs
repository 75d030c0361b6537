use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

/// Summarized clip captured from a camera.
///
/// `camera_name` is free text copied at capture time, not a reference to a
/// stored camera. Recordings are never edited after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub id: String,
    /// ISO-8601 capture time
    pub timestamp: String,
    pub camera_name: String,
    pub title: String,
    pub summary: String,
    pub video_data_uri: String,
}

/// Title and summary produced for a captured clip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordingSummary {
    pub title: String,
    pub summary: String,
}

impl Recording {
    /// Capture time, or `None` when the stored timestamp is not a valid date
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

/// Format a timestamp the way recordings and events store it
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp into UTC
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value.trim()) {
        Ok(time) => Some(time.with_timezone(&Utc)),
        Err(e) => {
            warn!("Unparsable timestamp {:?}: {}", value, e);
            None
        }
    }
}

/// Sort newest first. Unparsable timestamps sort last.
pub fn sort_newest_first<T, F>(items: &mut [T], timestamp: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_cached_key(|item| std::cmp::Reverse(parse_timestamp(timestamp(item))));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_round_trip() {
        let time = Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 0).unwrap();
        let text = format_timestamp(time);
        assert_eq!(text, "2026-10-16T08:30:00.000Z");
        assert_eq!(parse_timestamp(&text), Some(time));
    }

    #[test]
    fn test_offsets_normalize_to_utc() {
        let parsed = parse_timestamp("2026-10-16T10:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 0).unwrap());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_sort_newest_first() {
        let mut stamps = vec![
            "2026-01-01T00:00:00Z".to_string(),
            "garbage".to_string(),
            "2026-03-01T00:00:00Z".to_string(),
        ];
        sort_newest_first(&mut stamps, |s| s.as_str());
        assert_eq!(stamps[0], "2026-03-01T00:00:00Z");
        assert_eq!(stamps[1], "2026-01-01T00:00:00Z");
        assert_eq!(stamps[2], "garbage");
    }

    #[test]
    fn test_sort_tolerates_padded_timestamps() {
        let mut stamps = vec![
            "2026-01-01T00:00:00Z".to_string(),
            " 2026-03-01T00:00:00Z\n".to_string(),
            "garbage".to_string(),
        ];
        sort_newest_first(&mut stamps, |s| s.as_str());
        assert_eq!(stamps[0], " 2026-03-01T00:00:00Z\n");
        assert_eq!(stamps[2], "garbage");
    }
}
