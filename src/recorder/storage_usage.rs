use crate::db::{keys, RecordStore};
use serde::Serialize;

/// Keys whose contents count towards storage usage
const TRACKED_KEYS: [&str; 6] = [
    keys::RECORDINGS,
    keys::USERS,
    keys::LAYOUTS,
    keys::CAMERAS,
    keys::STORAGE_CONFIG,
    keys::ACTIVE_USER,
];

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Approximate size of the persisted data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageUsage {
    pub bytes: u64,
    pub formatted: String,
}

impl StorageUsage {
    pub fn from_bytes(bytes: u64) -> Self {
        Self {
            bytes,
            formatted: format_bytes(bytes),
        }
    }

    /// Share of `quota_bytes` in use, capped at 100
    pub fn percentage_of(&self, quota_bytes: u64) -> f64 {
        if quota_bytes == 0 {
            return 100.0;
        }
        (self.bytes as f64 / quota_bytes as f64 * 100.0).min(100.0)
    }
}

/// Render a byte count as `B`, `KB` or `MB`
pub fn format_bytes(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    }
}

/// Estimates how much data the record store holds.
///
/// The estimate is the UTF-8 length of the tracked values' raw text. Per-key
/// overhead of the medium is not counted.
pub struct StorageUsageAccountant {
    records: RecordStore,
}

impl StorageUsageAccountant {
    pub fn new(records: RecordStore) -> Self {
        Self { records }
    }

    pub fn get_storage_usage(&self) -> StorageUsage {
        let bytes: usize = TRACKED_KEYS
            .iter()
            .filter_map(|key| self.records.raw(key))
            .map(|value| value.len())
            .sum();

        StorageUsage::from_bytes(bytes as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{Camera, CameraInput, Event, EventType, StorageConfig};
    use crate::db::DetachedStore;
    use std::sync::Arc;

    #[test]
    fn test_format_boundaries() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1024 * 1024 - 1), "1024.00 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
        assert_eq!(format_bytes(5 * 1024 * 1024 + 512 * 1024), "5.50 MB");
    }

    #[test]
    fn test_empty_and_detached_stores() {
        let empty = StorageUsageAccountant::new(RecordStore::in_memory());
        assert_eq!(empty.get_storage_usage(), StorageUsage::from_bytes(0));

        let detached = StorageUsageAccountant::new(RecordStore::new(Arc::new(DetachedStore)));
        let usage = detached.get_storage_usage();
        assert_eq!(usage.bytes, 0);
        assert_eq!(usage.formatted, "0 B");
    }

    #[test]
    fn test_counts_utf8_bytes_of_tracked_keys_only() {
        let records = RecordStore::in_memory();
        records.set(keys::STORAGE_CONFIG, &StorageConfig { retention_days: 7 });
        records.set(keys::LAYOUTS, &vec!["é".to_string()]);
        records.set(
            keys::EVENTS,
            &vec![Event {
                id: "evt-1".to_string(),
                timestamp: String::new(),
                event_type: EventType::Recording,
                camera_name: String::new(),
                description: "ignored".to_string(),
                reference_id: None,
            }],
        );

        let usage = StorageUsageAccountant::new(records).get_storage_usage();
        let expected = r#"{"retentionDays":7}"#.len() + r#"["é"]"#.len();
        assert_eq!(usage.bytes, expected as u64);
        assert_eq!(r#"["é"]"#.len(), 6);
    }

    #[test]
    fn test_adding_entities_never_decreases_usage() {
        let records = RecordStore::in_memory();
        let accountant = StorageUsageAccountant::new(records.clone());
        let mut cameras: Vec<Camera> = Vec::new();
        let mut last = accountant.get_storage_usage().bytes;

        for i in 0..20 {
            cameras.push(
                CameraInput {
                    name: format!("Camera {}", i),
                    ..Default::default()
                }
                .into_camera(format!("cam-{}", i)),
            );
            records.set(keys::CAMERAS, &cameras);

            let bytes = accountant.get_storage_usage().bytes;
            assert!(bytes > last);
            last = bytes;
        }
    }

    #[test]
    fn test_percentage_is_capped() {
        let usage = StorageUsage::from_bytes(MIB);
        assert!((usage.percentage_of(4 * MIB) - 25.0).abs() < f64::EPSILON);
        assert_eq!(usage.percentage_of(MIB / 2), 100.0);
        assert_eq!(usage.percentage_of(0), 100.0);
    }
}
