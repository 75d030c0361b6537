use crate::db::repositories::{RecordingsRepository, SettingsRepository};
use crate::db::RecordStore;
use chrono::{DateTime, Utc};
use log::{info, warn};

/// Result of one retention sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionOutcome {
    /// Retention is set to keep everything
    Disabled,
    /// Nothing was old enough to delete, so nothing was written
    Unchanged { kept: usize },
    /// Expired recordings were removed and the collection rewritten
    Pruned { kept: usize, removed: usize },
}

impl RetentionOutcome {
    pub fn removed(&self) -> usize {
        match self {
            RetentionOutcome::Pruned { removed, .. } => *removed,
            _ => 0,
        }
    }
}

/// Time-window retention over the recordings collection.
///
/// Runs as a single sweep when the application starts, not as a background
/// timer. The read-filter-write sequence is not guarded against a concurrent
/// sweep.
pub struct StorageCleanupService {
    settings_repo: SettingsRepository,
    recordings_repo: RecordingsRepository,
}

impl StorageCleanupService {
    /// Create a new storage cleanup service
    pub fn new(records: RecordStore) -> Self {
        Self {
            settings_repo: SettingsRepository::new(records.clone()),
            recordings_repo: RecordingsRepository::new(records),
        }
    }

    /// Apply the stored retention policy as of now
    pub fn apply_retention_policy(&self) -> RetentionOutcome {
        self.apply_retention_policy_at(Utc::now())
    }

    /// Apply the stored retention policy as of `now`.
    ///
    /// Recordings whose timestamp cannot be parsed are always kept.
    pub fn apply_retention_policy_at(&self, now: DateTime<Utc>) -> RetentionOutcome {
        let config = self.settings_repo.get_storage_config();
        if config.keeps_forever() {
            info!("Retention policy is 'keep forever', no recordings deleted");
            return RetentionOutcome::Disabled;
        }

        // A window reaching past the earliest representable date cannot expire anything
        let window = chrono::Duration::days(i64::from(config.retention_days));
        let cutoff = match now.checked_sub_signed(window) {
            Some(cutoff) => cutoff,
            None => {
                info!(
                    "Retention window of {} days predates every recording, nothing to delete",
                    config.retention_days
                );
                return RetentionOutcome::Unchanged {
                    kept: self.recordings_repo.count(),
                };
            }
        };
        info!(
            "Cleaning up recordings older than {} days (before {})",
            config.retention_days, cutoff
        );

        let recordings = self.recordings_repo.get_all();
        let total = recordings.len();
        let mut unparsable = 0;

        let kept: Vec<_> = recordings
            .into_iter()
            .filter(|recording| match recording.captured_at() {
                Some(captured_at) => captured_at >= cutoff,
                None => {
                    unparsable += 1;
                    true
                }
            })
            .collect();

        if unparsable > 0 {
            warn!(
                "Kept {} recordings with unparsable timestamps during retention sweep",
                unparsable
            );
        }

        if kept.len() < total {
            let removed = total - kept.len();
            self.recordings_repo.save_all(&kept);
            info!("Cleaned up {} expired recordings", removed);
            RetentionOutcome::Pruned {
                kept: kept.len(),
                removed,
            }
        } else {
            info!("No expired recordings found");
            RetentionOutcome::Unchanged { kept: total }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::recording_models::format_timestamp;
    use crate::db::models::{Recording, StorageConfig};
    use crate::db::{keys, RecordStore};
    use crate::test_utils::CountingStore;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn recording(id: &str, timestamp: String) -> Recording {
        Recording {
            id: id.to_string(),
            timestamp,
            camera_name: "Front Door".to_string(),
            title: String::new(),
            summary: String::new(),
            video_data_uri: String::new(),
        }
    }

    fn aged(id: &str, age: Duration) -> Recording {
        recording(id, format_timestamp(now() - age))
    }

    fn setup(retention_days: u32, recordings: &[Recording]) -> (Arc<CountingStore>, RecordStore) {
        let store = Arc::new(CountingStore::new());
        let records = RecordStore::new(store.clone());
        records.set(keys::STORAGE_CONFIG, &StorageConfig { retention_days });
        records.set(keys::RECORDINGS, recordings);
        (store, records)
    }

    fn stored_ids(records: &RecordStore) -> Vec<String> {
        records
            .get::<Vec<Recording>>(keys::RECORDINGS, vec![])
            .into_iter()
            .map(|r| r.id)
            .collect()
    }

    #[test]
    fn test_keep_forever_performs_no_writes() {
        let (store, records) = setup(0, &[aged("r1", Duration::days(3650))]);
        let writes_before = store.writes();

        let outcome = StorageCleanupService::new(records.clone()).apply_retention_policy_at(now());

        assert_eq!(outcome, RetentionOutcome::Disabled);
        assert_eq!(store.writes(), writes_before);
        assert_eq!(stored_ids(&records), vec!["r1"]);
    }

    #[test]
    fn test_seven_day_window() {
        let (_, records) = setup(
            7,
            &[aged("r1", Duration::days(10)), aged("r2", Duration::days(2))],
        );

        let outcome = StorageCleanupService::new(records.clone()).apply_retention_policy_at(now());

        assert_eq!(outcome, RetentionOutcome::Pruned { kept: 1, removed: 1 });
        assert_eq!(stored_ids(&records), vec!["r2"]);
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let (_, records) = setup(
            1,
            &[
                aged("exact", Duration::days(1)),
                aged("just-over", Duration::days(1) + Duration::milliseconds(1)),
            ],
        );

        StorageCleanupService::new(records.clone()).apply_retention_policy_at(now());
        assert_eq!(stored_ids(&records), vec!["exact"]);
    }

    #[test]
    fn test_second_run_writes_nothing() {
        let (store, records) = setup(
            30,
            &[aged("old", Duration::days(31)), aged("new", Duration::hours(1))],
        );
        let service = StorageCleanupService::new(records.clone());

        assert_eq!(service.apply_retention_policy_at(now()).removed(), 1);
        let writes_after_first = store.writes();
        let state_after_first = records.raw(keys::RECORDINGS);

        assert_eq!(
            service.apply_retention_policy_at(now()),
            RetentionOutcome::Unchanged { kept: 1 }
        );
        assert_eq!(store.writes(), writes_after_first);
        assert_eq!(records.raw(keys::RECORDINGS), state_after_first);
    }

    #[test]
    fn test_unparsable_timestamps_are_kept() {
        let (_, records) = setup(
            7,
            &[
                recording("broken", "not a date".to_string()),
                aged("old", Duration::days(8)),
            ],
        );

        let outcome = StorageCleanupService::new(records.clone()).apply_retention_policy_at(now());

        assert_eq!(outcome, RetentionOutcome::Pruned { kept: 1, removed: 1 });
        assert_eq!(stored_ids(&records), vec!["broken"]);
    }

    #[test]
    fn test_window_beyond_representable_dates_keeps_everything() {
        let (store, records) = setup(
            0,
            &[aged("ancient", Duration::days(36_500)), aged("new", Duration::hours(1))],
        );
        SettingsRepository::new(records.clone())
            .set_retention_days(100_000_000)
            .unwrap();
        let writes_before = store.writes();

        let outcome = StorageCleanupService::new(records.clone()).apply_retention_policy_at(now());

        assert_eq!(outcome, RetentionOutcome::Unchanged { kept: 2 });
        assert_eq!(store.writes(), writes_before);
        assert_eq!(stored_ids(&records), vec!["ancient", "new"]);
    }

    #[test]
    fn test_no_recordings() {
        let (store, records) = setup(7, &[]);
        let writes_before = store.writes();

        let outcome = StorageCleanupService::new(records).apply_retention_policy_at(now());

        assert_eq!(outcome, RetentionOutcome::Unchanged { kept: 0 });
        assert_eq!(store.writes(), writes_before);
    }

    #[test]
    fn test_every_removed_recording_was_older_than_cutoff() {
        let ages = [0, 1, 5, 6, 7, 8, 29, 30, 31, 90];
        let recordings: Vec<_> = ages
            .iter()
            .map(|d| aged(&format!("r{}", d), Duration::days(*d) + Duration::minutes(1)))
            .collect();

        for days in [1u32, 7, 30, 90] {
            let (_, records) = setup(days, &recordings);
            StorageCleanupService::new(records.clone()).apply_retention_policy_at(now());

            let cutoff = now() - Duration::days(days as i64);
            let kept = stored_ids(&records);
            for recording in &recordings {
                let captured_at = recording.captured_at().unwrap();
                assert_eq!(
                    kept.contains(&recording.id),
                    captured_at >= cutoff,
                    "{} with retention {}",
                    recording.id,
                    days
                );
            }
        }
    }
}
