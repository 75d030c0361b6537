use argus_vision::config::SecurityConfig;
use argus_vision::db::models::recording_models::format_timestamp;
use argus_vision::db::models::{Recording, StorageConfig, UserRole};
use argus_vision::db::repositories::{RecordingsRepository, SettingsRepository};
use argus_vision::db::{keys, FileStore, RecordStore};
use argus_vision::{AuthService, RetentionOutcome, StorageCleanupService, StorageUsageAccountant};
use chrono::{Duration, Utc};
use std::path::Path;
use std::sync::Arc;

fn open(path: &Path) -> RecordStore {
    RecordStore::new(Arc::new(FileStore::open(path).unwrap()))
}

fn recording(id: &str, age: Duration) -> Recording {
    Recording {
        id: id.to_string(),
        timestamp: format_timestamp(Utc::now() - age),
        camera_name: "Front Door".to_string(),
        title: format!("Clip {}", id),
        summary: "Nothing unusual".to_string(),
        video_data_uri: "data:image/jpeg;base64,AAAA".to_string(),
    }
}

#[test]
fn retention_sweep_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("argus-data.json");

    {
        let records = open(&path);
        SettingsRepository::new(records.clone()).set_retention_days(7).unwrap();
        let recordings = RecordingsRepository::new(records);
        recordings.create(&recording("r1", Duration::days(10)));
        recordings.create(&recording("r2", Duration::days(2)));
    }

    // Cold start
    let records = open(&path);
    let outcome = StorageCleanupService::new(records.clone()).apply_retention_policy();
    assert_eq!(outcome, RetentionOutcome::Pruned { kept: 1, removed: 1 });

    let reopened = open(&path);
    let ids: Vec<_> = RecordingsRepository::new(reopened.clone())
        .get_all()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["r2"]);

    let again = StorageCleanupService::new(reopened).apply_retention_policy();
    assert_eq!(again, RetentionOutcome::Unchanged { kept: 1 });
}

#[test]
fn first_user_is_admin_second_is_viewer() {
    let dir = tempfile::tempdir().unwrap();
    let records = open(&dir.path().join("argus-data.json"));
    let auth = AuthService::new(
        records.clone(),
        &SecurityConfig {
            password_hash_cost: 4,
        },
    );

    let admin = auth.signup("admin", "secret", None).unwrap();
    let bob = auth.signup("bob", "secret", None).unwrap();

    assert_eq!(admin.role, UserRole::Admin);
    assert_eq!(bob.role, UserRole::Viewer);
    assert_eq!(auth.active_user().unwrap().username, "admin");

    let raw_users = records.raw(keys::USERS).unwrap();
    assert!(raw_users.contains("\"admin\""));
    assert!(raw_users.contains("\"bob\""));
    assert!(!raw_users.contains("\"secret\""));
}

#[test]
fn usage_grows_with_stored_data() {
    let dir = tempfile::tempdir().unwrap();
    let records = open(&dir.path().join("argus-data.json"));
    let accountant = StorageUsageAccountant::new(records.clone());

    let empty = accountant.get_storage_usage();
    assert_eq!(empty.formatted, "0 B");

    records.set(keys::STORAGE_CONFIG, &StorageConfig { retention_days: 30 });
    let configured = accountant.get_storage_usage();
    assert!(configured.bytes > empty.bytes);
    assert!(configured.formatted.ends_with(" B"));

    let big = Recording {
        video_data_uri: "A".repeat(4096),
        ..recording("r1", Duration::hours(1))
    };
    RecordingsRepository::new(records).create(&big);

    let usage = accountant.get_storage_usage();
    assert!(usage.bytes > 4096);
    assert!(usage.formatted.ends_with(" KB"));
}
