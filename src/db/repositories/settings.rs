use crate::db::models::StorageConfig;
use crate::db::{keys, RecordStore};
use anyhow::Result;
use tracing::info;

/// Access to the stored retention settings
#[derive(Clone)]
pub struct SettingsRepository {
    records: RecordStore,
}

impl SettingsRepository {
    pub fn new(records: RecordStore) -> Self {
        Self { records }
    }

    /// Stored storage config; anything missing or invalid reads as "keep forever"
    pub fn get_storage_config(&self) -> StorageConfig {
        self.records.get(keys::STORAGE_CONFIG, StorageConfig::default())
    }

    pub fn save_storage_config(&self, config: &StorageConfig) {
        self.records.set(keys::STORAGE_CONFIG, config);
    }

    /// Validate and store a new retention period
    pub fn set_retention_days(&self, days: i64) -> Result<StorageConfig> {
        let config = StorageConfig::with_retention_days(days)?;
        self.save_storage_config(&config);

        if config.keeps_forever() {
            info!("Retention policy updated: recordings kept for all time");
        } else {
            info!("Retention policy updated: recordings kept for {} days", days);
        }
        Ok(config)
    }
}
