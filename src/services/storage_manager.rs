use crate::db::models::user_models::SessionUser;
use crate::db::models::StorageConfig;
use crate::db::repositories::{RecordingsRepository, SettingsRepository};
use crate::db::RecordStore;
use crate::recorder::storage_usage::{StorageUsage, StorageUsageAccountant};
use crate::security::require_admin;
use anyhow::Result;
use log::info;
use serde::Serialize;

/// Figures shown on the storage settings page
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StorageSummary {
    pub recordings: usize,
    pub usage: StorageUsage,
    pub usage_percent: f64,
    pub retention: StorageConfig,
}

/// Storage settings operations. Changes are restricted to admins.
pub struct StorageManager {
    recordings_repo: RecordingsRepository,
    settings_repo: SettingsRepository,
    accountant: StorageUsageAccountant,
    quota_bytes: u64,
}

impl StorageManager {
    pub fn new(records: RecordStore, quota_bytes: u64) -> Self {
        Self {
            recordings_repo: RecordingsRepository::new(records.clone()),
            settings_repo: SettingsRepository::new(records.clone()),
            accountant: StorageUsageAccountant::new(records),
            quota_bytes,
        }
    }

    pub fn summary(&self) -> StorageSummary {
        let usage = self.accountant.get_storage_usage();
        StorageSummary {
            recordings: self.recordings_repo.count(),
            usage_percent: usage.percentage_of(self.quota_bytes),
            usage,
            retention: self.settings_repo.get_storage_config(),
        }
    }

    /// Delete every recording
    pub fn clear_all_recordings(&self, actor: Option<&SessionUser>) -> Result<usize> {
        let admin = require_admin(actor)?;
        let removed = self.recordings_repo.clear_all();
        info!("All recordings deleted by {}", admin.username);
        Ok(removed)
    }

    /// Change how long recordings are kept; takes effect on the next start
    pub fn set_retention_days(&self, actor: Option<&SessionUser>, days: i64) -> Result<StorageConfig> {
        require_admin(actor)?;
        self.settings_repo.set_retention_days(days)
    }
}
