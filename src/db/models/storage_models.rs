use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Retention settings for recordings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    /// Days to keep recordings; `0` keeps them indefinitely
    pub retention_days: u32,
}

impl StorageConfig {
    /// Retention periods offered by the dashboard
    pub const PRESETS: [u32; 5] = [0, 1, 7, 30, 90];

    /// Build a config from an untrusted day count
    pub fn with_retention_days(days: i64) -> Result<Self, Error> {
        if days < 0 {
            return Err(Error::Config(format!(
                "Retention days must not be negative, got {}",
                days
            )));
        }
        let retention_days = u32::try_from(days)
            .map_err(|_| Error::Config(format!("Retention days out of range: {}", days)))?;
        Ok(Self { retention_days })
    }

    pub fn keeps_forever(&self) -> bool {
        self.retention_days == 0
    }
}
