pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod recorder;
pub mod security;
pub mod services;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export main components for easier use
pub use db::{DecodeError, RecordStore, WriteBatch};
pub use error::Error;
pub use recorder::{
    RecordingManager, RecordingScheduler, RetentionOutcome, StorageCleanupService, StorageUsage,
    StorageUsageAccountant,
};
pub use security::AuthService;
