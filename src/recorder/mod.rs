pub mod record;
pub mod scheduler;
pub mod storage_cleanup;
pub mod storage_usage;

pub use record::{FrameSource, RecordingManager, Summarizer};
pub use scheduler::RecordingScheduler;
pub use storage_cleanup::{RetentionOutcome, StorageCleanupService};
pub use storage_usage::{format_bytes, StorageUsage, StorageUsageAccountant};
