pub mod camera_models;
pub mod event_models;
pub mod layout_models;
pub mod recording_models;
pub mod storage_models;
pub mod user_models;

pub use camera_models::{Camera, CameraInput, PLACEHOLDER_THUMBNAIL};
pub use event_models::{Event, EventType};
pub use layout_models::{GridSlot, Layout, LayoutGrid, MAX_GRID_SIZE};
pub use recording_models::{Recording, RecordingSummary};
pub use storage_models::StorageConfig;
pub use user_models::{SessionUser, User, UserRole};

/// Generate a collection id such as `rec-5f0c...`
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}
