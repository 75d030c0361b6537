pub mod camera_manager;
pub mod storage_manager;

pub use camera_manager::CameraManager;
pub use storage_manager::{StorageManager, StorageSummary};
