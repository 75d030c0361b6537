use crate::db::models::Camera;
use crate::db::{keys, RecordStore};
use crate::error::Error;
use anyhow::Result;
use tracing::info;

/// Cameras repository for handling camera operations
#[derive(Clone)]
pub struct CamerasRepository {
    records: RecordStore,
}

impl CamerasRepository {
    /// Create a new cameras repository
    pub fn new(records: RecordStore) -> Self {
        Self { records }
    }

    /// Get all cameras
    pub fn get_all(&self) -> Vec<Camera> {
        self.records.get(keys::CAMERAS, Vec::new())
    }

    /// Get camera by ID
    pub fn get_by_id(&self, id: &str) -> Option<Camera> {
        self.get_all().into_iter().find(|c| c.id == id)
    }

    /// Replace the whole camera collection
    pub fn save_all(&self, cameras: &[Camera]) {
        self.records.set(keys::CAMERAS, cameras);
    }

    /// Append a new camera
    pub fn create(&self, camera: &Camera) -> Vec<Camera> {
        info!("Creating new camera: {}", camera.name);

        let mut cameras = self.get_all();
        cameras.push(camera.clone());
        self.save_all(&cameras);
        cameras
    }

    /// Update camera
    pub fn update(&self, camera: &Camera) -> Result<Vec<Camera>> {
        let mut cameras = self.get_all();
        let existing = cameras
            .iter_mut()
            .find(|c| c.id == camera.id)
            .ok_or_else(|| Error::NotFound(format!("Camera not found: {}", camera.id)))?;
        *existing = camera.clone();

        self.save_all(&cameras);
        info!("Updated camera: {}", camera.name);
        Ok(cameras)
    }

    /// Delete camera, returning the remaining cameras if it existed
    pub fn delete(&self, id: &str) -> Option<Vec<Camera>> {
        let mut cameras = self.get_all();
        let before = cameras.len();
        cameras.retain(|c| c.id != id);
        if cameras.len() == before {
            return None;
        }

        self.save_all(&cameras);
        info!("Deleted camera: {}", id);
        Some(cameras)
    }
}
