use crate::db::mirror::CameraMirror;
use crate::db::models::user_models::SessionUser;
use crate::db::models::{new_id, Camera, CameraInput};
use crate::db::repositories::CamerasRepository;
use crate::db::RecordStore;
use crate::error::Error;
use crate::security::require_admin;
use anyhow::Result;
use log::info;

/// Admin-facing camera management.
///
/// The record store is authoritative. After every change the full camera list
/// is copied to the mirror so the API serves the same set.
pub struct CameraManager {
    cameras_repo: CamerasRepository,
    mirror: Option<CameraMirror>,
}

impl CameraManager {
    pub fn new(records: RecordStore, mirror: Option<CameraMirror>) -> Self {
        Self {
            cameras_repo: CamerasRepository::new(records),
            mirror,
        }
    }

    fn sync_mirror(&self, cameras: &[Camera]) {
        if let Some(mirror) = &self.mirror {
            mirror.save_cameras(cameras);
        }
    }

    pub fn list_cameras(&self) -> Vec<Camera> {
        self.cameras_repo.get_all()
    }

    pub fn add_camera(&self, actor: Option<&SessionUser>, input: CameraInput) -> Result<Camera> {
        require_admin(actor)?;
        if input.name.trim().is_empty() {
            return Err(Error::Validation("Camera name cannot be empty".to_string()).into());
        }

        let camera = input.into_camera(new_id("cam"));
        let cameras = self.cameras_repo.create(&camera);
        self.sync_mirror(&cameras);

        info!("Camera \"{}\" has been added", camera.name);
        Ok(camera)
    }

    pub fn update_camera(
        &self,
        actor: Option<&SessionUser>,
        id: &str,
        input: CameraInput,
    ) -> Result<Camera> {
        require_admin(actor)?;

        let mut camera = self
            .cameras_repo
            .get_by_id(id)
            .ok_or_else(|| Error::NotFound(format!("Camera not found: {}", id)))?;
        input.apply_to(&mut camera);

        let cameras = self.cameras_repo.update(&camera)?;
        self.sync_mirror(&cameras);

        info!("Camera \"{}\" has been updated", camera.name);
        Ok(camera)
    }

    /// Delete a camera. Layouts that still reference it show an empty slot.
    pub fn delete_camera(&self, actor: Option<&SessionUser>, id: &str) -> Result<()> {
        require_admin(actor)?;

        let cameras = self
            .cameras_repo
            .delete(id)
            .ok_or_else(|| Error::NotFound(format!("Camera not found: {}", id)))?;
        self.sync_mirror(&cameras);

        info!("Camera {} deleted", id);
        Ok(())
    }
}
