use crate::db::models::Camera;
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Contents of the mirror file
#[derive(Debug, Default, Serialize, Deserialize)]
struct MirrorDb {
    #[serde(default)]
    cameras: Vec<Camera>,
    /// Other top-level entries, written back untouched
    #[serde(flatten)]
    rest: Map<String, Value>,
}

/// Best-effort server-side copy of the camera collection.
///
/// The record store stays authoritative; the mirror only exists so the API can
/// hand the camera list to automation scripts. Every failure degrades to an
/// empty list or a skipped write.
#[derive(Debug, Clone)]
pub struct CameraMirror {
    path: PathBuf,
}

impl CameraMirror {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn read_db(&self) -> MirrorDb {
        match std::fs::read_to_string(&self.path) {
            Ok(data) if data.trim().is_empty() => MirrorDb::default(),
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                error!("Error reading camera mirror {}: {}", self.path.display(), e);
                MirrorDb::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => MirrorDb::default(),
            Err(e) => {
                error!("Error reading camera mirror {}: {}", self.path.display(), e);
                MirrorDb::default()
            }
        }
    }

    fn write_db(&self, db: &MirrorDb) {
        let result = serde_json::to_string_pretty(db)
            .map_err(|e| e.to_string())
            .and_then(|data| std::fs::write(&self.path, data).map_err(|e| e.to_string()));

        if let Err(e) = result {
            error!("Error writing camera mirror {}: {}", self.path.display(), e);
        }
    }

    pub fn get_cameras(&self) -> Vec<Camera> {
        self.read_db().cameras
    }

    pub fn save_cameras(&self, cameras: &[Camera]) {
        let mut db = self.read_db();
        db.cameras = cameras.to_vec();
        self.write_db(&db);
    }
}
