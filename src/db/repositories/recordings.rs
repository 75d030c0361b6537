use crate::db::models::recording_models::sort_newest_first;
use crate::db::models::Recording;
use crate::db::{keys, RecordStore};
use tracing::info;

/// Recordings repository
#[derive(Clone)]
pub struct RecordingsRepository {
    records: RecordStore,
}

impl RecordingsRepository {
    pub fn new(records: RecordStore) -> Self {
        Self { records }
    }

    /// All recordings in stored order
    pub fn get_all(&self) -> Vec<Recording> {
        self.records.get(keys::RECORDINGS, Vec::new())
    }

    /// All recordings, newest first, for playback listings
    pub fn get_newest_first(&self) -> Vec<Recording> {
        let mut recordings = self.get_all();
        sort_newest_first(&mut recordings, |r| r.timestamp.as_str());
        recordings
    }

    pub fn get_by_id(&self, id: &str) -> Option<Recording> {
        self.get_all().into_iter().find(|r| r.id == id)
    }

    pub fn count(&self) -> usize {
        self.get_all().len()
    }

    /// Replace the whole collection
    pub fn save_all(&self, recordings: &[Recording]) {
        self.records.set(keys::RECORDINGS, recordings);
    }

    pub fn create(&self, recording: &Recording) -> Recording {
        info!("Saving recording {} from {}", recording.id, recording.camera_name);

        let mut recordings = self.get_all();
        recordings.push(recording.clone());
        self.save_all(&recordings);
        recording.clone()
    }

    /// Delete a single recording
    pub fn delete(&self, id: &str) -> bool {
        let mut recordings = self.get_all();
        let before = recordings.len();
        recordings.retain(|r| r.id != id);
        if recordings.len() == before {
            return false;
        }

        self.save_all(&recordings);
        info!("Deleted recording {}", id);
        true
    }

    /// Delete every recording, returning how many were removed
    pub fn clear_all(&self) -> usize {
        let removed = self.count();
        self.save_all(&[]);
        info!("Deleted all {} recordings", removed);
        removed
    }
}
