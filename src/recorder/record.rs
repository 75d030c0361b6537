use crate::db::models::recording_models::format_timestamp;
use crate::db::models::{new_id, Camera, Event, EventType, Recording, RecordingSummary};
use crate::db::repositories::{EventsRepository, RecordingsRepository};
use crate::db::{keys, RecordStore, WriteBatch};
use crate::error::Error;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use log::{error, info};
use std::sync::Arc;

/// Produces a title and summary for a captured clip, typically by calling a
/// hosted model
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, video_data_uri: &str, camera_name: &str)
        -> Result<RecordingSummary>;
}

/// Grabs the current frame of a camera's live feed as a data URI
pub trait FrameSource: Send + Sync {
    fn capture_frame(&self, camera: &Camera) -> Option<String>;
}

/// Turns captured frames into stored recordings and their events
pub struct RecordingManager {
    records: RecordStore,
    recordings_repo: RecordingsRepository,
    events_repo: EventsRepository,
    summarizer: Arc<dyn Summarizer>,
}

impl RecordingManager {
    /// Create a new recording manager
    pub fn new(records: RecordStore, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            recordings_repo: RecordingsRepository::new(records.clone()),
            events_repo: EventsRepository::new(records.clone()),
            records,
            summarizer,
        }
    }

    /// Summarize `frame` and store it as a recording of `camera`.
    ///
    /// Nothing is stored when there is no frame or summarization fails. The
    /// recording and its event are written in one batch.
    pub async fn capture(&self, camera: &Camera, frame: Option<String>) -> Result<Recording> {
        let frame = frame.ok_or_else(|| {
            error!("Could not capture frame for camera: {}", camera.name);
            Error::Capture(format!("Could not capture a frame from {}", camera.name))
        })?;

        let summary = self
            .summarizer
            .summarize(&frame, &camera.name)
            .await
            .map_err(|e| {
                error!("Error summarizing recording from {}: {}", camera.name, e);
                Error::Recording(format!("Failed to summarize recording: {}", e))
            })?;

        let timestamp = format_timestamp(Utc::now());
        let recording = Recording {
            id: new_id("rec"),
            timestamp: timestamp.clone(),
            camera_name: camera.name.clone(),
            title: summary.title,
            summary: summary.summary,
            video_data_uri: frame,
        };
        let event = Event {
            id: new_id("evt"),
            timestamp,
            event_type: EventType::Recording,
            camera_name: camera.name.clone(),
            description: format!("Clip saved: {}", recording.title),
            reference_id: Some(recording.id.clone()),
        };

        let mut recordings = self.recordings_repo.get_all();
        recordings.push(recording.clone());
        let mut events = self.events_repo.get_all();
        events.push(event);

        let batch = WriteBatch::new()
            .put(keys::RECORDINGS, &recordings)?
            .put(keys::EVENTS, &events)?;
        self.records.commit(batch)?;

        info!(
            "Recording {} saved from {}: {}",
            recording.id, recording.camera_name, recording.title
        );
        Ok(recording)
    }

    /// Log an object detection against a camera
    pub fn record_detection(&self, camera_name: &str, description: &str) -> Event {
        self.events_repo
            .record(EventType::ObjectDetection, camera_name, description, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::CameraInput;
    use crate::test_utils::CountingStore;
    use anyhow::anyhow;

    struct FixedSummarizer;

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        async fn summarize(&self, _uri: &str, camera_name: &str) -> Result<RecordingSummary> {
            Ok(RecordingSummary {
                title: format!("Activity at {}", camera_name),
                summary: "A person walks past".to_string(),
            })
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(&self, _uri: &str, _camera_name: &str) -> Result<RecordingSummary> {
            Err(anyhow!("model unavailable"))
        }
    }

    fn camera() -> Camera {
        CameraInput {
            name: "Front Door".to_string(),
            ..Default::default()
        }
        .into_camera("cam-01".to_string())
    }

    #[tokio::test]
    async fn test_capture_stores_recording_and_event_together() {
        let store = Arc::new(CountingStore::new());
        let records = RecordStore::new(store.clone());
        let manager = RecordingManager::new(records.clone(), Arc::new(FixedSummarizer));

        let recording = manager
            .capture(&camera(), Some("data:image/jpeg;base64,AAAA".to_string()))
            .await
            .unwrap();

        assert_eq!(store.writes(), 1);
        assert_eq!(recording.title, "Activity at Front Door");
        assert!(recording.captured_at().is_some());

        let recordings = RecordingsRepository::new(records.clone()).get_all();
        assert_eq!(recordings, vec![recording.clone()]);

        let events = EventsRepository::new(records).get_all();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::Recording);
        assert_eq!(events[0].description, "Clip saved: Activity at Front Door");
        assert_eq!(events[0].reference_id.as_deref(), Some(recording.id.as_str()));
    }

    #[tokio::test]
    async fn test_failed_summary_stores_nothing() {
        let store = Arc::new(CountingStore::new());
        let manager =
            RecordingManager::new(RecordStore::new(store.clone()), Arc::new(FailingSummarizer));

        let err = manager
            .capture(&camera(), Some("data:,".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Recording(_))));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_missing_frame_is_a_capture_error() {
        let manager = RecordingManager::new(RecordStore::in_memory(), Arc::new(FixedSummarizer));
        let err = manager.capture(&camera(), None).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Capture(_))));
    }

    #[test]
    fn test_record_detection() {
        let records = RecordStore::in_memory();
        let manager = RecordingManager::new(records.clone(), Arc::new(FixedSummarizer));
        manager.record_detection("Backyard", "Detected: dog (0.92)");

        let events = EventsRepository::new(records).get_all();
        assert_eq!(events[0].event_type, EventType::ObjectDetection);
        assert_eq!(events[0].camera_name, "Backyard");
    }
}
