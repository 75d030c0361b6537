use crate::db::models::Recording;
use crate::db::repositories::CamerasRepository;
use crate::db::RecordStore;
use crate::recorder::record::{FrameSource, RecordingManager};
use anyhow::Result;
use log::{error, info};
use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Periodically records a clip from the first configured camera
pub struct RecordingScheduler {
    cameras_repo: CamerasRepository,
    recording_manager: Arc<RecordingManager>,
    frame_source: Arc<dyn FrameSource>,
    check_interval: Duration,
}

impl RecordingScheduler {
    /// Create a new recording scheduler
    pub fn new(
        records: RecordStore,
        recording_manager: Arc<RecordingManager>,
        frame_source: Arc<dyn FrameSource>,
        check_interval_secs: u64,
    ) -> Self {
        Self {
            cameras_repo: CamerasRepository::new(records),
            recording_manager,
            frame_source,
            check_interval: Duration::from_secs(check_interval_secs),
        }
    }

    /// Start the recording scheduler service
    pub async fn start(self: Arc<Self>) -> Result<()> {
        info!(
            "Starting recording scheduler with interval of {} seconds",
            self.check_interval.as_secs()
        );

        tokio::spawn(async move {
            let mut interval = interval(self.check_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;

                if let Err(e) = self.run_once().await {
                    error!("Error running scheduled recording: {}", e);
                }
            }
        });

        Ok(())
    }

    /// Record one clip from the first camera, if there is one
    pub async fn run_once(&self) -> Result<Option<Recording>> {
        let camera = match self.cameras_repo.get_all().into_iter().next() {
            Some(camera) => camera,
            None => return Ok(None),
        };

        info!("Saving a scheduled clip from {}", camera.name);
        let frame = self.frame_source.capture_frame(&camera);
        let recording = self.recording_manager.capture(&camera, frame).await?;
        Ok(Some(recording))
    }
}
