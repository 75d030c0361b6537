use crate::db::models::recording_models::{format_timestamp, sort_newest_first};
use crate::db::models::{new_id, Event, EventType};
use crate::db::{keys, RecordStore};
use chrono::Utc;
use tracing::info;

/// Append-only event log
#[derive(Clone)]
pub struct EventsRepository {
    records: RecordStore,
}

impl EventsRepository {
    pub fn new(records: RecordStore) -> Self {
        Self { records }
    }

    pub fn get_all(&self) -> Vec<Event> {
        self.records.get(keys::EVENTS, Vec::new())
    }

    /// Events for the log view, newest first
    pub fn get_newest_first(&self) -> Vec<Event> {
        let mut events = self.get_all();
        sort_newest_first(&mut events, |e| e.timestamp.as_str());
        events
    }

    pub fn append(&self, event: &Event) {
        let mut events = self.get_all();
        events.push(event.clone());
        self.records.set(keys::EVENTS, &events);
    }

    /// Build and append an event stamped now
    pub fn record(
        &self,
        event_type: EventType,
        camera_name: &str,
        description: &str,
        reference_id: Option<String>,
    ) -> Event {
        let event = Event {
            id: new_id("evt"),
            timestamp: format_timestamp(Utc::now()),
            event_type,
            camera_name: camera_name.to_string(),
            description: description.to_string(),
            reference_id,
        };
        info!("{} event from {}: {}", event_type, camera_name, description);
        self.append(&event);
        event
    }

    /// Drop the whole log
    pub fn clear(&self) {
        self.records.remove(keys::EVENTS);
    }
}
