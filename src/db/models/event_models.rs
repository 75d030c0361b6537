use serde::{Deserialize, Serialize};

/// Kind of entry in the event log
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventType {
    #[serde(rename = "Recording")]
    Recording,
    #[serde(rename = "Object Detection")]
    ObjectDetection,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::Recording => write!(f, "Recording"),
            EventType::ObjectDetection => write!(f, "Object Detection"),
        }
    }
}

/// Event log entry. Events are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub camera_name: String,
    pub description: String,
    /// Id of the related entity, e.g. a recording
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
}
