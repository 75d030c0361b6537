use serde::{Deserialize, Serialize};

/// Thumbnail used when a camera is saved without one
pub const PLACEHOLDER_THUMBNAIL: &str = "https://placehold.co/800x600.png";

/// Camera model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stream_url: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
}

/// Editable camera fields, as submitted by an admin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stream_url: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub server: Option<String>,
}

impl CameraInput {
    fn thumbnail(&self) -> String {
        if self.thumbnail_url.trim().is_empty() {
            PLACEHOLDER_THUMBNAIL.to_string()
        } else {
            self.thumbnail_url.clone()
        }
    }

    fn server(&self) -> Option<String> {
        self.server.clone().filter(|s| !s.trim().is_empty())
    }

    /// Build a new camera with the given id
    pub fn into_camera(self, id: String) -> Camera {
        Camera {
            id,
            thumbnail_url: self.thumbnail(),
            server: self.server(),
            name: self.name,
            description: self.description,
            stream_url: self.stream_url,
        }
    }

    /// Overwrite the editable fields of `camera`, keeping its id
    pub fn apply_to(self, camera: &mut Camera) {
        camera.thumbnail_url = self.thumbnail();
        camera.server = self.server();
        camera.name = self.name;
        camera.description = self.description;
        camera.stream_url = self.stream_url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_thumbnail_gets_placeholder() {
        let camera = CameraInput {
            name: "Backyard".to_string(),
            server: Some("  ".to_string()),
            ..Default::default()
        }
        .into_camera("cam-02".to_string());

        assert_eq!(camera.thumbnail_url, PLACEHOLDER_THUMBNAIL);
        assert_eq!(camera.server, None);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = r#"{"id":"cam-01","name":"Front Door","description":"Porch","streamUrl":"rtsp://a","thumbnailUrl":"https://t"}"#;
        let camera: Camera = serde_json::from_str(json).unwrap();
        assert_eq!(camera.stream_url, "rtsp://a");
        assert_eq!(camera.server, None);
        assert_eq!(serde_json::to_string(&camera).unwrap(), json);
    }
}
