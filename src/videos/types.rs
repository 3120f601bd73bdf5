use crate::types::SensitiveWordCheck;
use serde::{Deserialize, Serialize};

/// `POST /videos/generations` body. Text-to-video sets `prompt`, image-to-video
/// sets `image_url`; both may be combined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoGenerationRequest {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<VideoImageUrl>,
    /// `"quality"` or `"speed"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_audio: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off_peak: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_amplitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive_word_check: Option<SensitiveWordCheck>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark_enabled: Option<bool>,
}

impl VideoGenerationRequest {
    pub fn text_to_video(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: Some(prompt.into()),
            ..Default::default()
        }
    }

    pub fn image_to_video(model: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            image_url: Some(VideoImageUrl::Single(image_url.into())),
            ..Default::default()
        }
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn image_url(mut self, image_url: impl Into<VideoImageUrl>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    pub fn with_audio(mut self, with_audio: bool) -> Self {
        self.with_audio = Some(with_audio);
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = Some(fps);
        self
    }
}

/// One image, several (first/last frame), or a provider-specific object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VideoImageUrl {
    Single(String),
    Many(Vec<String>),
    Object(serde_json::Map<String, serde_json::Value>),
}

impl From<&str> for VideoImageUrl {
    fn from(s: &str) -> Self {
        VideoImageUrl::Single(s.to_string())
    }
}

impl From<String> for VideoImageUrl {
    fn from(s: String) -> Self {
        VideoImageUrl::Single(s)
    }
}

impl From<Vec<String>> for VideoImageUrl {
    fn from(v: Vec<String>) -> Self {
        VideoImageUrl::Many(v)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub cover_image_url: String,
}

/// Video task status. `task_status` is `PROCESSING`, `SUCCESS` or `FAIL`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub video_result: Vec<VideoResult>,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub task_status: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub request_id: String,
}
