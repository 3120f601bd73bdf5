//! Chat message format.

use serde::{Deserialize, Serialize};

/// One turn of a conversation.
///
/// `content` is `None` for assistant turns that only carried tool calls; it is
/// sent as `"content": null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub content: Option<MessageContent>,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self::with_content(Role::System, MessageContent::Text(text.into()))
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::with_content(Role::User, MessageContent::Text(text.into()))
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::with_content(Role::Assistant, MessageContent::Text(text.into()))
    }

    /// A text part followed by one image (URL or base64 data URI).
    pub fn multimodal(role: Role, text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self::with_parts(
            role,
            vec![ContentPart::text(text), ContentPart::image_url(image_url)],
        )
    }

    pub fn with_parts(role: Role, parts: Vec<ContentPart>) -> Self {
        Self::with_content(role, MessageContent::Parts(parts))
    }

    pub fn with_content(role: Role, content: MessageContent) -> Self {
        Self {
            role,
            content: Some(content),
        }
    }

    /// A turn without content, e.g. an assistant reply that only called tools.
    pub fn without_content(role: Role) -> Self {
        Self {
            role,
            content: None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.content.as_ref()?.as_text()
    }

    pub fn contains_image(&self) -> bool {
        match &self.content {
            None | Some(MessageContent::Text(_)) => false,
            Some(MessageContent::Parts(parts)) => parts.iter().any(|p| p.image_url.is_some()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// Plain text, or an array of typed parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(s) => Some(s),
            MessageContent::Parts(_) => None,
        }
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        MessageContent::Text(s.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        MessageContent::Text(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type")]
    pub part_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<ImageUrl>,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            part_type: "text".to_string(),
            text: Some(text.into()),
            image_url: None,
        }
    }

    /// An image by URL or base64 data URI.
    pub fn image_url(url: impl Into<String>) -> Self {
        Self {
            part_type: "image_url".to_string(),
            text: None,
            image_url: Some(ImageUrl { url: url.into() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_message_serializes_flat() {
        let v = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(v, json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn multimodal_message_serializes_parts() {
        let m = Message::multimodal(Role::User, "what is this?", "https://example.com/cat.png");
        assert!(m.contains_image());
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(
            v,
            json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "what is this?"},
                    {"type": "image_url", "image_url": {"url": "https://example.com/cat.png"}}
                ]
            })
        );
    }

    #[test]
    fn content_deserializes_either_shape() {
        let m: Message = serde_json::from_value(json!({"role": "assistant", "content": "ok"})).unwrap();
        assert_eq!(m.text(), Some("ok"));
        let m: Message = serde_json::from_value(
            json!({"role": "user", "content": [{"type": "text", "text": "a"}]}),
        )
        .unwrap();
        assert!(matches!(m.content, Some(MessageContent::Parts(ref p)) if p.len() == 1));
    }

    #[test]
    fn contentless_turn_serializes_null_and_reads_back() {
        let m = Message::without_content(Role::Assistant);
        assert_eq!(
            serde_json::to_value(&m).unwrap(),
            json!({"role": "assistant", "content": null})
        );
        assert!(!m.contains_image());

        let back: Message = serde_json::from_value(json!({"role": "assistant", "content": null})).unwrap();
        assert_eq!(back, m);
        let missing: Message = serde_json::from_value(json!({"role": "tool"})).unwrap();
        assert!(missing.content.is_none());
        assert!(missing.text().is_none());
    }
}
