//! Chat completion request and response shapes.

use crate::types::{CompletionUsage, Message, SensitiveWordCheck, Tool, ToolCall};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// `POST /chat/completions` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub do_sample: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<StopSequences>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive_word_check: Option<SensitiveWordCheck>,
    #[serde(
        default,
        deserialize_with = "crate::types::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tools: Vec<Tool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<Thinking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_stream: Option<bool>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            ..Default::default()
        }
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn do_sample(mut self, do_sample: bool) -> Self {
        self.do_sample = Some(do_sample);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn stop(mut self, stop: impl Into<StopSequences>) -> Self {
        self.stop = Some(stop.into());
        self
    }

    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }

    pub fn sensitive_word_check(mut self, check_type: impl Into<String>) -> Self {
        self.sensitive_word_check = Some(SensitiveWordCheck {
            check_type: check_type.into(),
        });
        self
    }

    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = tools;
        self
    }

    /// e.g. `"auto"`.
    pub fn tool_choice(mut self, choice: impl Into<String>) -> Self {
        self.tool_choice = Some(choice.into());
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    pub fn thinking(mut self, thinking: Thinking) -> Self {
        self.thinking = Some(thinking);
        self
    }

    pub fn watermark_enabled(mut self, enabled: bool) -> Self {
        self.watermark_enabled = Some(enabled);
        self
    }

    pub fn tool_stream(mut self, enabled: bool) -> Self {
        self.tool_stream = Some(enabled);
        self
    }
}

/// `stop` accepts a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopSequences {
    Single(String),
    Many(Vec<String>),
}

impl From<&str> for StopSequences {
    fn from(s: &str) -> Self {
        StopSequences::Single(s.to_string())
    }
}

impl From<String> for StopSequences {
    fn from(s: String) -> Self {
        StopSequences::Single(s)
    }
}

impl From<Vec<String>> for StopSequences {
    fn from(v: Vec<String>) -> Self {
        StopSequences::Many(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// `"text"` or `"json_object"`
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn text() -> Self {
        Self {
            format_type: "text".to_string(),
        }
    }

    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// Deep-thinking switch for reasoning models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thinking {
    /// `"enabled"` or `"disabled"`
    #[serde(rename = "type")]
    pub thinking_type: String,
}

impl Thinking {
    pub fn enabled() -> Self {
        Self {
            thinking_type: "enabled".to_string(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            thinking_type: "disabled".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub created: i64,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub choices: Vec<CompletionChoice>,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub usage: CompletionUsage,
}

impl ChatCompletion {
    /// Content of the first choice, if any.
    pub fn content(&self) -> Option<&str> {
        self.choices.first()?.message.content.as_deref()
    }
}

impl fmt::Display for ChatCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ChatCompletion(id={}, model={}, choices={})",
            self.id,
            self.model,
            self.choices.len()
        )?;
        for (i, choice) in self.choices.iter().enumerate() {
            writeln!(
                f,
                "  Choice {}: {} (finish_reason={})",
                i,
                choice.message.content.as_deref().unwrap_or(""),
                choice.finish_reason.as_deref().unwrap_or("")
            )?;
        }
        writeln!(
            f,
            "  Usage: prompt={}, completion={}, total={}",
            self.usage.prompt_tokens, self.usage.completion_tokens, self.usage.total_tokens
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionChoice {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub message: CompletionMessage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::types::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tool_calls: Vec<ToolCall>,
}

/// One incremental piece of a streamed completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub created: i64,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub choices: Vec<ChunkChoice>,
    /// Present on the final chunk only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<CompletionUsage>,
}

impl ChatCompletionChunk {
    /// Content delta of the first choice, if any.
    pub fn content(&self) -> Option<&str> {
        self.choices.first()?.delta.content.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkChoice {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub index: u32,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub delta: ChunkDelta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::types::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tool_calls: Vec<ToolCall>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_fields_are_omitted() {
        let req = ChatCompletionRequest::new("glm-4.6", vec![Message::user("hi")]);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v,
            json!({"model": "glm-4.6", "messages": [{"role": "user", "content": "hi"}]})
        );
    }

    #[test]
    fn builder_fields_serialize_with_wire_names() {
        let req = ChatCompletionRequest::new("glm-4.6", vec![])
            .message(Message::system("be brief"))
            .stop("END")
            .sensitive_word_check("ALL")
            .thinking(Thinking::enabled())
            .response_format(ResponseFormat::json_object())
            .meta("user_info", "tester")
            .tool_choice("auto")
            .max_tokens(64);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["stop"], "END");
        assert_eq!(v["sensitive_word_check"], json!({"type": "ALL"}));
        assert_eq!(v["thinking"], json!({"type": "enabled"}));
        assert_eq!(v["response_format"], json!({"type": "json_object"}));
        assert_eq!(v["meta"]["user_info"], "tester");
        assert_eq!(v["max_tokens"], 64);

        let many = ChatCompletionRequest::new("m", vec![]).stop(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(serde_json::to_value(&many).unwrap()["stop"], json!(["a", "b"]));
    }

    #[test]
    fn completion_display_summary() {
        let c: ChatCompletion = serde_json::from_value(json!({
            "id": "c1",
            "created": 1,
            "model": "glm-4.6",
            "choices": [{"index": 0, "finish_reason": "stop", "message": {"role": "assistant", "content": "Hello"}}],
            "usage": {"prompt_tokens": 3, "completion_tokens": 2, "total_tokens": 5}
        }))
        .unwrap();
        assert_eq!(c.content(), Some("Hello"));
        assert_eq!(
            c.to_string(),
            "ChatCompletion(id=c1, model=glm-4.6, choices=1)\n  Choice 0: Hello (finish_reason=stop)\n  Usage: prompt=3, completion=2, total=5\n"
        );
    }

    #[test]
    fn chunk_with_reasoning_and_tool_fragments() {
        let c: ChatCompletionChunk = serde_json::from_value(json!({
            "id": "k",
            "choices": [{"index": 0, "delta": {
                "reasoning_content": "thinking",
                "tool_calls": [{"index": 0, "id": "call_1", "type": "function",
                                "function": {"name": "f", "arguments": "{\"a\""}}]
            }}]
        }))
        .unwrap();
        let delta = &c.choices[0].delta;
        assert_eq!(delta.reasoning_content.as_deref(), Some("thinking"));
        assert_eq!(delta.tool_calls[0].function.arguments, "{\"a\"");
        assert!(c.content().is_none());
    }

    #[test]
    fn null_fields_in_completion_decode_as_empty() {
        let c: ChatCompletion = serde_json::from_str(
            r#"{"id":"c2","created":null,"model":null,
                "choices":[{"index":null,"finish_reason":null,
                            "message":{"role":null,"content":null,"tool_calls":null}}],
                "usage":null}"#,
        )
        .unwrap();
        let choice = &c.choices[0];
        assert_eq!(choice.finish_reason, None);
        assert_eq!(choice.message.role, None);
        assert!(choice.message.tool_calls.is_empty());
        assert_eq!(c.model, "");
        assert_eq!(c.usage, CompletionUsage::default());
        assert_eq!(
            c.to_string(),
            "ChatCompletion(id=c2, model=, choices=1)\n  Choice 0:  (finish_reason=)\n  Usage: prompt=0, completion=0, total=0\n"
        );

        let c: ChatCompletion = serde_json::from_str(r#"{"id":"c3","choices":null}"#).unwrap();
        assert!(c.choices.is_empty());
    }

    #[test]
    fn null_fields_in_chunk_decode_as_empty() {
        let c: ChatCompletionChunk = serde_json::from_str(
            r#"{"id":"k","created":null,"model":null,
                "choices":[{"index":0,"finish_reason":null,
                            "delta":{"content":"hi","role":null,"tool_calls":null}}]}"#,
        )
        .unwrap();
        assert_eq!(c.content(), Some("hi"));
        assert!(c.choices[0].delta.tool_calls.is_empty());

        let c: ChatCompletionChunk =
            serde_json::from_str(r#"{"id":"k","choices":[{"index":0,"delta":null}]}"#).unwrap();
        assert_eq!(c.choices[0].delta, ChunkDelta::default());
    }
}
