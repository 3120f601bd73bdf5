//! Tool definitions and tool calls.

use serde::{Deserialize, Serialize};

/// Tool offered to the model: a function, or the built-in web search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub tool_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<FunctionDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_search: Option<WebSearchTool>,
}

impl Tool {
    /// `parameters` is a JSON Schema object.
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: Some(FunctionDefinition {
                name: name.into(),
                description: Some(description.into()),
                parameters: Some(parameters),
            }),
            web_search: None,
        }
    }

    /// Built-in web search; `include_result` asks for the raw results to be returned.
    pub fn web_search(query: impl Into<String>, include_result: bool) -> Self {
        Self {
            tool_type: "web_search".to_string(),
            function: None,
            web_search: Some(WebSearchTool {
                search_query: Some(query.into()),
                search_result: include_result.then_some(true),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebSearchTool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_result: Option<bool>,
}

/// Tool invocation emitted by the model.
///
/// In streamed deltas the fields arrive in fragments, so all but `index` may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "crate::types::null_as_default")]
    pub call_type: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub name: String,
    /// JSON-encoded arguments, as produced by the model
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub arguments: String,
}

impl FunctionCall {
    pub fn parse_arguments(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.arguments)
    }
}
