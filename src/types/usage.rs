use serde::{Deserialize, Serialize};

/// Token accounting reported with completions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionUsage {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub prompt_tokens: u32,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub completion_tokens: u32,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub total_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens_details: Option<PromptTokensDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens_details: Option<CompletionTokensDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptTokensDetails {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub cached_tokens: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionTokensDetails {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub reasoning_tokens: u32,
}

/// Sensitive-word filtering mode, e.g. `"ALL"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitiveWordCheck {
    #[serde(rename = "type")]
    pub check_type: String,
}
