//! Embedding request and response shapes.

use crate::types::{CompletionUsage, SensitiveWordCheck};
use serde::{Deserialize, Serialize};

/// `POST /embeddings` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsRequest {
    pub input: EmbeddingInput,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive_word_check: Option<SensitiveWordCheck>,
}

/// Text or pre-tokenized input, single or batched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    Text(String),
    Texts(Vec<String>),
    Tokens(Vec<i64>),
    TokenBatches(Vec<Vec<i64>>),
}

impl EmbeddingsRequest {
    pub fn new(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_input(model, EmbeddingInput::Text(text.into()))
    }

    pub fn batch<S: Into<String>>(model: impl Into<String>, texts: impl IntoIterator<Item = S>) -> Self {
        Self::with_input(
            model,
            EmbeddingInput::Texts(texts.into_iter().map(Into::into).collect()),
        )
    }

    pub fn with_input(model: impl Into<String>, input: EmbeddingInput) -> Self {
        Self {
            input,
            model: model.into(),
            dimensions: None,
            encoding_format: None,
            user: None,
            request_id: None,
            sensitive_word_check: None,
        }
    }

    pub fn dimensions(mut self, dimensions: u32) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn encoding_format(mut self, format: impl Into<String>) -> Self {
        self.encoding_format = Some(format.into());
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub object: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub embedding: Vec<f64>,
}

impl Embedding {
    pub fn dimensions(&self) -> usize {
        self.embedding.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsResponse {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub object: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub data: Vec<Embedding>,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub usage: CompletionUsage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_and_batch_inputs() {
        let v = serde_json::to_value(EmbeddingsRequest::new("embedding-3", "hello")).unwrap();
        assert_eq!(v, json!({"input": "hello", "model": "embedding-3"}));

        let v = serde_json::to_value(EmbeddingsRequest::batch("embedding-3", ["a", "b"]).dimensions(256))
            .unwrap();
        assert_eq!(v, json!({"input": ["a", "b"], "model": "embedding-3", "dimensions": 256}));
    }

    #[test]
    fn token_inputs_round_out_the_sum_type() {
        let r = EmbeddingsRequest::with_input("m", EmbeddingInput::TokenBatches(vec![vec![1, 2], vec![3]]));
        assert_eq!(serde_json::to_value(&r).unwrap()["input"], json!([[1, 2], [3]]));
        let back: EmbeddingInput = serde_json::from_value(json!([7, 8])).unwrap();
        assert_eq!(back, EmbeddingInput::Tokens(vec![7, 8]));
    }

    #[test]
    fn response_decodes() {
        let r: EmbeddingsResponse = serde_json::from_value(json!({
            "object": "list",
            "data": [{"object": "embedding", "index": 0, "embedding": [0.1, 0.2, 0.3]}],
            "model": "embedding-3",
            "usage": {"prompt_tokens": 2, "completion_tokens": 0, "total_tokens": 2}
        }))
        .unwrap();
        assert_eq!(r.data[0].dimensions(), 3);
        assert_eq!(r.usage.total_tokens, 2);
    }
}
