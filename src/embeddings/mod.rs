//! Embeddings (`/embeddings`).

mod client;
mod types;

pub use client::EmbeddingsService;
pub use types::{Embedding, EmbeddingInput, EmbeddingsRequest, EmbeddingsResponse};
