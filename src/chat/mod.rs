//! Chat completions (`/chat/completions`).
//!
//! - [`ChatService::create`] returns a full [`ChatCompletion`].
//! - [`ChatService::create_stream`] returns a [`ChatCompletionStream`] of
//!   [`ChatCompletionChunk`]s.
//!
//! Both clamp `temperature` and `top_p` first, see [`params`].

mod client;
pub mod params;
mod types;

pub use client::{ChatCompletionStream, ChatService};
pub use params::{SamplingParams, MAX_SAMPLING_VALUE, MIN_SAMPLING_VALUE};
pub use types::{
    ChatCompletion, ChatCompletionChunk, ChatCompletionRequest, ChunkChoice, ChunkDelta,
    CompletionChoice, CompletionMessage, ResponseFormat, StopSequences, Thinking,
};
