//! # zai-sdk
//!
//! Z.ai / 智谱 AI 开放平台的 Rust 客户端。
//!
//! Async client for the Z.ai (overseas) and Zhipu (mainland) AI inference API:
//! chat completions with SSE streaming, embeddings, image and video generation.
//!
//! ## Overview
//!
//! Every call goes through one request-execution engine:
//!
//! - **Typed errors**: HTTP failures are classified into a closed set of
//!   [`ErrorKind`]s; branch on [`Error::kind`].
//! - **Retries**: transient failures are retried with linear backoff
//!   (`attempt × 1s`), up to `max_retries` (default 2). Authentication and
//!   bad-request errors are never retried.
//! - **Streaming**: [`ChatCompletionStream`] decodes `data:` frames lazily, ends
//!   on `[DONE]` or end of input, and releases the connection exactly once.
//! - **Cancellation**: a [`RequestContext`] carries a cancellation token and an
//!   overall deadline through sends, body reads, backoff sleeps and stream reads.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zai_sdk::{ChatCompletionRequest, Message, ZaiClient};
//!
//! #[tokio::main]
//! async fn main() -> zai_sdk::Result<()> {
//!     // reads ZAI_API_KEY
//!     let client = ZaiClient::from_env()?;
//!
//!     let request = ChatCompletionRequest::new("glm-4.6", vec![Message::user("Hello!")])
//!         .temperature(0.7);
//!     let completion = client.chat().create(request.clone()).await?;
//!     println!("{}", completion);
//!
//!     let mut stream = client.chat().create_stream(request).await?;
//!     while let Some(chunk) = stream.next().await? {
//!         print!("{}", chunk.content().unwrap_or(""));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Builder, configuration, request context |
//! | [`transport`] | HTTP execution and retry loop |
//! | [`pipeline`] | SSE framing and the typed stream handle |
//! | [`chat`] | Chat completions and sampling normalization |
//! | [`embeddings`] | Text embeddings |
//! | [`images`] | Image generation |
//! | [`videos`] | Video generation |
//! | [`types`] | Messages, tools, usage |

pub mod chat;
pub mod client;
pub mod embeddings;
pub mod error;
pub mod error_kind;
pub mod images;
pub mod pipeline;
pub mod transport;
pub mod types;
pub mod videos;

pub use chat::{
    ChatCompletion, ChatCompletionChunk, ChatCompletionRequest, ChatCompletionStream, ChatService,
};
pub use client::{ClientBuilder, ClientConfig, Region, RequestContext, ZaiClient};
pub use embeddings::{EmbeddingsRequest, EmbeddingsResponse, EmbeddingsService};
pub use error::{ApiError, Error, ErrorContext};
pub use error_kind::ErrorKind;
pub use images::{ImagesService, ImageGenerationRequest};
pub use pipeline::SseStream;
pub use types::{Message, Role, Tool, ToolCall};
pub use videos::{VideoGenerationRequest, VideosService};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A boxed stream of fallible items
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;
