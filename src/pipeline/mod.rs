//! 流式响应处理：SSE 分帧与增量解码。
//!
//! Streaming response handling.
//!
//! ```text
//! Raw Bytes → LineBuffer → parse_line → serde_json → T
//!                 │             │
//!              `\n` split    data: / [DONE]
//! ```
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`decode`] | Line buffering and `data:` frame classification |
//! | [`stream`] | [`SseStream`], the typed stream handle |

pub mod decode;
pub mod stream;

pub use stream::SseStream;
