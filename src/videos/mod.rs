//! Video generation (`/videos/generations`).

mod client;
mod types;

pub use client::VideosService;
pub use types::{VideoGenerationRequest, VideoImageUrl, VideoObject, VideoResult};
