//! Image generation (`/images/generations`, `/async/images/generations`).

mod client;
mod types;

pub use client::ImagesService;
pub use types::{
    AsyncImageGenerationRequest, AsyncImagesResponse, GeneratedImage, ImageGenerationRequest,
    ImagesResponse,
};
