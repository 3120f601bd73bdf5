//! HTTP execution: request building, retries, response classification.

mod http;

pub use http::{ApiRequest, HttpTransport, SOURCE_CHANNEL_HEADER};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
