use crate::chat::ChatService;
use crate::client::builder::ClientBuilder;
use crate::client::config::{ClientConfig, Region};
use crate::embeddings::EmbeddingsService;
use crate::images::ImagesService;
use crate::transport::HttpTransport;
use crate::videos::VideosService;
use crate::Result;
use std::sync::Arc;

/// Client for the Z.ai (overseas) and Zhipu (mainland) platforms.
///
/// Cheap to clone; clones share one immutable configuration and connection pool.
#[derive(Debug, Clone)]
pub struct ZaiClient {
    transport: Arc<HttpTransport>,
}

impl ZaiClient {
    /// Overseas endpoint with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build()
    }

    /// Mainland endpoint with default settings.
    pub fn zhipu(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new()
            .api_key(api_key)
            .region(Region::Mainland)
            .build()
    }

    /// Everything from `ZAI_*` environment variables.
    pub fn from_env() -> Result<Self> {
        ClientBuilder::new().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_config(config: ClientConfig) -> Self {
        Self {
            transport: Arc::new(HttpTransport::new(config)),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// The executor shared by all services, for endpoints without a typed facade.
    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    pub fn chat(&self) -> ChatService {
        ChatService::new(self.transport.clone())
    }

    pub fn embeddings(&self) -> EmbeddingsService {
        EmbeddingsService::new(self.transport.clone())
    }

    pub fn images(&self) -> ImagesService {
        ImagesService::new(self.transport.clone())
    }

    pub fn videos(&self) -> VideosService {
        VideosService::new(self.transport.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::config::{ZAI_BASE_URL, ZHIPU_BASE_URL};

    #[test]
    fn regions_pick_their_base_url() {
        let resolve = |region| {
            let cfg = ClientBuilder::new()
                .api_key("k")
                .region(region)
                .resolve(&|_: &str| None)
                .unwrap();
            ZaiClient::from_config(cfg)
        };
        assert_eq!(resolve(Region::Overseas).config().base_url(), ZAI_BASE_URL);
        assert_eq!(resolve(Region::Mainland).config().base_url(), ZHIPU_BASE_URL);
    }

    #[test]
    fn client_is_shareable_across_tasks() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<ZaiClient>();
    }
}
