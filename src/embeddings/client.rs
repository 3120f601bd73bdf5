use super::types::{EmbeddingsRequest, EmbeddingsResponse};
use crate::client::types::RequestContext;
use crate::transport::{ApiRequest, HttpTransport};
use crate::Result;
use std::sync::Arc;

/// Text embeddings.
#[derive(Debug, Clone)]
pub struct EmbeddingsService {
    transport: Arc<HttpTransport>,
    ctx: RequestContext,
}

impl EmbeddingsService {
    pub(crate) fn new(transport: Arc<HttpTransport>) -> Self {
        Self {
            transport,
            ctx: RequestContext::default(),
        }
    }

    pub fn with_context(mut self, ctx: RequestContext) -> Self {
        self.ctx = ctx;
        self
    }

    pub async fn create(&self, request: &EmbeddingsRequest) -> Result<EmbeddingsResponse> {
        let req = ApiRequest::post("/embeddings", request)?;
        self.transport.execute(&self.ctx, &req).await
    }

    /// Embed one text.
    pub async fn embed(&self, model: &str, text: &str) -> Result<EmbeddingsResponse> {
        self.create(&EmbeddingsRequest::new(model, text)).await
    }
}
