use super::types::{
    AsyncImageGenerationRequest, AsyncImagesResponse, ImageGenerationRequest, ImagesResponse,
};
use crate::client::types::RequestContext;
use crate::transport::{ApiRequest, HttpTransport};
use crate::Result;
use std::sync::Arc;

/// Image generation, synchronous and task-based.
#[derive(Debug, Clone)]
pub struct ImagesService {
    transport: Arc<HttpTransport>,
    ctx: RequestContext,
}

impl ImagesService {
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

    pub async fn generations(&self, request: &ImageGenerationRequest) -> Result<ImagesResponse> {
        let req = ApiRequest::post("/images/generations", request)?;
        self.transport.execute(&self.ctx, &req).await
    }

    /// Submit a task; poll it with [`retrieve_result`](Self::retrieve_result).
    pub async fn async_generations(
        &self,
        request: &AsyncImageGenerationRequest,
    ) -> Result<AsyncImagesResponse> {
        let req = ApiRequest::post("/async/images/generations", request)?;
        self.transport.execute(&self.ctx, &req).await
    }

    /// Fails with a configuration error, before any request, when `id` is empty.
    pub async fn retrieve_result(&self, id: &str) -> Result<AsyncImagesResponse> {
        let req = ApiRequest::async_result(id)?;
        self.transport.execute(&self.ctx, &req).await
    }
}
