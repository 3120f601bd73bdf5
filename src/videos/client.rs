use super::types::{VideoGenerationRequest, VideoObject};
use crate::client::types::RequestContext;
use crate::transport::{ApiRequest, HttpTransport};
use crate::{Error, Result};
use std::sync::Arc;

/// Video generation tasks.
#[derive(Debug, Clone)]
pub struct VideosService {
    transport: Arc<HttpTransport>,
    ctx: RequestContext,
}

impl VideosService {
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

    /// Submit a generation task. `model` must be non-empty.
    pub async fn generations(&self, request: &VideoGenerationRequest) -> Result<VideoObject> {
        if request.model.is_empty() {
            return Err(Error::missing_argument("model"));
        }
        let req = ApiRequest::post("/videos/generations", request)?;
        self.transport.execute(&self.ctx, &req).await
    }

    pub async fn retrieve_result(&self, id: &str) -> Result<VideoObject> {
        let req = ApiRequest::async_result(id)?;
        self.transport.execute(&self.ctx, &req).await
    }
}
