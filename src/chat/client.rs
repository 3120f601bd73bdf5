use super::types::{ChatCompletion, ChatCompletionChunk, ChatCompletionRequest};
use crate::client::types::RequestContext;
use crate::pipeline::SseStream;
use crate::transport::{ApiRequest, HttpTransport};
use crate::Result;
use std::sync::Arc;

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Stream of [`ChatCompletionChunk`]s returned by [`ChatService::create_stream`].
pub type ChatCompletionStream = SseStream<ChatCompletionChunk>;

/// Chat completions, one-shot and streaming.
#[derive(Debug, Clone)]
pub struct ChatService {
    transport: Arc<HttpTransport>,
    ctx: RequestContext,
}

impl ChatService {
    pub(crate) fn new(transport: Arc<HttpTransport>) -> Self {
        Self {
            transport,
            ctx: RequestContext::default(),
        }
    }

    /// Run subsequent calls under `ctx` (cancellation and overall timeout).
    pub fn with_context(mut self, ctx: RequestContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Normalize sampling parameters, then execute with retries.
    pub async fn create(&self, mut request: ChatCompletionRequest) -> Result<ChatCompletion> {
        request.normalize_sampling();
        let req = ApiRequest::post(CHAT_COMPLETIONS_PATH, &request)?;
        self.transport.execute(&self.ctx, &req).await
    }

    /// Open a streaming completion. Sent once with `stream: true`; never retried.
    pub async fn create_stream(
        &self,
        mut request: ChatCompletionRequest,
    ) -> Result<ChatCompletionStream> {
        request.stream = Some(true);
        request.normalize_sampling();
        let req = ApiRequest::post(CHAT_COMPLETIONS_PATH, &request)?;
        self.transport.open_stream(&self.ctx, &req).await
    }
}
