use crate::client::config::ClientConfig;
use crate::client::error_classification::classify;
use crate::client::policy::{Decision, RetryPolicy};
use crate::client::types::{CallScope, RequestContext};
use crate::pipeline::SseStream;
use crate::transport::TransportError;
use crate::{Error, Result};
use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Channel identification header sent on every request.
pub const SOURCE_CHANNEL_HEADER: &str = "x-source-channel";

/// One API call: method, path relative to the base URL, and an already-encoded body.
///
/// The body is marshalled once when the request is built, so marshal failures
/// surface before any network traffic and retries resend identical bytes.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Bytes>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    /// `GET /async-result/{id}` for a previously submitted async task.
    pub fn async_result(id: &str) -> Result<Self> {
        if id.is_empty() {
            return Err(Error::missing_argument("id"));
        }
        Ok(Self::get(format!("/async-result/{}", id)))
    }

    pub fn post<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> Result<Self> {
        Self::new(Method::POST, path, Some(body))
    }

    pub fn new<B: Serialize + ?Sized>(
        method: Method,
        path: impl Into<String>,
        body: Option<&B>,
    ) -> Result<Self> {
        let body = body
            .map(|b| serde_json::to_vec(b).map(Bytes::from))
            .transpose()
            .map_err(Error::Serialization)?;
        Ok(Self {
            method,
            path: path.into(),
            body,
        })
    }
}

/// Executes [`ApiRequest`]s against the configured base URL.
#[derive(Debug)]
pub struct HttpTransport {
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute with retries and decode the success body into `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: &ApiRequest,
    ) -> Result<T> {
        let scope = ctx.scope();
        let policy = RetryPolicy::new(&self.config);
        let client_request_id = Uuid::new_v4().to_string();
        let mut failed_attempts: u32 = 0;

        loop {
            let err = match self
                .execute_once(&scope, request, &client_request_id)
                .await
            {
                Ok(v) => return Ok(v),
                Err(e) => e,
            };
            failed_attempts = failed_attempts.saturating_add(1);

            match policy.decide(&err, failed_attempts) {
                Decision::Retry { delay } => {
                    warn!(
                        client_request_id = client_request_id.as_str(),
                        path = request.path.as_str(),
                        attempt = failed_attempts,
                        error_kind = err.kind().name(),
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "zai request failed, retrying"
                    );
                    scope.sleep(delay).await?;
                }
                Decision::Fail => return Err(err),
            }
        }
    }

    /// Like [`execute`](Self::execute) but writes the decoded value into `dest`.
    ///
    /// `dest` is left untouched when the call fails.
    pub async fn execute_into<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: &ApiRequest,
        dest: &mut T,
    ) -> Result<()> {
        *dest = self.execute(ctx, request).await?;
        Ok(())
    }

    /// Open an SSE stream. A single attempt: streams are never retried.
    pub async fn open_stream<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: &ApiRequest,
    ) -> Result<SseStream<T>> {
        let scope = ctx.scope();
        let client_request_id = Uuid::new_v4().to_string();
        let start = Instant::now();

        let resp = self.send(&scope, request, true).await?;
        let status = resp.status().as_u16();

        if status >= 400 {
            let body = scope.run(resp.bytes()).await?.unwrap_or_default();
            let err = classify(status, &body);
            info!(
                http_status = status,
                error_kind = err.kind.name(),
                client_request_id = client_request_id.as_str(),
                path = request.path.as_str(),
                duration_ms = start.elapsed().as_millis() as u64,
                "zai streaming request failed"
            );
            return Err(err.into());
        }

        info!(
            http_status = status,
            client_request_id = client_request_id.as_str(),
            path = request.path.as_str(),
            duration_ms = start.elapsed().as_millis() as u64,
            "zai request started streaming"
        );

        let body = resp
            .bytes_stream()
            .map_err(|e| Error::Transport(TransportError::Http(e)));
        Ok(SseStream::with_scope(Box::pin(body), scope))
    }

    async fn execute_once<T: DeserializeOwned>(
        &self,
        scope: &CallScope,
        request: &ApiRequest,
        client_request_id: &str,
    ) -> Result<T> {
        let start = Instant::now();
        let resp = self.send(scope, request, false).await?;
        let status = resp.status().as_u16();

        let body = scope
            .run(resp.bytes())
            .await?
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        if status >= 400 {
            let err = classify(status, &body);
            info!(
                http_status = status,
                error_kind = err.kind.name(),
                error_code = err.code.as_str(),
                client_request_id,
                path = request.path.as_str(),
                duration_ms = start.elapsed().as_millis() as u64,
                "zai request failed"
            );
            return Err(err.into());
        }

        debug!(
            http_status = status,
            client_request_id,
            path = request.path.as_str(),
            bytes = body.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "zai request succeeded"
        );

        serde_json::from_slice(&body).map_err(Error::Decode)
    }

    async fn send(
        &self,
        scope: &CallScope,
        request: &ApiRequest,
        stream: bool,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.config.base_url, request.path);
        let mut builder = self
            .config
            .http_client
            .request(request.method.clone(), &url)
            .headers(self.headers(stream));
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        scope
            .run(builder.send())
            .await?
            .map_err(|e| Error::timeout(format!("request failed: {}", e), Some(e)))
    }

    /// Executor headers first, then custom headers, which win on conflict.
    pub(crate) fn headers(&self, stream: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.config.authorization.clone());
        headers.insert(
            HeaderName::from_static(SOURCE_CHANNEL_HEADER),
            self.config.source_channel_header.clone(),
        );
        if stream {
            headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));
        }
        for (name, value) in self.config.custom_headers.iter() {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }
}
