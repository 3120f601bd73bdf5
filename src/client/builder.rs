use crate::client::config::{
    ClientConfig, Region, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BACKOFF_UNIT, DEFAULT_SOURCE_CHANNEL,
    DEFAULT_TIMEOUT, ENV_API_KEY, ENV_BASE_URL, ENV_HTTP_TIMEOUT_SECS, ENV_PROXY_URL,
};
use crate::client::core::ZaiClient;
use crate::{Error, ErrorContext, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Proxy;
use std::time::Duration;
use tracing::debug;

/// Builder for creating clients with custom configuration.
///
/// Resolution order, applied once in [`build`](Self::build):
/// - API key: explicit, then `ZAI_API_KEY`; missing is an error.
/// - Base URL: explicit, then `ZAI_BASE_URL`, then the region default.
/// - HTTP client: explicit, otherwise reqwest with the configured timeout
///   (`ZAI_HTTP_TIMEOUT_SECS`, default 300s) and optional `ZAI_PROXY_URL`.
#[derive(Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    region: Region,
    http_client: Option<reqwest::Client>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    retry_backoff_unit: Option<Duration>,
    disable_token_cache: bool,
    source_channel: Option<String>,
    custom_headers: Vec<(String, String)>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the base URL (also how tests point the client at a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Use a caller-provided HTTP client. `timeout` and `ZAI_PROXY_URL` are then ignored.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Retries after the first attempt. `0` disables retries.
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = Some(n);
        self
    }

    /// Unit of the linear backoff (retry k waits k units).
    pub fn retry_backoff_unit(mut self, unit: Duration) -> Self {
        self.retry_backoff_unit = Some(unit);
        self
    }

    pub fn disable_token_cache(mut self, disable: bool) -> Self {
        self.disable_token_cache = disable;
        self
    }

    pub fn source_channel(mut self, channel: impl Into<String>) -> Self {
        self.source_channel = Some(channel.into());
        self
    }

    /// Add a header sent on every request. Applied last, so it may replace
    /// `Authorization`, `Content-Type` or `x-source-channel`.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.custom_headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Build the client, reading environment fallbacks from the process environment.
    pub fn build(self) -> Result<ZaiClient> {
        let config = self.resolve(&|name: &str| std::env::var(name).ok())?;
        Ok(ZaiClient::from_config(config))
    }

    pub(crate) fn resolve(self, env: &dyn Fn(&str) -> Option<String>) -> Result<ClientConfig> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let api_key = non_empty(self.api_key)
            .or_else(|| non_empty(env(ENV_API_KEY)))
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "api_key not provided, please provide it through parameters or environment variables",
                    ErrorContext::new()
                        .with_field_path("api_key")
                        .with_source("client_builder"),
                )
            })?;

        let base_url = non_empty(self.base_url)
            .or_else(|| non_empty(env(ENV_BASE_URL)))
            .unwrap_or_else(|| self.region.default_base_url().to_string());
        let base_url = validate_base_url(&base_url)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let timeout = self
                    .timeout
                    .or_else(|| {
                        env(ENV_HTTP_TIMEOUT_SECS)
                            .and_then(|s| s.trim().parse::<u64>().ok())
                            .map(Duration::from_secs)
                    })
                    .unwrap_or(DEFAULT_TIMEOUT);
                default_http_client(timeout, env(ENV_PROXY_URL))?
            }
        };

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|e| {
                Error::configuration_with_context(
                    format!("api_key is not a valid header value: {}", e),
                    ErrorContext::new()
                        .with_field_path("api_key")
                        .with_source("client_builder"),
                )
            })?;
        authorization.set_sensitive(true);

        let source_channel =
            non_empty(self.source_channel).unwrap_or_else(|| DEFAULT_SOURCE_CHANNEL.to_string());
        let source_channel_header = HeaderValue::from_str(&source_channel).map_err(|e| {
            Error::configuration_with_context(
                format!("source_channel is not a valid header value: {}", e),
                ErrorContext::new().with_field_path("source_channel"),
            )
        })?;

        let mut custom_headers = HeaderMap::new();
        for (name, value) in self.custom_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid header name: {}", e),
                    ErrorContext::new()
                        .with_field_path("custom_headers")
                        .with_details(name.clone()),
                )
            })?;
            let header_value = HeaderValue::from_str(&value).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid value for header {}: {}", name, e),
                    ErrorContext::new().with_field_path("custom_headers"),
                )
            })?;
            custom_headers.insert(header_name, header_value);
        }

        let max_retries = self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES);
        debug!(
            base_url = base_url.as_str(),
            max_retries,
            source_channel = source_channel.as_str(),
            custom_headers = custom_headers.len(),
            "zai client configured"
        );

        Ok(ClientConfig {
            base_url,
            http_client,
            max_retries,
            retry_backoff_unit: self
                .retry_backoff_unit
                .unwrap_or(DEFAULT_RETRY_BACKOFF_UNIT),
            disable_token_cache: self.disable_token_cache,
            source_channel,
            authorization,
            source_channel_header,
            custom_headers,
        })
    }
}

fn validate_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed).map_err(|e| {
        Error::configuration_with_context(
            format!("invalid base URL: {}", e),
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(raw.to_string()),
        )
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::configuration_with_context(
            "base URL must use http or https",
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(raw.to_string()),
        ));
    }
    Ok(trimmed.to_string())
}

fn default_http_client(timeout: Duration, proxy_url: Option<String>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().timeout(timeout);

    if let Some(proxy_url) = proxy_url.filter(|s| !s.trim().is_empty()) {
        let proxy = Proxy::all(proxy_url.as_str()).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid proxy URL: {}", e),
                ErrorContext::new().with_field_path(ENV_PROXY_URL),
            )
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))
}
