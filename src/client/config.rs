//! Resolved client configuration.

use reqwest::header::{HeaderMap, HeaderValue};
use std::fmt;
use std::time::Duration;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;
/// Default overall timeout of the built-in HTTP client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
/// Unit of the linear retry backoff.
pub const DEFAULT_RETRY_BACKOFF_UNIT: Duration = Duration::from_secs(1);
/// Value of the `x-source-channel` header unless overridden.
pub const DEFAULT_SOURCE_CHANNEL: &str = "rust-sdk";

/// Base URL for overseas regions.
pub const ZAI_BASE_URL: &str = "https://api.z.ai/api/paas/v4";
/// Base URL for mainland China regions.
pub const ZHIPU_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";

pub const ENV_API_KEY: &str = "ZAI_API_KEY";
pub const ENV_BASE_URL: &str = "ZAI_BASE_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "ZAI_HTTP_TIMEOUT_SECS";
pub const ENV_PROXY_URL: &str = "ZAI_PROXY_URL";

/// Which platform deployment the client talks to by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Region {
    /// api.z.ai
    #[default]
    Overseas,
    /// open.bigmodel.cn
    Mainland,
}

impl Region {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Region::Overseas => ZAI_BASE_URL,
            Region::Mainland => ZHIPU_BASE_URL,
        }
    }
}

/// Immutable configuration shared by every call made through one client.
///
/// Produced by [`ClientBuilder::build`](crate::ClientBuilder::build); environment
/// lookups happen there and nowhere else.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) base_url: String,
    pub(crate) http_client: reqwest::Client,
    pub(crate) max_retries: u32,
    pub(crate) retry_backoff_unit: Duration,
    pub(crate) disable_token_cache: bool,
    pub(crate) source_channel: String,
    pub(crate) authorization: HeaderValue,
    pub(crate) source_channel_header: HeaderValue,
    pub(crate) custom_headers: HeaderMap,
}

impl ClientConfig {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn retry_backoff_unit(&self) -> Duration {
        self.retry_backoff_unit
    }

    /// Accepted for parity with other SDKs; the client does not cache tokens.
    pub fn disable_token_cache(&self) -> bool {
        self.disable_token_cache
    }

    pub fn source_channel(&self) -> &str {
        &self.source_channel
    }

    pub fn custom_headers(&self) -> &HeaderMap {
        &self.custom_headers
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_unit", &self.retry_backoff_unit)
            .field("disable_token_cache", &self.disable_token_cache)
            .field("source_channel", &self.source_channel)
            .field("custom_headers", &self.custom_headers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
