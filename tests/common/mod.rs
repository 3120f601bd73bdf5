//! Mock HTTP server setup for integration tests

#![allow(dead_code)]

use mockito::{Mock, Server, ServerGuard};
use std::time::Duration;
use zai_sdk::{ClientBuilder, ZaiClient};

pub const TEST_API_KEY: &str = "test-key";

/// Test fixture that owns a mock server and builds clients pointed at it
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Builder preconfigured for the mock server, with a 1ms backoff unit.
    pub fn builder(&self) -> ClientBuilder {
        let http = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("http client");
        ZaiClient::builder()
            .api_key(TEST_API_KEY)
            .base_url(&self.base_url)
            .http_client(http)
            .retry_backoff_unit(Duration::from_millis(1))
    }

    pub fn client(&self) -> ZaiClient {
        self.builder().build().expect("client")
    }

    pub async fn mock_json(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Error response hit exactly `hits` times.
    pub async fn mock_error(&mut self, path: &str, status: usize, body: &str, hits: usize) -> Mock {
        self.server
            .mock("POST", path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }

    /// SSE response; each entry becomes one `data:` event.
    pub async fn mock_sse(&mut self, path: &str, events: &[&str]) -> Mock {
        let body: String = events
            .iter()
            .map(|e| format!("data: {}\n\n", e))
            .collect();
        self.server
            .mock("POST", path)
            .match_header("accept", "text/event-stream")
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body(body)
            .create_async()
            .await
    }
}

pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-1",
        "created": 1700000000,
        "model": "glm-4.6",
        "choices": [{
            "index": 0,
            "finish_reason": "stop",
            "message": {"role": "assistant", "content": content}
        }],
        "usage": {"prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7}
    })
    .to_string()
}
