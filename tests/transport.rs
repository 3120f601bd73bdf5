//! Request execution against a mock server: headers, retries, classification.

mod common;

use common::{completion_body, MockServerFixture, TEST_API_KEY};
use mockito::Matcher;
use std::time::{Duration, Instant};
use zai_sdk::{ChatCompletionRequest, Error, ErrorKind, Message, RequestContext, ZaiClient};

fn hello() -> ChatCompletionRequest {
    ChatCompletionRequest::new("glm-4.6", vec![Message::user("Hello")])
}

#[tokio::test]
async fn sends_auth_channel_and_content_type_headers() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("POST", "/chat/completions")
        .match_header("authorization", format!("Bearer {}", TEST_API_KEY).as_str())
        .match_header("content-type", "application/json")
        .match_header("x-source-channel", "rust-sdk")
        .with_status(200)
        .with_body(completion_body("Hi there"))
        .create_async()
        .await;

    let completion = fx.client().chat().create(hello()).await.unwrap();
    assert_eq!(completion.content(), Some("Hi there"));
    assert_eq!(completion.usage.total_tokens, 7);
    mock.assert_async().await;
}

#[tokio::test]
async fn custom_headers_override_defaults() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("POST", "/chat/completions")
        .match_header("x-source-channel", "my-app")
        .match_header("x-trace", "abc")
        .with_status(200)
        .with_body(completion_body("ok"))
        .create_async()
        .await;

    let client = fx
        .builder()
        .header("x-source-channel", "my-app")
        .header("x-trace", "abc")
        .build()
        .unwrap();
    client.chat().create(hello()).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn request_body_is_normalized() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "glm-4.6",
            "temperature": 0.01,
            "top_p": 0.99,
            "do_sample": false
        })))
        .with_status(200)
        .with_body(completion_body("ok"))
        .create_async()
        .await;

    let req = hello().temperature(0.0).top_p(1.0);
    fx.client().chat().create(req).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn retryable_failure_makes_n_plus_one_attempts() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .mock_error(
            "/chat/completions",
            500,
            r#"{"error":{"message":"boom","type":"server_error","code":"1234"}}"#,
            3,
        )
        .await;

    let client = fx.builder().max_retries(2).build().unwrap();
    let err = client.chat().create(hello()).await.unwrap_err();
    mock.assert_async().await;

    assert_eq!(err.kind(), ErrorKind::InternalServer);
    let api = err.api_error().unwrap();
    assert_eq!(api.status, 500);
    assert_eq!(api.message, "boom");
    assert_eq!(api.error_type, "server_error");
    assert_eq!(api.code, "1234");
}

#[tokio::test]
async fn zero_retries_means_one_attempt() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .mock_error("/chat/completions", 429, r#"{"error":{"message":"slow down"}}"#, 1)
        .await;

    let client = fx.builder().max_retries(0).build().unwrap();
    let err = client.chat().create(hello()).await.unwrap_err();
    mock.assert_async().await;
    assert_eq!(err.kind(), ErrorKind::RateLimited);
}

#[tokio::test]
async fn authentication_failure_is_not_retried() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .mock_error(
            "/chat/completions",
            401,
            r#"{"error":{"message":"invalid api key","type":"auth","code":1001}}"#,
            1,
        )
        .await;

    let client = fx.builder().max_retries(5).build().unwrap();
    let err = client.chat().create(hello()).await.unwrap_err();
    mock.assert_async().await;
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.api_error().unwrap().code, "1001");
}

#[tokio::test]
async fn bad_request_is_not_retried() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .mock_error("/chat/completions", 400, "plain text failure", 1)
        .await;

    let client = fx.builder().max_retries(5).build().unwrap();
    let err = client.chat().create(hello()).await.unwrap_err();
    mock.assert_async().await;
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    let api = err.api_error().unwrap();
    assert_eq!(api.message, "plain text failure");
    assert_eq!(api.error_type, "");
}

#[tokio::test]
async fn unmapped_status_is_retried_as_status_kind() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .mock_error("/chat/completions", 404, r#"{"error":{"message":"no route"}}"#, 2)
        .await;

    let client = fx.builder().max_retries(1).build().unwrap();
    let err = client.chat().create(hello()).await.unwrap_err();
    mock.assert_async().await;
    assert_eq!(err.kind(), ErrorKind::Status);
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn undecodable_success_body_is_a_decode_error() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices": "not a list"}"#)
        .expect(1)
        .create_async()
        .await;

    let err = fx.client().chat().create(hello()).await.unwrap_err();
    mock.assert_async().await;
    assert!(matches!(err, Error::Decode(_)));
    assert_eq!(err.kind(), ErrorKind::Generic);
}

#[tokio::test]
async fn connection_failure_is_a_timeout() {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    // nothing listens on port 1
    let client = ZaiClient::builder()
        .api_key(TEST_API_KEY)
        .base_url("http://127.0.0.1:1")
        .http_client(http)
        .max_retries(0)
        .build()
        .unwrap();
    let err = client.chat().create(hello()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(err.to_string().contains("request failed"));
}

#[tokio::test]
async fn cancellation_during_backoff_returns_promptly() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .mock_error("/chat/completions", 503, r#"{"error":{"message":"busy"}}"#, 1)
        .await;

    let client = fx
        .builder()
        .retry_backoff_unit(Duration::from_secs(30))
        .build()
        .unwrap();
    let ctx = RequestContext::new();
    let token = ctx.cancel_token().clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        token.cancel();
    });

    let started = Instant::now();
    let err = client.chat().with_context(ctx).create(hello()).await.unwrap_err();
    assert!(matches!(err, Error::Cancelled));
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert!(started.elapsed() < Duration::from_secs(10));
    mock.assert_async().await;
}

#[tokio::test]
async fn context_deadline_is_a_timeout() {
    let mut fx = MockServerFixture::new().await;
    let _mock = fx
        .mock_error("/chat/completions", 500, r#"{"error":{"message":"down"}}"#, 1)
        .await;

    let client = fx
        .builder()
        .retry_backoff_unit(Duration::from_secs(30))
        .build()
        .unwrap();
    let ctx = RequestContext::new().with_timeout(Duration::from_millis(300));
    let err = client.chat().with_context(ctx).create(hello()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn execute_into_fills_destination() {
    let mut fx = MockServerFixture::new().await;
    let _mock = fx
        .mock_json("GET", "/async-result/task-9", 200, r#"{"id":"task-9","task_status":"SUCCESS"}"#)
        .await;

    let client = fx.client();
    let mut dest = serde_json::Value::Null;
    client
        .transport()
        .execute_into(
            &RequestContext::new(),
            &zai_sdk::transport::ApiRequest::async_result("task-9").unwrap(),
            &mut dest,
        )
        .await
        .unwrap();
    assert_eq!(dest["task_status"], "SUCCESS");
}
