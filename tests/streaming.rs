//! Streaming chat completions end to end.

mod common;

use common::MockServerFixture;
use futures::StreamExt;
use mockito::Matcher;
use zai_sdk::{ChatCompletionRequest, Error, ErrorKind, Message};

fn hello() -> ChatCompletionRequest {
    ChatCompletionRequest::new("glm-4.6", vec![Message::user("Hello")])
}

fn chunk(id: &str, content: &str) -> String {
    serde_json::json!({
        "id": id,
        "created": 1700000000,
        "model": "glm-4.6",
        "choices": [{"index": 0, "delta": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

#[tokio::test]
async fn yields_chunks_until_done() {
    let mut fx = MockServerFixture::new().await;
    let first = chunk("c1", "Hel");
    let second = chunk("c1", "lo");
    let mock = fx
        .mock_sse("/chat/completions", &[&first, &second, "[DONE]"])
        .await;

    let mut stream = fx.client().chat().create_stream(hello()).await.unwrap();
    let mut text = String::new();
    while let Some(c) = stream.next().await.unwrap() {
        text.push_str(c.content().unwrap_or(""));
    }
    assert_eq!(text, "Hello");
    assert!(stream.is_done());
    stream.close();
    stream.close();
    mock.assert_async().await;
}

#[tokio::test]
async fn stream_flag_and_accept_header_are_sent() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("POST", "/chat/completions")
        .match_header("accept", "text/event-stream")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(serde_json::json!({"stream": true})))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body("data: [DONE]\n\n")
        .create_async()
        .await;

    let mut stream = fx.client().chat().create_stream(hello()).await.unwrap();
    assert!(stream.next().await.unwrap().is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn ends_gracefully_without_sentinel() {
    let mut fx = MockServerFixture::new().await;
    let only = chunk("c2", "partial");
    let _mock = fx.mock_sse("/chat/completions", &[&only]).await;

    let s = fx.client().chat().create_stream(hello()).await.unwrap();
    let chunks: Vec<_> = s.into_stream().collect().await;
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].as_ref().unwrap().content(), Some("partial"));
}

#[tokio::test]
async fn malformed_frame_surfaces_an_error() {
    let mut fx = MockServerFixture::new().await;
    let _mock = fx
        .mock_sse("/chat/completions", &["{broken", "[DONE]"])
        .await;

    let mut stream = fx.client().chat().create_stream(hello()).await.unwrap();
    let err = stream.next().await.unwrap_err();
    assert!(matches!(err, Error::Stream { .. }));
    assert!(err.to_string().contains("failed to unmarshal chunk"));
    stream.close();
    assert!(stream.next().await.unwrap().is_none());
}

#[tokio::test]
async fn error_status_is_classified_and_not_retried() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .mock_error(
            "/chat/completions",
            503,
            r#"{"error":{"message":"overloaded","type":"server","code":"1305"}}"#,
            1,
        )
        .await;

    let client = fx.builder().max_retries(3).build().unwrap();
    let err = client.chat().create_stream(hello()).await.unwrap_err();
    mock.assert_async().await;
    assert_eq!(err.kind(), ErrorKind::Overloaded);
    assert_eq!(err.api_error().unwrap().code, "1305");
}

#[tokio::test]
async fn close_before_reading_is_fine() {
    let mut fx = MockServerFixture::new().await;
    let only = chunk("c3", "unused");
    let _mock = fx.mock_sse("/chat/completions", &[&only, "[DONE]"]).await;

    let mut stream = fx.client().chat().create_stream(hello()).await.unwrap();
    stream.close();
    assert!(stream.is_closed());
    assert!(stream.next().await.unwrap().is_none());
}

#[tokio::test]
async fn null_tool_call_fragments_decode() {
    let mut fx = MockServerFixture::new().await;
    let frame = r#"{"id":"c4","model":null,"choices":[{"index":0,"finish_reason":null,"delta":{"role":"assistant","content":null,"tool_calls":[{"index":0,"id":null,"type":null,"function":{"name":null,"arguments":"{\"q\""}}]}}]}"#;
    let _mock = fx.mock_sse("/chat/completions", &[frame, "[DONE]"]).await;

    let mut stream = fx.client().chat().create_stream(hello()).await.unwrap();
    let chunk = stream.next().await.unwrap().unwrap();
    let call = &chunk.choices[0].delta.tool_calls[0];
    assert_eq!(call.id, "");
    assert_eq!(call.function.arguments, "{\"q\"");
    assert!(stream.next().await.unwrap().is_none());
}
