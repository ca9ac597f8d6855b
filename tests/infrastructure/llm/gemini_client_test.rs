use httpmock::prelude::*;
use serde_json::json;

use docsum::application::ports::{LlmClient, LlmClientError};
use docsum::infrastructure::llm::GeminiClient;

const MODEL: &str = "gemini-2.5-flash";

fn client(server: &MockServer, api_key: Option<&str>) -> GeminiClient {
    GeminiClient::new(
        api_key.map(String::from),
        MODEL.to_string(),
        Some(server.base_url()),
    )
}

#[tokio::test]
async fn given_successful_response_when_generating_then_concatenates_candidate_parts() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/models/gemini-2.5-flash:generateContent")
                .header("x-goog-api-key", "test-key")
                .body_contains("Summarize the standup");
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{"text": "- item one\n"}, {"text": "- item two"}]
                    }
                }]
            }));
        })
        .await;

    let summary = client(&server, Some("test-key"))
        .generate("Summarize the standup")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(summary, "- item one\n- item two");
}

#[tokio::test]
async fn given_missing_api_key_when_generating_then_fails_without_network_call() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200);
        })
        .await;

    let result = client(&server, Some("   ")).generate("prompt").await;

    assert!(matches!(result, Err(LlmClientError::MissingApiKey)));
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn given_rate_limit_status_when_generating_then_returns_rate_limited() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(429);
        })
        .await;

    let result = client(&server, Some("test-key")).generate("prompt").await;

    assert!(matches!(result, Err(LlmClientError::RateLimited)));
}

#[tokio::test]
async fn given_blocked_prompt_when_generating_then_reports_block_reason() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200)
                .json_body(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        })
        .await;

    let result = client(&server, Some("test-key")).generate("prompt").await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(reason)) if reason == "SAFETY"));
}

#[tokio::test]
async fn given_server_error_when_generating_then_returns_api_request_failed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(500).body("upstream exploded");
        })
        .await;

    let result = client(&server, Some("test-key")).generate("prompt").await;

    assert!(matches!(result, Err(LlmClientError::ApiRequestFailed(msg)) if msg.contains("upstream exploded")));
}
