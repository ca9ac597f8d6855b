use httpmock::prelude::*;
use serde_json::json;

use docsum::application::ports::{LlmClient, LlmClientError};
use docsum::infrastructure::llm::OpenAiClient;

#[tokio::test]
async fn given_chat_completion_when_generating_then_returns_first_choice() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer sk-test")
                .body_contains("gpt-4o-mini");
            then.status(200).json_body(json!({
                "choices": [{"message": {"role": "assistant", "content": "- decided"}}]
            }));
        })
        .await;
    let client = OpenAiClient::new(
        Some("sk-test".to_string()),
        "gpt-4o-mini".to_string(),
        Some(server.base_url()),
    );

    let summary = client.generate("Summarize").await.unwrap();

    mock.assert_async().await;
    assert_eq!(summary, "- decided");
}

#[tokio::test]
async fn given_empty_choices_when_generating_then_returns_invalid_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({"choices": []}));
        })
        .await;
    let client = OpenAiClient::new(
        Some("sk-test".to_string()),
        "gpt-4o-mini".to_string(),
        Some(server.base_url()),
    );

    let result = client.generate("Summarize").await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
}
