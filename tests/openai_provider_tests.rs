//! OpenAI provider tests against a mock HTTP server.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use confab::config::ConfabConfig;
use confab::error::ConfabError;
use confab::prelude::*;

fn provider_for(server: &MockServer) -> OpenAiProvider {
    let config = ConfabConfig::default()
        .with_api_key("test-key")
        .with_base_url(server.uri());
    OpenAiProvider::new(&config).unwrap()
}

fn request() -> CompletionRequest {
    CompletionRequest {
        model: "gpt-4".to_string(),
        messages: vec![
            ChatMessage::system("You are terse"),
            ChatMessage::user("hello"),
        ],
        temperature: 0.5,
    }
}

#[tokio::test]
async fn chat_completion_happy_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4",
            "temperature": 0.5,
            "messages": [
                {"role": "system", "content": "You are terse"},
                {"role": "user", "content": "hello"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "hi"},
                    "finish_reason": "stop"
                },
                {
                    "index": 1,
                    "message": {"role": "assistant", "content": "hi th"},
                    "finish_reason": "length"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let completion = provider_for(&server)
        .complete(&request())
        .await
        .expect("completion should succeed");

    assert_eq!(completion.candidates.len(), 2);
    let first = completion.reply().unwrap();
    assert_eq!(first.index, 0);
    assert_eq!(first.message.content, "hi");
    assert_eq!(first.finish_reason, Some(FinishReason::Stop));
    assert_eq!(
        completion.candidates[1].finish_reason,
        Some(FinishReason::Length)
    );
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"error": {"message": "Incorrect API key"}})),
        )
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&request())
        .await
        .expect_err("401 should fail");

    assert!(err.is_authentication(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"error": {"retry_after": 2.0}})),
        )
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&request())
        .await
        .expect_err("429 should fail");

    match err {
        ConfabError::RateLimited { retry_after_ms } => assert_eq!(retry_after_ms, Some(2000)),
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&request())
        .await
        .expect_err("500 should fail");

    match err {
        ConfabError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("internal error"));
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_finish_reason_is_preserved() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "hi"},
                "finish_reason": "content_filter_v2"
            }]
        })))
        .mount(&server)
        .await;

    let completion = provider_for(&server).complete(&request()).await.unwrap();

    assert_eq!(
        completion.reply().unwrap().finish_reason,
        Some(FinishReason::Other("content_filter_v2".to_string()))
    );
}

#[tokio::test]
async fn empty_choice_list_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&request())
        .await
        .expect_err("empty choices should fail");

    assert!(matches!(err, ConfabError::Api { status: 200, .. }));
}

#[test]
fn provider_requires_an_api_key() {
    let err = OpenAiProvider::new(&ConfabConfig::default()).unwrap_err();
    match err {
        ConfabError::Configuration(message) => assert!(message.contains("OPENAI_API_KEY")),
        other => panic!("expected Configuration, got {other:?}"),
    }
}
