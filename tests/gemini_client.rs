//! HTTP behaviour of the Gemini client against a local mock server.

mod common;

use common::mock_gemini::{MockGemini, MockResponse};
use common::test_image;
use photopoet::config::{GeminiConfig, SecureString};
use photopoet::muse::{GeminiClient, GenerationError, PoetryModel, FALLBACK_INSPIRATION};
use photopoet::session::PoemStyle;

fn client_for(server: &MockGemini) -> GeminiClient {
    let config = GeminiConfig {
        base_url: format!("{}/", server.base_url()),
        model: "test-model".to_string(),
        timeout_seconds: 5,
        ..GeminiConfig::default()
    };
    GeminiClient::with_api_key(&config, SecureString::new("test-key".to_string())).unwrap()
}

#[tokio::test]
async fn inspiration_request_carries_image_and_key() {
    let server = MockGemini::start().await;
    server
        .enqueue_response(MockResponse::text("  Mist over a mirror lake.  "))
        .await;
    let client = client_for(&server);
    let image = test_image();

    let text = client.describe_image(&image).await.unwrap();
    assert_eq!(text, "Mist over a mirror lake.");

    let requests = server.captured_requests().await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/v1beta/models/test-model:generateContent");
    assert_eq!(request.header("x-goog-api-key"), Some("test-key"));

    let body = request.json();
    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
    assert_eq!(parts[0]["inlineData"]["data"], image.encoded_bytes.as_str());
    assert!(parts[1]["text"].as_str().unwrap().contains("evocative summary"));
    assert_eq!(
        body["generationConfig"]["thinkingConfig"]["thinkingBudget"],
        1000
    );
}

#[tokio::test]
async fn poem_request_names_the_style() {
    let server = MockGemini::start().await;
    server
        .enqueue_response(MockResponse::text("An old silent pond\n"))
        .await;
    let client = client_for(&server);

    let poem = client
        .compose_poem(&test_image(), PoemStyle::Haiku)
        .await
        .unwrap();
    assert_eq!(poem, "An old silent pond");

    let body = server.captured_requests().await[0].json();
    let prompt = body["contents"][0]["parts"][1]["text"].as_str().unwrap();
    assert!(prompt.contains("\"Haiku\""));
    assert_eq!(
        body["generationConfig"]["thinkingConfig"]["thinkingBudget"],
        2000
    );
}

#[tokio::test]
async fn empty_inspiration_uses_fallback_but_empty_poem_does_not() {
    let server = MockGemini::start().await;
    server.enqueue_response(MockResponse::text("   ")).await;
    server
        .enqueue_response(MockResponse::json(r#"{"candidates": []}"#))
        .await;
    let client = client_for(&server);

    assert_eq!(
        client.describe_image(&test_image()).await.unwrap(),
        FALLBACK_INSPIRATION
    );
    assert_eq!(
        client
            .compose_poem(&test_image(), PoemStyle::Ode)
            .await
            .unwrap(),
        ""
    );
}

#[tokio::test]
async fn http_error_status_is_reported() {
    let server = MockGemini::start().await;
    server
        .enqueue_response(MockResponse::error(429, "quota exhausted"))
        .await;
    let client = client_for(&server);

    let err = client
        .compose_poem(&test_image(), PoemStyle::Sonnet)
        .await
        .unwrap_err();
    match err {
        GenerationError::Api { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("quota exhausted"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockGemini::start().await;
    server
        .enqueue_response(MockResponse::json("<html>not json</html>"))
        .await;
    let client = client_for(&server);

    let err = client.describe_image(&test_image()).await.unwrap_err();
    assert!(matches!(err, GenerationError::Parse(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = GeminiConfig {
        base_url: format!("http://127.0.0.1:{port}"),
        ..GeminiConfig::default()
    };

    let client =
        GeminiClient::with_api_key(&config, SecureString::new("k".to_string())).unwrap();
    let err = client.describe_image(&test_image()).await.unwrap_err();
    assert!(matches!(err, GenerationError::Transport(_)));
}
