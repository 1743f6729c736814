//! Hosted providers wired through the router against a mock HTTP server

use serde_json::json;
use std::env;
use std::sync::Arc;
use triage::{Disposition, Intent, ProviderConfig, ProviderKind, Router, TriageConfig};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn router_for(provider: &ProviderConfig) -> Router {
    let config = TriageConfig::default();
    let named = provider.classifier().unwrap();
    Router::with_default_handlers(
        named.classifier,
        Arc::new(config.faq_handler()),
        Arc::new(config.order_handler()),
    )
}

#[tokio::test]
async fn test_openai_provider_routes_order_query() {
    env::set_var("TRIAGE_TEST_OPENAI_KEY", "sk-test");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "temperature": 0.0,
            "max_tokens": 10
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "ORDER_STATUS" },
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = ProviderConfig::new("GPT", ProviderKind::OpenAi)
        .with_api_key_env("TRIAGE_TEST_OPENAI_KEY")
        .with_base_url(server.uri());

    let outcome = router_for(&provider).dispatch("Where is order 1111?").await;
    assert_eq!(
        outcome.response,
        "Order 1111 status: Your order is shipped. Expected delivery in 2 days."
    );
    assert_eq!(outcome.disposition, Disposition::Dispatched(Intent::OrderStatus));
}

#[tokio::test]
async fn test_gemini_provider_routes_faq_query() {
    env::set_var("TRIAGE_TEST_GEMINI_KEY", "g-test");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(query_param("key", "g-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "faq\n" }] },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = ProviderConfig::new("Gemini", ProviderKind::Gemini)
        .with_api_key_env("TRIAGE_TEST_GEMINI_KEY")
        .with_base_url(server.uri());

    assert_eq!(
        router_for(&provider).route("What are your store hours?").await,
        "We are open from 9am to 8pm Mon-Fri, from 10am to 18pm on Saturday."
    );
}

#[tokio::test]
async fn test_claude_provider_invalid_label() {
    env::set_var("TRIAGE_TEST_CLAUDE_KEY", "c-test");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "c-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [{ "type": "text", "text": "FAQ." }],
            "model": "claude-3-haiku-20240307",
            "stop_reason": "end_turn",
            "usage": { "input_tokens": 60, "output_tokens": 2 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = ProviderConfig::new("Claude", ProviderKind::Claude)
        .with_api_key_env("TRIAGE_TEST_CLAUDE_KEY")
        .with_base_url(server.uri());

    let response = router_for(&provider).route("What are your store hours?").await;
    assert_eq!(response, "Routing error: Invalid intent label from model: 'FAQ.'");
}

#[tokio::test]
async fn test_http_error_becomes_routing_error() {
    env::set_var("TRIAGE_TEST_OPENAI_RATE_KEY", "sk-test");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = ProviderConfig::new("GPT", ProviderKind::OpenAi)
        .with_api_key_env("TRIAGE_TEST_OPENAI_RATE_KEY")
        .with_base_url(server.uri());

    let outcome = router_for(&provider).dispatch("Where is order 1111?").await;
    assert!(outcome.response.starts_with("Routing error: "));
    assert!(outcome.response.contains("Rate limit exceeded"));
    assert!(outcome.is_failure());
}
