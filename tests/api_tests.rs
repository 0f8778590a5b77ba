use portfolio_chat::config::UpstreamConfig;
use portfolio_chat::message::ChatResponse;
use portfolio_chat::routes::create_router;
use portfolio_chat::services::upstream::UpstreamClient;
use portfolio_chat::state::{AppState, Credential};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::util::ServiceExt;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS: &str = "/openai/v1/chat/completions";
const SYSTEM_PROMPT: &str = "You are a test persona.";

fn app(upstream_url: String, credential: Option<&str>) -> Router {
    app_with(upstream_url, Credential::Fixed(credential.map(str::to_string)))
}

fn app_with(upstream_url: String, credential: Credential) -> Router {
    let upstream = UpstreamClient::new(UpstreamConfig {
        url: upstream_url,
        ..UpstreamConfig::default()
    })
    .unwrap();
    let state = AppState::new(upstream, SYSTEM_PROMPT, credential);
    create_router("public").with_state(Arc::new(state))
}

fn chat_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body_bytes).unwrap())
}

fn completion(content: &str) -> Value {
    json!({
        "id": "cmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
}

#[tokio::test]
async fn test_non_post_methods_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("unused")))
        .expect(0)
        .mount(&server)
        .await;

    for verb in ["GET", "PUT", "DELETE", "PATCH"] {
        let app = app(format!("{}{COMPLETIONS}", server.uri()), Some("test-key"));
        let req = Request::builder()
            .method(verb)
            .uri("/api/chat")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{verb}");
        assert_eq!(body["error"], "Method not allowed.");
    }
}

#[tokio::test]
async fn test_blank_or_missing_message_is_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("unused")))
        .expect(0)
        .mount(&server)
        .await;

    for body in [
        "",
        "{}",
        r#"{"message": ""}"#,
        r#"{"message": "   "}"#,
        r#"{"message": 7}"#,
        r#"{"text": "hello"}"#,
    ] {
        let app = app(format!("{}{COMPLETIONS}", server.uri()), Some("test-key"));
        let (status, json) = send(app, chat_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(json["error"], "Please provide a message.");
        assert!(json.get("reply").is_none());
    }
}

#[tokio::test]
async fn test_missing_credential_skips_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("unused")))
        .expect(0)
        .mount(&server)
        .await;

    for message in ["hello", "Tell me about Rey", "?"] {
        let app = app(format!("{}{COMPLETIONS}", server.uri()), None);
        let body = json!({ "message": message }).to_string();
        let (status, json) = send(app, chat_request(body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "AI service is not configured yet.");
    }
}

#[tokio::test]
async fn test_reply_is_trimmed_and_relayed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "llama-3.3-70b-versatile",
            "temperature": 0.7,
            "max_tokens": 512,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": "What does Rey build?" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("\n  Full-stack web systems.  \n")))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(format!("{}{COMPLETIONS}", server.uri()), Some("test-key"));
    let body = json!({ "message": "   What does Rey build?\t" }).to_string();
    let (status, json) = send(app, chat_request(body)).await;

    assert_eq!(status, StatusCode::OK);
    let reply: ChatResponse = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(reply.reply, "Full-stack web systems.");
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn test_credential_is_read_from_env_per_request() {
    const VAR: &str = "PORTFOLIO_CHAT_API_TEST_KEY";
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .and(header("authorization", "Bearer env-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("From the env.")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    let app = app_with(format!("{}{COMPLETIONS}", server.uri()), Credential::Env(VAR.to_string()));

    // SAFETY: the variable name is used by this test only.
    unsafe { std::env::remove_var(VAR) };
    let (status, json) = send(app.clone(), chat_request(r#"{"message": "hi"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "AI service is not configured yet.");

    // Same router, no rebuild: the value set afterwards is picked up.
    unsafe { std::env::set_var(VAR, "env-key") };
    let (status, json) = send(app, chat_request(r#"{"message": "hi"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], "From the env.");

    unsafe { std::env::remove_var(VAR) };
}

#[tokio::test]
async fn test_upstream_failure_is_hidden_and_stable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({ "error": { "message": "secret quota detail" } })),
        )
        .expect(3)
        .mount(&server)
        .await;

    for _ in 0..3 {
        let app = app(format!("{}{COMPLETIONS}", server.uri()), Some("test-key"));
        let (status, json) = send(app, chat_request(r#"{"message": "hi"}"#)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json, json!({ "error": "AI service returned an error. Please try again." }));
    }
}

#[tokio::test]
async fn test_empty_upstream_body_is_bad_gateway() {
    for upstream_body in [json!({}), json!({ "choices": [] }), completion("   ")] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body))
            .mount(&server)
            .await;

        let app = app(format!("{}{COMPLETIONS}", server.uri()), Some("test-key"));
        let (status, json) = send(app, chat_request(r#"{"message": "hi"}"#)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"], "No response from AI. Please try again.");
    }
}

#[tokio::test]
async fn test_unreachable_upstream_is_internal_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = app(format!("http://{addr}{COMPLETIONS}"), Some("test-key"));
    let (status, json) = send(app, chat_request(r#"{"message": "hi"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal server error. Please try again.");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = app("http://127.0.0.1:1/unused".to_string(), None);
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
