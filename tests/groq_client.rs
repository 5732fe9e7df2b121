//! GroqProvider against a local mock of the chat-completions API.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use prompt_architect::clients::groq::DEFAULT_MODEL;
use prompt_architect::clients::{ChatRequest, CompletionProvider, GroqProvider, ProviderError};
use prompt_architect::error::{GENERIC_FAILURE_MESSAGE, PromptArchitectError};
use prompt_architect::gateway::CompletionGateway;
use prompt_architect::{FrameworkId, GenerationRequest, OutputFormat};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
struct Seen {
    bodies: Arc<Mutex<Vec<Value>>>,
    auth: Arc<Mutex<Vec<String>>>,
}

fn record(seen: &Seen, headers: &HeaderMap, body: Value) {
    seen.bodies.lock().unwrap().push(body);
    if let Some(v) = headers.get(header::AUTHORIZATION).and_then(|h| h.to_str().ok()) {
        seen.auth.lock().unwrap().push(v.to_string());
    }
}

async fn ok(State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    record(&seen, &headers, body);
    Json(json!({
        "id": "chatcmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": "# 30-Day Plan..."}}]
    }))
}

async fn empty(State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    record(&seen, &headers, body);
    Json(json!({ "id": "chatcmpl-2", "choices": [] }))
}

async fn unauthorized(State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    record(&seen, &headers, body);
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": {"message": "Invalid API Key gsk_wrong"}})),
    )
}

async fn slow(State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    record(&seen, &headers, body);
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({ "id": "chatcmpl-3", "choices": [] }))
}

async fn garbage(State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    record(&seen, &headers, body);
    "<html>gateway timeout</html>"
}

async fn spawn_mock() -> (SocketAddr, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/ok/chat/completions", post(ok))
        .route("/empty/chat/completions", post(empty))
        .route("/unauthorized/chat/completions", post(unauthorized))
        .route("/garbage/chat/completions", post(garbage))
        .route("/slow/chat/completions", post(slow))
        .with_state(seen.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, seen)
}

fn provider(addr: SocketAddr, route: &str) -> GroqProvider {
    GroqProvider::new(
        format!("http://{}/{}", addr, route),
        DEFAULT_MODEL,
        Some("gsk_test".to_string()),
        None,
    )
    .unwrap()
}

#[tokio::test]
async fn sends_wire_request_and_reads_first_choice() {
    let (addr, seen) = spawn_mock().await;
    let groq = provider(addr, "ok");

    let resp = groq
        .complete(&ChatRequest::new(DEFAULT_MODEL, "system text", "a 30-day workout plan"))
        .await
        .unwrap();
    assert_eq!(resp.first_content(), "# 30-Day Plan...");

    let bodies = seen.bodies.lock().unwrap().clone();
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["model"], "llama3-8b-8192");
    assert_eq!(body["messages"][0], json!({"role": "system", "content": "system text"}));
    assert_eq!(body["messages"][1], json!({"role": "user", "content": "a 30-day workout plan"}));
    assert_eq!(body["stream"], false);
    assert_eq!(body["temperature"], json!(0.7));
    assert_eq!(body["top_p"], json!(0.9));
    assert_eq!(seen.auth.lock().unwrap()[0], "Bearer gsk_test");
}

#[test]
fn sampling_parameters_are_exact_on_the_wire() {
    let raw = serde_json::to_string(&ChatRequest::new(DEFAULT_MODEL, "s", "u")).unwrap();
    assert!(raw.contains(r#""temperature":0.7,"top_p":0.9,"stream":false"#), "{raw}");
}

#[tokio::test]
async fn configured_timeout_is_honoured() {
    let (addr, seen) = spawn_mock().await;
    let groq = GroqProvider::new(
        format!("http://{}/slow", addr),
        DEFAULT_MODEL,
        Some("gsk_test".to_string()),
        Some(Duration::from_millis(200)),
    )
    .unwrap();

    let err = groq
        .complete(&ChatRequest::new(DEFAULT_MODEL, "s", "u"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::RequestFailed(_)));
    assert_eq!(seen.bodies.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn empty_choices_parse_as_empty() {
    let (addr, _) = spawn_mock().await;
    let resp = provider(addr, "empty")
        .complete(&ChatRequest::new(DEFAULT_MODEL, "s", "u"))
        .await
        .unwrap();
    assert!(resp.choices.is_empty());
    assert_eq!(resp.first_content(), "");
}

#[tokio::test]
async fn non_2xx_is_api_error() {
    let (addr, _) = spawn_mock().await;
    let err = provider(addr, "unauthorized")
        .complete(&ChatRequest::new(DEFAULT_MODEL, "s", "u"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::ApiError { status: 401, .. }));
}

#[tokio::test]
async fn unparseable_body_is_parse_error() {
    let (addr, _) = spawn_mock().await;
    let err = provider(addr, "garbage")
        .complete(&ChatRequest::new(DEFAULT_MODEL, "s", "u"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::ParseError(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_request_failed() {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = provider(addr, "ok")
        .complete(&ChatRequest::new(DEFAULT_MODEL, "s", "u"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::RequestFailed(_)));
}

#[tokio::test]
async fn gateway_hides_upstream_detail() {
    let (addr, seen) = spawn_mock().await;
    let gateway = CompletionGateway::new(Arc::new(provider(addr, "unauthorized")));
    let request =
        GenerationRequest::simple("a poem", OutputFormat::Text, FrameworkId::Standard).unwrap();

    let err = gateway.generate(&request).await.unwrap_err();
    assert!(matches!(err, PromptArchitectError::GenerationFailed));
    assert_eq!(err.public_message(), GENERIC_FAILURE_MESSAGE);
    assert!(!err.to_string().contains("gsk_wrong"));
    assert_eq!(seen.bodies.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn gateway_end_to_end_over_http() {
    let (addr, seen) = spawn_mock().await;
    let gateway = CompletionGateway::new(Arc::new(provider(addr, "ok")));
    let request = GenerationRequest::simple(
        "a 30-day workout plan",
        OutputFormat::Markdown,
        FrameworkId::Standard,
    )
    .unwrap();

    assert_eq!(gateway.generate(&request).await.unwrap(), "# 30-Day Plan...");
    let body = seen.bodies.lock().unwrap()[0].clone();
    let system = body["messages"][0]["content"].as_str().unwrap();
    assert!(system.contains(OutputFormat::Markdown.contract()));
}
