mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

use common::*;
use webcheck::client::GenerationBackend;
use webcheck::config::{CliArgs, WebCheckConfig};
use webcheck::server::build_router;
use webcheck::state::{AppState, BackendFactory};

fn config(data_dir: &Path) -> WebCheckConfig {
    let args = CliArgs {
        port: 0,
        data_dir: Some(data_dir.to_path_buf()),
        api_base: "http://127.0.0.1:1".to_string(),
        text_model: "text-model".to_string(),
        image_model: "image-model".to_string(),
        timeout_secs: 5,
        api_key: None,
    };
    let mut config = WebCheckConfig::from_args(&args);
    config.canned_run_delay = Duration::from_millis(5);
    config
}

fn app(dir: &TempDir, backend: Arc<StubBackend>, api_key: Option<&str>) -> (Router, Arc<AppState>) {
    let factory: BackendFactory =
        Box::new(move |_key: Option<&str>| backend.clone() as Arc<dyn GenerationBackend>);
    let state = Arc::new(AppState::with_backend_factory(
        config(dir.path()),
        api_key.map(str::to_string),
        factory,
    ));
    (build_router(state.clone()), state)
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health_reports_key_state() {
    let dir = TempDir::new().unwrap();
    let (router, _) = app(&dir, Arc::new(StubBackend::new()), None);

    let (status, body) = send(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "unconfigured");
    assert_eq!(body["api_key_configured"], false);
    assert_eq!(body["test_run_phase"], "idle");
}

#[tokio::test]
async fn test_audit_invalid_url_is_bad_request() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(StubBackend::new());
    let (router, _) = app(&dir, backend.clone(), Some("k"));

    let (status, body) = send(&router, "POST", "/audit", Some(json!({"url": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter a URL.");
    assert_eq!(backend.text_call_count(), 0);
}

#[tokio::test]
async fn test_audit_sample_has_scores() {
    let dir = TempDir::new().unwrap();
    let (router, _) = app(&dir, Arc::new(StubBackend::new()), None);

    let (status, body) = send(&router, "GET", "/audit/sample", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["performance"].as_array().unwrap().len(), 5);
    // 2 of 5 performance checks pass
    assert_eq!(body["scores"]["performance"], 40);
}

#[tokio::test]
async fn test_suites_seeded_and_created() {
    let dir = TempDir::new().unwrap();
    let (router, _) = app(&dir, Arc::new(StubBackend::new()), None);

    let (_, body) = send(&router, "GET", "/tests/suites", None).await;
    assert_eq!(body["suites"].as_array().unwrap().len(), 2);

    let draft = json!({
        "title": "Search",
        "targetUrl": "shop.test",
        "steps": [{"action": "NAVIGATE", "description": "Open the home page"}]
    });
    let (status, created) = send(&router, "POST", "/tests/suites", Some(draft)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["targetUrl"], "https://shop.test");
    assert!(created["id"].as_str().unwrap().starts_with("suite-"));

    let (_, body) = send(&router, "GET", "/tests/suites", None).await;
    assert_eq!(body["suites"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_suite_without_steps_rejected() {
    let dir = TempDir::new().unwrap();
    let (router, _) = app(&dir, Arc::new(StubBackend::new()), None);

    let draft = json!({"title": "Empty", "targetUrl": "shop.test", "steps": []});
    let (status, body) = send(&router, "POST", "/tests/suites", Some(draft)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please add at least one test step before saving.");
}

#[tokio::test]
async fn test_run_sample_suite() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(StubBackend::new());
    let (router, _) = app(&dir, backend.clone(), None);

    let (status, body) = send(&router, "POST", "/tests/suites/mock-suite-1/run", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "PASS");
    assert_eq!(body["testSuiteId"], "mock-suite-1");
    assert_eq!(backend.text_call_count(), 0);

    let (_, progress) = send(&router, "GET", "/tests/status", None).await;
    assert_eq!(progress["phase"], "assembled");
    assert_eq!(progress["suite_id"], "mock-suite-1");
}

#[tokio::test]
async fn test_run_unknown_suite_is_not_found() {
    let dir = TempDir::new().unwrap();
    let (router, _) = app(&dir, Arc::new(StubBackend::new()), None);

    let (status, _) = send(&router, "POST", "/tests/suites/suite-missing/run", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_run_draft_transport_failure_is_bad_gateway() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(StubBackend::new().with_text_error("network down"));
    let (router, _) = app(&dir, backend, Some("k"));

    let draft = json!({
        "title": "Checkout",
        "targetUrl": "https://shop.test/cart",
        "steps": [{"action": "CLICK", "description": "Click checkout"}]
    });
    let (status, body) = send(&router, "POST", "/tests/run", Some(draft)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Failed to run test. network down");

    let (_, progress) = send(&router, "GET", "/tests/status", None).await;
    assert_eq!(progress["phase"], "failed");
}

#[tokio::test]
async fn test_tools_regex() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(
        StubBackend::new().with_text(r#"{"regex": "^\\d+$", "explanation": "Digits only."}"#),
    );
    let (router, _) = app(&dir, backend, Some("k"));

    let (status, body) = send(
        &router,
        "POST",
        "/tools/regex",
        Some(json!({"description": "only digits"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["regex"], r"^\d+$");
}

#[tokio::test]
async fn test_tools_refactor_and_component() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(
        StubBackend::new()
            .with_text("```ts\nconst x: number = 1;\n```")
            .with_text("<div class=\"card\"></div>"),
    );
    let (router, _) = app(&dir, backend, Some("k"));

    let (status, body) = send(
        &router,
        "POST",
        "/tools/refactor",
        Some(json!({"code": "var x = 1", "instruction": "convert to TypeScript"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "const x: number = 1;");

    let (status, body) = send(
        &router,
        "POST",
        "/tools/component",
        Some(json!({"description": "a card"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "<div class=\"card\"></div>");
}

#[tokio::test]
async fn test_generate_steps_route() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(StubBackend::new().with_text(
        r#"{"steps": [{"action": "NAVIGATE", "description": "Open the page"}]}"#,
    ));
    let (router, _) = app(&dir, backend, Some("k"));

    let (status, body) = send(
        &router,
        "POST",
        "/tests/steps/generate",
        Some(json!({"goal": "open it", "url": "https://shop.test"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["steps"][0]["action"], "NAVIGATE");
}

#[tokio::test]
async fn test_save_api_key() {
    let dir = TempDir::new().unwrap();
    let (router, state) = app(&dir, Arc::new(StubBackend::new()), None);

    let (status, body) = send(
        &router,
        "POST",
        "/settings/api-key",
        Some(json!({"apiKey": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter an API key.");

    let (status, body) = send(
        &router,
        "POST",
        "/settings/api-key",
        Some(json!({"apiKey": " new-key "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["configured"], true);
    assert!(state.has_api_key().await);
    assert_eq!(
        webcheck::settings::get_api_key(&state.config.settings_path()),
        Some("new-key".to_string())
    );

    let (_, body) = send(&router, "GET", "/settings/api-key", None).await;
    assert_eq!(body["configured"], true);
}

#[tokio::test]
async fn test_concurrent_key_saves_agree_with_file() {
    let dir = TempDir::new().unwrap();
    let (_, state) = app(&dir, Arc::new(StubBackend::new()), None);

    let keys: Vec<String> = (0..8).map(|i| format!("key-{i}")).collect();
    let saves = keys.iter().map(|key| state.set_api_key(key));
    for result in futures::future::join_all(saves).await {
        result.unwrap();
    }

    let in_memory = state.credential.read().await.api_key.clone();
    let on_disk = webcheck::settings::get_api_key(&state.config.settings_path());
    assert!(in_memory.is_some());
    assert_eq!(in_memory, on_disk);
}
