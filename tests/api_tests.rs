// tests/api_tests.rs

use axum::{body::Body, http::Request};
use content_sanitizer::{config::Config, routes, state::AppState};
use tower::ServiceExt;

fn test_config(max_content_length: usize) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        rust_log: "error".to_string(),
        log_dir: "logs".to_string(),
        max_content_length,
        allowed_origins: vec!["http://localhost:3000".to_string()],
    }
}

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app_with(config: Config) -> String {
    let state = AppState { config };

    // 1. Create the router with the app state
    let app = routes::create_router(state);

    // 2. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 3. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn spawn_app() -> String {
    spawn_app_with(test_config(100_000)).await
}

async fn post_json(
    address: &str,
    path: &str,
    body: serde_json::Value,
) -> (u16, serde_json::Value) {
    let response = reqwest::Client::new()
        .post(&format!("{}{}", address, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");

    let status = response.status().as_u16();
    let json = response
        .json::<serde_json::Value>()
        .await
        .expect("Response is not JSON");
    (status, json)
}

#[tokio::test]
async fn health_check_works() {
    let app = routes::create_router(AppState {
        config: test_config(100_000),
    });

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn unknown_path_is_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn sanitize_strips_scripts_and_handlers() {
    let address = spawn_app().await;

    let (status, body) = post_json(
        &address,
        "/api/content/sanitize",
        serde_json::json!({
            "content": "<p>Normal text</p><script>alert('XSS')</script><img src=\"x\" onerror=\"alert('XSS')\">"
        }),
    )
    .await;

    assert_eq!(status, 200);
    let html = body["html"].as_str().unwrap();
    assert_eq!(html, "<p>Normal text</p><img src=\"x\">");
}

#[tokio::test]
async fn sanitize_applies_request_overrides() {
    let address = spawn_app().await;

    let (status, body) = post_json(
        &address,
        "/api/content/sanitize",
        serde_json::json!({
            "content": "<p>para</p><em>emph</em><script>x()</script>",
            "options": { "allowed_tags": ["em", "script"] }
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["html"], "para<em>emph</em>");
}

#[tokio::test]
async fn sanitize_rejects_unknown_option_keys() {
    let address = spawn_app().await;

    let (status, body) = post_json(
        &address,
        "/api/content/sanitize",
        serde_json::json!({
            "content": "<p>x</p>",
            "options": { "allow_everything": true }
        }),
    )
    .await;

    assert_eq!(status, 400);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_json_is_400() {
    let address = spawn_app().await;

    let response = reqwest::Client::new()
        .post(&format!("{}/api/content/strip", address))
        .header("content-type", "application/json")
        .body("{\"content\": ")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body = response.json::<serde_json::Value>().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn article_links_are_hardened() {
    let address = spawn_app().await;

    let (status, body) = post_json(
        &address,
        "/api/content/article",
        serde_json::json!({ "content": "<a href=\"https://example.com\">link</a>" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(
        body["html"],
        "<a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">link</a>"
    );
}

#[tokio::test]
async fn strip_returns_plain_text() {
    let address = spawn_app().await;

    let (status, body) = post_json(
        &address,
        "/api/content/strip",
        serde_json::json!({ "content": "<h1>Title</h1><p>Body   text</p>" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["text"], "Title Body text");
}

#[tokio::test]
async fn truncate_cuts_text() {
    let address = spawn_app().await;

    let (status, body) = post_json(
        &address,
        "/api/content/truncate",
        serde_json::json!({ "text": "abcdefghij", "max_length": 4 }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["text"], "abcd...");
}

#[tokio::test]
async fn excerpt_uses_requested_length() {
    let address = spawn_app().await;

    let (status, body) = post_json(
        &address,
        "/api/content/excerpt",
        serde_json::json!({
            "content": "<p>This is a long article body</p>",
            "max_length": 10
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["text"], "This is a...");
}

#[tokio::test]
async fn excerpt_defaults_to_200_characters() {
    let address = spawn_app().await;
    let content = format!("<p>{}</p>", "x".repeat(500));

    let (status, body) = post_json(
        &address,
        "/api/content/excerpt",
        serde_json::json!({ "content": content }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["text"], format!("{}...", "x".repeat(200)));
}

#[tokio::test]
async fn excerpt_fails_validation() {
    let address = spawn_app().await;

    let (status, body) = post_json(
        &address,
        "/api/content/excerpt",
        serde_json::json!({ "content": "<p>x</p>", "max_length": 0 }),
    )
    .await;

    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("max_length"));
}

#[tokio::test]
async fn render_returns_every_view() {
    let address = spawn_app().await;

    let (status, body) = post_json(
        &address,
        "/api/content/render",
        serde_json::json!({
            "content": "<h2>Hello</h2><p>Read <a href=\"https://example.com\">more</a></p><script>x()</script>"
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(
        body["html"],
        "<h2>Hello</h2><p>Read <a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">more</a></p>"
    );
    assert_eq!(body["text"], "Hello Read more");
    assert_eq!(body["excerpt"], "Hello Read more");
}

#[tokio::test]
async fn oversized_content_is_rejected() {
    let address = spawn_app_with(test_config(16)).await;

    let (status, body) = post_json(
        &address,
        "/api/content/sanitize",
        serde_json::json!({ "content": "<p>this body is longer than sixteen bytes</p>" }),
    )
    .await;

    assert_eq!(status, 413);
    assert!(body["error"].as_str().unwrap().contains("16 bytes"));
}

#[tokio::test]
async fn empty_content_yields_empty_output() {
    let address = spawn_app().await;

    for path in ["/api/content/sanitize", "/api/content/article", "/api/content/strip"] {
        let (status, body) =
            post_json(&address, path, serde_json::json!({ "content": "" })).await;
        assert_eq!(status, 200);
        let value = body
            .get("html")
            .or_else(|| body.get("text"))
            .and_then(|v| v.as_str())
            .unwrap();
        assert_eq!(value, "", "{path}");
    }
}
