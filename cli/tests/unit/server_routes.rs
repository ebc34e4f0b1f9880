//! Route tests for the HTTP server, driven with `tower::ServiceExt::oneshot`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;
use std::sync::Arc;

use agent_ui::application::services::Provisioner;
use agent_ui::infra::AssetStore;
use agent_ui::server::{ServerState, router};
use agent_ui_common::ProvisionPolicy;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::mocks::{FakeRegistry, INDEX_HTML, bundle, seed_assets};

fn state(home: &Path, registry: FakeRegistry, policy: ProvisionPolicy) -> ServerState {
    let mut cfg = agent_ui::domain::UiConfig::new();
    cfg.insert("title".to_string(), serde_json::json!("Route Test"));
    ServerState {
        store: Arc::new(AssetStore::new(home)),
        registry: Arc::new(registry),
        provisioner: Arc::new(Provisioner::new(policy)),
        base_url: Arc::from("http://localhost:8888"),
        ui_config: Some(Arc::new(cfg)),
    }
}

fn seeded(home: &Path) -> ServerState {
    seed_assets(home, INDEX_HTML);
    state(home, FakeRegistry::unreachable(), ProvisionPolicy::FailFast)
}

async fn send(state: ServerState, method: &str, uri: &str) -> (StatusCode, String) {
    let response = router(state)
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(state: ServerState, uri: &str) -> (StatusCode, String) {
    send(state, "GET", uri).await
}

fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("JSON body")
}

// ── Entry HTML ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn root_serves_injected_entry_html() {
    let home = tempfile::tempdir().unwrap();
    let (status, body) = get(seeded(home.path()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"window.AGENT_BASE_URL = "http://localhost:8888""#));
    assert!(body.contains(r#"window.AGENT_WEB_UI_CONFIG = {"title": "Route Test"}"#));
}

#[tokio::test]
async fn index_html_route_is_injected_too() {
    let home = tempfile::tempdir().unwrap();
    let (status, body) = get(seeded(home.path()), "/index.html").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("window.AGENT_BASE_URL"));
}

#[tokio::test]
async fn client_side_route_falls_back_to_injected_entry_html() {
    let home = tempfile::tempdir().unwrap();
    let (status, body) = get(seeded(home.path()), "/sessions/42").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("window.AGENT_WEB_UI_CONFIG"));
}

#[tokio::test]
async fn existing_asset_is_served_raw() {
    let home = tempfile::tempdir().unwrap();
    let response = router(seeded(home.path()))
        .oneshot(
            Request::builder()
                .uri("/assets/app.js")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.contains("javascript"), "{content_type}");
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"console.log('seeded')");
}

#[tokio::test]
async fn static_prefix_serves_files_without_injection() {
    let home = tempfile::tempdir().unwrap();
    let (status, body) = get(seeded(home.path()), "/static/index.html").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, INDEX_HTML);
}

#[tokio::test]
async fn missing_assets_return_error_with_download_suggestion() {
    let home = tempfile::tempdir().unwrap();
    let state = state(home.path(), FakeRegistry::unreachable(), ProvisionPolicy::FailFast);

    let (status, body) = get(state, "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = json(&body);
    assert!(body["error"].as_str().unwrap().contains("Static assets not found"));
    assert!(body["suggestion"].as_str().unwrap().contains("agent-ui download"));
}

#[tokio::test]
async fn auto_download_policy_provisions_on_first_request() {
    let home = tempfile::tempdir().unwrap();
    let registry = FakeRegistry::publishing(&[("1.0.0", bundle("auto"))], "1.0.0");
    let state = state(home.path(), registry, ProvisionPolicy::AutoDownloadOnce);

    let (status, body) = get(state, "/").await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body.contains("window.AGENT_BASE_URL"));
    assert!(home.path().join("static/index.html").exists());
}

// ── API ───────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_healthy_directory() {
    let home = tempfile::tempdir().unwrap();
    let (status, body) = get(seeded(home.path()), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["index_exists"], true);
    assert_eq!(body["version"]["version"], "unknown");
}

#[tokio::test]
async fn health_reports_unhealthy_without_assets() {
    let home = tempfile::tempdir().unwrap();
    let state = state(home.path(), FakeRegistry::unreachable(), ProvisionPolicy::FailFast);

    let (status, body) = get(state, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["status"], "unhealthy");
    assert!(body["suggestion"].as_str().unwrap().contains("agent-ui download"));
    assert!(body.get("static_path").is_none());
}

#[tokio::test]
async fn download_endpoint_acquires_latest() {
    let home = tempfile::tempdir().unwrap();
    let registry = FakeRegistry::publishing(
        &[("1.0.0", bundle("a")), ("1.1.0", bundle("b"))],
        "1.1.0",
    );
    let state = state(home.path(), registry, ProvisionPolicy::FailFast);

    let (status, body) = send(state, "POST", "/api/download-assets").await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let body = json(&body);
    assert_eq!(body["status"], "success");
    assert_eq!(body["version"], "1.1.0");
    assert_eq!(body["files"], 2);
    assert_eq!(body["message"], "Downloaded assets version 1.1.0");
    assert!(home.path().join("static_version.rs").exists());
}

#[tokio::test]
async fn download_endpoint_honours_version_query() {
    let home = tempfile::tempdir().unwrap();
    let registry = FakeRegistry::publishing(
        &[("1.0.0", bundle("a")), ("1.1.0", bundle("b"))],
        "1.1.0",
    );
    let state = state(home.path(), registry, ProvisionPolicy::FailFast);

    let (status, body) = send(state, "POST", "/api/download-assets?version=1.0.0").await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(json(&body)["version"], "1.0.0");
}

#[tokio::test]
async fn download_endpoint_unknown_version_is_an_error() {
    let home = tempfile::tempdir().unwrap();
    let registry = FakeRegistry::publishing(&[("1.0.0", bundle("a"))], "1.0.0");
    let state = state(home.path(), registry, ProvisionPolicy::FailFast);

    let (status, body) = send(state, "POST", "/api/download-assets?version=9.9.9").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = json(&body);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Failed to download assets"), "{error}");
    assert!(error.contains("9.9.9"));
    assert!(body["suggestion"].is_string());
}

#[tokio::test]
async fn download_endpoint_rejects_get() {
    let home = tempfile::tempdir().unwrap();
    let (status, _) = get(seeded(home.path()), "/api/download-assets").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
