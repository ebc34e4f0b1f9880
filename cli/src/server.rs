//! HTTP server for the agent UI.
//!
//! Routes:
//!   - `GET /`, `GET /index.html`  injected entry HTML
//!   - `GET /static/*`             files of the asset directory
//!   - `GET /api/health`           asset directory health report
//!   - `POST /api/download-assets` on-demand acquisition (`?version=V`)
//!   - anything else               a file of the asset directory if one
//!     matches, the injected entry HTML otherwise (client-side routing)

use std::sync::Arc;

use agent_ui_common::{DownloadResponse, ErrorBody, HealthReport, STATIC_ASSETS_PACKAGE};
use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::application::ports::{AssetRepository, RegistryClient, SilentReporter};
use crate::application::services::{Provisioner, acquire, agent_ui_html, health_report};
use crate::domain::{
    DOWNLOAD_HINT, InjectionError, PackageReference, RegistryError, StaticAssetsError, UiConfig,
};

/// Shared state of every handler.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn AssetRepository + Send + Sync>,
    pub registry: Arc<dyn RegistryClient + Send + Sync>,
    pub provisioner: Arc<Provisioner>,
    pub base_url: Arc<str>,
    pub ui_config: Option<Arc<UiConfig>>,
}

/// Build the application router.
pub fn router(state: ServerState) -> Router {
    let static_dir = state.store.static_dir();
    let spa = ServeDir::new(&static_dir)
        .append_index_html_on_directories(false)
        .fallback(get(index).with_state::<()>(state.clone()));

    Router::new()
        .route("/", get(index))
        .route("/index.html", get(index))
        .route("/api/health", get(health))
        .route("/api/download-assets", post(download_assets))
        .nest_service("/static", ServeDir::new(&static_dir))
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn serve(state: ServerState, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr().context("reading bound address")?;
    tracing::info!(
        addr = %local,
        static_dir = %state.store.static_dir().display(),
        "agent UI server ready at http://{local}/"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("agent UI server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal");
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn index(State(state): State<ServerState>) -> Result<Html<String>, ApiError> {
    let html = tokio::task::spawn_blocking(move || {
        agent_ui_html(
            &state.provisioner,
            state.registry.as_ref(),
            state.store.as_ref(),
            &SilentReporter,
            &state.base_url,
            state.ui_config.as_deref(),
        )
    })
    .await
    .map_err(ApiError::join)?
    .map_err(ApiError::from_html)?;
    Ok(Html(html))
}

async fn health(State(state): State<ServerState>) -> Result<Json<HealthReport>, ApiError> {
    let report = tokio::task::spawn_blocking(move || health_report(state.store.as_ref()))
        .await
        .map_err(ApiError::join)?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
struct DownloadQuery {
    version: Option<String>,
}

async fn download_assets(
    State(state): State<ServerState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let reference = PackageReference::new(STATIC_ASSETS_PACKAGE, query.version.as_deref());
    let acquisition = tokio::task::spawn_blocking(move || {
        acquire(
            state.registry.as_ref(),
            state.store.as_ref(),
            &SilentReporter,
            &reference,
        )
    })
    .await
    .map_err(ApiError::join)?
    .map_err(ApiError::from_download)?;

    Ok(Json(DownloadResponse {
        status: "success".to_string(),
        message: format!("Downloaded assets version {}", acquisition.version),
        version: acquisition.version,
        files: acquisition.files,
    }))
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// A handler failure rendered as `500` with an [`ErrorBody`].
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(error: String, suggestion: Option<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody { error, suggestion },
        }
    }

    fn join(e: tokio::task::JoinError) -> Self {
        tracing::error!(error = %e, "blocking task failed");
        Self::new(format!("internal task failed: {e}"), None)
    }

    fn from_html(e: anyhow::Error) -> Self {
        tracing::warn!(error = %format!("{e:#}"), "cannot render entry HTML");
        let suggestion = if e.downcast_ref::<StaticAssetsError>().is_some()
            || e.downcast_ref::<RegistryError>().is_some()
        {
            Some(format!("Run '{DOWNLOAD_HINT}' or POST /api/download-assets"))
        } else if e.downcast_ref::<InjectionError>().is_some() {
            Some("The bundle's index.html has no <head> tag, download another version".to_string())
        } else {
            None
        };
        Self::new(format!("{e:#}"), suggestion)
    }

    fn from_download(e: anyhow::Error) -> Self {
        tracing::warn!(error = %format!("{e:#}"), "asset download failed");
        let suggestion = match e.downcast_ref::<RegistryError>() {
            Some(RegistryError::VersionNotFound { .. }) => {
                "Pick one of the available versions".to_string()
            }
            _ => "Check internet connection and npm registry availability".to_string(),
        };
        Self::new(format!("Failed to download assets: {e:#}"), Some(suggestion))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
