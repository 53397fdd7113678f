//! vidmark server library logic.

pub mod api_markers;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Extension, Json, Router,
};
use config::StaticFilesConfig;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use vidmark_store::MarkerStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Marker table accessor; owns the injected connection pool.
    pub store: MarkerStore,
    /// On-disk locations of the browser shell.
    pub static_files: StaticFilesConfig,
}

/// Maximum request body size (1 MiB). A marker row is far smaller; this only
/// guards against oversized payloads.
const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Health check handler.
///
/// Returns `200 OK` with server status and version. Used by monitoring and
/// CI to verify the server is running.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route(
            "/markers",
            post(api_markers::create_marker_handler).get(api_markers::list_markers_handler),
        )
        .route(
            "/markers/{id}",
            put(api_markers::update_marker_handler).delete(api_markers::delete_marker_handler),
        );

    // Supporting assets under /assets, when the directory exists.
    let assets_dir = state.static_files.assets_dir.clone();
    let router = if Path::new(&assets_dir).is_dir() {
        tracing::info!(path = %assets_dir, "serving assets at /assets");
        router.nest_service("/assets", ServeDir::new(&assets_dir))
    } else {
        router
    };

    // The browser shell at the root path, when present on disk.
    let public_dir = state.static_files.public_dir.clone();
    let index = Path::new(&public_dir).join("index.html");
    let router = if index.exists() {
        tracing::info!(path = %public_dir, "serving client static files");
        router.fallback_service(ServeDir::new(&public_dir).fallback(ServeFile::new(index)))
    } else {
        tracing::info!(path = %public_dir, "client directory not found, skipping static file serving");
        router
    };

    router
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
