//! Static asset serving, SPA fallback, and the health payload.
//!
//! Anything that is not an API route is resolved against the built
//! frontend bundle. Paths with no matching asset get the SPA entry
//! document; a bare JSON health payload stands in when no bundle has
//! been deployed.

use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::http::Uri;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{any, MethodRouter};
use axum::Json;
use serde_json::{json, Value};
use tower_http::services::ServeDir;

use crate::error::ApiError;
use crate::AppState;

/// GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(health_payload(&state, None))
}

/// Fallback service for non-API paths: existing bundle files first
/// (content type derived from the extension, traversal rejected), then
/// the SPA document or health payload.
pub fn static_service(state: Arc<AppState>) -> ServeDir<MethodRouter<()>> {
    let static_dir = state.config.static_dir.clone();
    let document_fallback = any(spa_document).with_state(state);

    ServeDir::new(static_dir).fallback(document_fallback)
}

/// Serve the SPA entry document, or the health payload when no bundle
/// has been deployed. API paths that fell through the router land here
/// too and get the JSON 404 envelope instead of HTML.
async fn spa_document(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let path = uri.path();
    if path == "/api" || path.starts_with("/api/") {
        let endpoint = path.trim_start_matches("/api").trim_start_matches('/');
        return ApiError::not_found(format!("API endpoint not found: {}", endpoint))
            .into_response();
    }

    let index = Path::new(&state.config.static_dir).join("index.html");
    match tokio::fs::read_to_string(&index).await {
        Ok(document) => Html(document).into_response(),
        Err(_) => Json(health_payload(&state, Some("Frontend bundle not found"))).into_response(),
    }
}

fn health_payload(state: &AppState, note: Option<&str>) -> Value {
    let mut payload = json!({
        "status": "ok",
        "service": "Alma101 API",
        "time": chrono::Utc::now().timestamp(),
        "port": state.config.port,
    });

    if let Some(note) = note {
        payload["note"] = json!(note);
    }

    payload
}
