//! HTTP route handlers and router assembly.

pub mod public;
pub mod resources;
pub mod spa;

use std::sync::Arc;

use axum::extract::Request;
use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::routing::{get, post};
use axum::Router;
use serde_json::Value;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::AppState;

/// Build the complete router: API routes, CORS, request tracing, and the
/// static/SPA fallback.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(spa::health))
        .merge(auth_routes())
        .merge(resource_routes())
        .fallback_service(spa::static_service(state.clone()))
        .layer(cors_layer(&state.config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::map_request(normalize_api_path))
        .with_state(state)
}

fn auth_routes() -> Router<Arc<AppState>> {
    use public::auth;

    Router::new()
        .route(
            "/api/login",
            post(auth::login)
                .options(preflight_ok)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/register",
            post(auth::register)
                .options(preflight_ok)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/recover",
            post(auth::recover)
                .options(preflight_ok)
                .fallback(method_not_allowed),
        )
}

fn resource_routes() -> Router<Arc<AppState>> {
    use resources::records;

    Router::new().route(
        "/api/:resource",
        get(records::get)
            .post(records::post)
            .put(records::put)
            .delete(records::delete)
            .options(preflight_ok)
            .fallback(method_not_allowed),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    if origins.iter().any(|origin| origin == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

/// Preflight requests short-circuit with 200; the CORS layer fills in the
/// access-control headers.
async fn preflight_ok() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Strip trailing slashes from API paths before routing, so
/// `/api/writeups/` dispatches like `/api/writeups`.
async fn normalize_api_path(mut request: Request) -> Request {
    if let Some(uri) = strip_api_trailing_slash(request.uri()) {
        *request.uri_mut() = uri;
    }
    request
}

fn strip_api_trailing_slash(uri: &Uri) -> Option<Uri> {
    let path = uri.path();
    if !path.starts_with("/api/") || !path.ends_with('/') {
        return None;
    }

    let trimmed = path.trim_end_matches('/');
    let rewritten = match uri.query() {
        Some(query) => format!("{}?{}", trimmed, query),
        None => trimmed.to_string(),
    };

    rewritten.parse().ok()
}

/// Decode a JSON request body, mapping malformed input to a 400 envelope.
pub(crate) fn json_body(body: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::bad_request("Invalid JSON body"))
}

/// Fetch a non-empty string field from a JSON object.
pub(crate) fn string_field(data: &Value, key: &str) -> Option<String> {
    data.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
