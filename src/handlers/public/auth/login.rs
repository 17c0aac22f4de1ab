use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::error::{ApiError, Result};
use crate::handlers::{json_body, string_field};
use crate::AppState;

/// POST /api/login - exchange email/password for a Supabase session.
///
/// The password grant happens entirely upstream; on success the caller
/// receives the user identity plus the access/refresh token pair.
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response> {
    let data = json_body(&body)?;

    let (Some(email), Some(password)) = (
        string_field(&data, "email"),
        string_field(&data, "password"),
    ) else {
        return Err(ApiError::bad_request("Unable to login. Data is incomplete."));
    };

    let upstream = state.supabase.password_grant(&email, &password).await?;

    if upstream.is_success() && upstream.body.get("access_token").is_some() {
        let user = upstream.body.get("user").cloned().unwrap_or(Value::Null);

        return Ok((
            StatusCode::OK,
            Json(json!({
                "message": "Login successful.",
                "user": {
                    "id": user.get("id"),
                    "email": user.get("email"),
                    "access_token": upstream.body.get("access_token"),
                    "refresh_token": upstream.body.get("refresh_token"),
                },
            })),
        )
            .into_response());
    }

    tracing::warn!(upstream_status = upstream.status, "login rejected by Supabase");

    Ok((
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "message": "Login failed.",
            "error": upstream.body,
            "status_code": upstream.status,
        })),
    )
        .into_response())
}
