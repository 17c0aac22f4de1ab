use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::{ApiError, Result};
use crate::handlers::{json_body, string_field};
use crate::AppState;

/// POST /api/register - create a user through the Supabase admin API.
///
/// An optional `username` is carried along as user metadata on the
/// created identity.
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response> {
    let data = json_body(&body)?;

    let (Some(email), Some(password)) = (
        string_field(&data, "email"),
        string_field(&data, "password"),
    ) else {
        return Err(ApiError::bad_request(
            "Unable to create user. Data is incomplete.",
        ));
    };

    let mut payload = json!({ "email": email, "password": password });
    if let Some(username) = string_field(&data, "username") {
        payload["user_metadata"] = json!({ "username": username });
    }

    let upstream = state.supabase.admin_create_user(&payload).await?;

    if upstream.is_success() {
        Ok((
            StatusCode::CREATED,
            Json(json!({
                "message": "User was created.",
                "user": upstream.body,
            })),
        )
            .into_response())
    } else {
        Err(ApiError::upstream_rejected(
            "Unable to create user.",
            upstream.status,
            upstream.body,
        ))
    }
}
