use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::{ApiError, Result};
use crate::handlers::{json_body, string_field};
use crate::AppState;

/// POST /api/recover - send a password recovery email.
pub async fn recover(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response> {
    let data = json_body(&body)?;

    let Some(email) = string_field(&data, "email") else {
        return Err(ApiError::bad_request(
            "Unable to send recovery email. Data is incomplete.",
        ));
    };

    let upstream = state.supabase.send_recovery(&email).await?;

    if upstream.is_success() {
        Ok(Json(json!({ "message": "Password recovery email sent." })).into_response())
    } else {
        Err(ApiError::upstream_rejected(
            "Unable to send recovery email.",
            upstream.status,
            upstream.body,
        ))
    }
}
