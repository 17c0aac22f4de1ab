//! Verb handlers for `/api/{resource}`.
//!
//! Reads are public. Mutations re-validate the caller as the admin
//! identity on every request before the call is forwarded to the data
//! API; the record id travels in the `?id=` query parameter.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::middleware::auth::require_admin;
use crate::AppState;

use super::Resource;

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters shared by the record handlers.
///
/// `page` and `limit` are parsed leniently: garbage falls back to the
/// defaults instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    id: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

impl RecordQuery {
    fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(1)
            .max(1)
    }

    fn limit(&self) -> u32 {
        self.limit
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

/// GET /api/{resource} - fetch one record by `?id=`, or a page of records.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(resource): Path<String>,
    Query(query): Query<RecordQuery>,
) -> Result<Response> {
    let resource: Resource = resource.parse()?;

    if let Some(raw_id) = &query.id {
        let id = parse_id(raw_id)?;
        let upstream = state.supabase.select_by_id(resource.table(), &id).await?;

        if !upstream.is_success() {
            return Err(ApiError::upstream_rejected(
                format!("Unable to fetch {}", resource.table()),
                upstream.status,
                upstream.body,
            ));
        }

        return match upstream.body.as_array().and_then(|rows| rows.first()) {
            Some(row) => Ok(Json(row.clone()).into_response()),
            None => Err(ApiError::not_found(format!(
                "{} not found",
                resource.singular()
            ))),
        };
    }

    let limit = query.limit();
    let offset = (query.page() - 1) * limit;
    let upstream = state
        .supabase
        .select_page(resource.table(), limit, offset)
        .await?;

    if !upstream.is_success() {
        return Err(ApiError::upstream_rejected(
            format!("Unable to fetch {}", resource.table()),
            upstream.status,
            upstream.body,
        ));
    }

    Ok(Json(upstream.body).into_response())
}

/// POST /api/{resource} - create a record (admin only).
///
/// `author_id` is always set server-side from the authenticated admin
/// identity; a value supplied by the caller is overwritten.
pub async fn post(
    State(state): State<Arc<AppState>>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let resource: Resource = resource.parse()?;
    let admin = require_admin(&state, &headers).await?;

    let mut data: Value =
        serde_json::from_slice(&body).map_err(|_| ApiError::bad_request("Invalid JSON body"))?;
    let Some(record) = data.as_object_mut() else {
        return Err(ApiError::bad_request("Invalid JSON body"));
    };
    record.insert("author_id".to_string(), Value::String(admin.id));

    let upstream = state.supabase.insert(resource.table(), &data).await?;

    if upstream.is_success() {
        Ok((
            StatusCode::CREATED,
            Json(json!({
                "message": format!("{} created successfully", resource.singular()),
                "data": upstream.body,
            })),
        )
            .into_response())
    } else {
        Err(ApiError::upstream_rejected(
            format!("Unable to create {}", resource.singular().to_lowercase()),
            upstream.status,
            upstream.body,
        ))
    }
}

/// PUT /api/{resource}?id= - update a record (admin only).
pub async fn put(
    State(state): State<Arc<AppState>>,
    Path(resource): Path<String>,
    Query(query): Query<RecordQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let resource: Resource = resource.parse()?;
    require_admin(&state, &headers).await?;

    let Some(raw_id) = &query.id else {
        return Err(ApiError::bad_request(format!(
            "{} ID not provided",
            resource.singular()
        )));
    };
    let id = parse_id(raw_id)?;

    let patch: Value =
        serde_json::from_slice(&body).map_err(|_| ApiError::bad_request("Invalid JSON body"))?;
    if !patch.is_object() {
        return Err(ApiError::bad_request("Invalid JSON body"));
    }

    let upstream = state
        .supabase
        .update_by_id(resource.table(), &id, &patch)
        .await?;

    if upstream.is_success() {
        Ok(Json(json!({
            "message": format!("{} updated successfully", resource.singular()),
        }))
        .into_response())
    } else {
        Err(ApiError::upstream_rejected(
            format!("Unable to update {}", resource.singular().to_lowercase()),
            upstream.status,
            upstream.body,
        ))
    }
}

/// DELETE /api/{resource}?id= - delete a record (admin only).
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(resource): Path<String>,
    Query(query): Query<RecordQuery>,
    headers: HeaderMap,
) -> Result<Response> {
    let resource: Resource = resource.parse()?;
    require_admin(&state, &headers).await?;

    let Some(raw_id) = &query.id else {
        return Err(ApiError::bad_request(format!(
            "{} ID not provided",
            resource.singular()
        )));
    };
    let id = parse_id(raw_id)?;

    let upstream = state.supabase.delete_by_id(resource.table(), &id).await?;

    if upstream.is_success() {
        Ok(Json(json!({
            "message": format!("{} deleted successfully", resource.singular()),
        }))
        .into_response())
    } else {
        Err(ApiError::upstream_rejected(
            format!("Unable to delete {}", resource.singular().to_lowercase()),
            upstream.status,
            upstream.body,
        ))
    }
}

/// Record ids are UUIDs; anything else is rejected before it can reach
/// the upstream query string.
fn parse_id(raw: &str) -> Result<String> {
    Uuid::parse_str(raw.trim())
        .map(|id| id.to_string())
        .map_err(|_| ApiError::bad_request("Invalid resource id"))
}
