//! Supabase Auth and REST (PostgREST) client.
//!
//! All durable data lives in Supabase; this client is the only path to
//! it. Auth calls made on behalf of a user carry the anon key, while the
//! data API and admin user creation carry the service-role key.

use std::time::Duration;

use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::error::ApiError;

/// Response relayed from Supabase: upstream status plus decoded body.
#[derive(Debug, Clone)]
pub struct Upstream {
    pub status: u16,
    pub body: Value,
}

impl Upstream {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Supabase API client.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    service_role_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to construct HTTP client");

        Self {
            http,
            base_url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
            service_role_key: config.supabase_service_role_key.clone(),
        }
    }

    // ─── Auth API ────────────────────────────────────────────

    /// Exchange email/password for a session via the password grant.
    pub async fn password_grant(&self, email: &str, password: &str) -> Result<Upstream, ApiError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport_error)?;

        decode(response).await
    }

    /// Resolve an access token to the user it belongs to.
    pub async fn get_user(&self, access_token: &str) -> Result<Upstream, ApiError> {
        let url = format!("{}/auth/v1/user", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(transport_error)?;

        decode(response).await
    }

    /// Create a user through the admin API.
    pub async fn admin_create_user(&self, payload: &Value) -> Result<Upstream, ApiError> {
        let url = format!("{}/auth/v1/admin/users", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        decode(response).await
    }

    /// Send a password recovery email.
    pub async fn send_recovery(&self, email: &str) -> Result<Upstream, ApiError> {
        let url = format!("{}/auth/v1/recover", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email }))
            .send()
            .await
            .map_err(transport_error)?;

        decode(response).await
    }

    // ─── REST data API ───────────────────────────────────────

    /// List rows, newest first.
    pub async fn select_page(
        &self,
        table: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Upstream, ApiError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);

        let response = self
            .rest(self.http.get(&url))
            .query(&[
                ("select", "*".to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
                ("order", "created_at.desc".to_string()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        decode(response).await
    }

    /// Fetch rows matching an id; PostgREST answers with a JSON array.
    pub async fn select_by_id(&self, table: &str, id: &str) -> Result<Upstream, ApiError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);

        let response = self
            .rest(self.http.get(&url))
            .query(&[
                ("select", "*".to_string()),
                ("id", format!("eq.{}", id)),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        decode(response).await
    }

    /// Insert a row, returning the created representation.
    pub async fn insert(&self, table: &str, row: &Value) -> Result<Upstream, ApiError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);

        let response = self
            .rest(self.http.post(&url))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(transport_error)?;

        decode(response).await
    }

    /// Update a row by id.
    pub async fn update_by_id(
        &self,
        table: &str,
        id: &str,
        patch: &Value,
    ) -> Result<Upstream, ApiError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);

        let response = self
            .rest(self.http.patch(&url))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await
            .map_err(transport_error)?;

        decode(response).await
    }

    /// Delete a row by id.
    pub async fn delete_by_id(&self, table: &str, id: &str) -> Result<Upstream, ApiError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);

        let response = self
            .rest(self.http.delete(&url))
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await
            .map_err(transport_error)?;

        decode(response).await
    }

    /// Attach the service-role credentials used for REST data calls.
    fn rest(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
    }
}

async fn decode(response: reqwest::Response) -> Result<Upstream, ApiError> {
    let status = response.status().as_u16();
    let text = response.text().await.map_err(transport_error)?;

    let body = if text.is_empty() {
        Value::Null
    } else {
        // PostgREST occasionally answers with non-JSON (e.g. proxies in
        // front of it); keep the raw text for diagnostics.
        serde_json::from_str(&text).unwrap_or_else(|_| json!({ "raw": text }))
    };

    Ok(Upstream { status, body })
}

fn transport_error(err: reqwest::Error) -> ApiError {
    tracing::error!(error = %err, "Supabase request failed");
    ApiError::upstream_unavailable("Supabase is unreachable")
}
