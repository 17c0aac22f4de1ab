//! Bearer-token authentication against the Supabase identity provider.
//!
//! Every privileged request re-validates its token upstream; there is no
//! local session store or token cache. Mutating handlers call
//! [`require_admin`] before touching the data API.

use axum::http::HeaderMap;
use serde::Deserialize;

use crate::error::ApiError;
use crate::AppState;

/// Authenticated user resolved from an access token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Extract a bearer token from the request headers.
///
/// `X-Authorization` is honored as a fallback for hosting setups that
/// strip the standard `Authorization` header. A raw token without the
/// `Bearer ` prefix is accepted, matching what the frontend has sent
/// historically.
pub fn bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let raw = headers
        .get("authorization")
        .or_else(|| headers.get("x-authorization"))
        .ok_or_else(|| ApiError::unauthorized("No token provided"))?;

    let value = raw
        .to_str()
        .map_err(|_| ApiError::unauthorized("No token provided"))?;

    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        return Err(ApiError::unauthorized("No token provided"));
    }

    Ok(token.to_string())
}

/// Validate the request's token and return the user it resolves to.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
    let token = bearer_token(headers)?;

    let upstream = state
        .supabase
        .get_user(&token)
        .await
        .map_err(|_| ApiError::unauthorized("Invalid token"))?;

    if upstream.status != 200 {
        return Err(ApiError::unauthorized("Invalid token"));
    }

    serde_json::from_value(upstream.body).map_err(|_| ApiError::unauthorized("Invalid token"))
}

/// Authenticate and require the configured admin identity.
pub async fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
    let user = authenticate(state, headers).await?;

    let is_admin = user
        .email
        .as_deref()
        .map(|email| email.eq_ignore_ascii_case(&state.config.admin_email))
        .unwrap_or(false);

    if !is_admin {
        tracing::warn!(user_id = %user.id, "non-admin attempted a mutating request");
        return Err(ApiError::forbidden("Forbidden: admin only"));
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(name: &'static str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with("authorization", "Bearer abc123");
        assert_eq!(bearer_token(&headers).unwrap(), "abc123");
    }

    #[test]
    fn accepts_token_without_prefix() {
        let headers = headers_with("authorization", "abc123");
        assert_eq!(bearer_token(&headers).unwrap(), "abc123");
    }

    #[test]
    fn falls_back_to_x_authorization() {
        let headers = headers_with("x-authorization", "Bearer abc123");
        assert_eq!(bearer_token(&headers).unwrap(), "abc123");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.message(), "No token provided");
    }

    #[test]
    fn empty_token_is_unauthorized() {
        let headers = headers_with("authorization", "Bearer   ");
        assert!(bearer_token(&headers).is_err());
    }
}
