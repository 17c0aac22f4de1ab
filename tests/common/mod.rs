use std::path::PathBuf;
use std::sync::Arc;

use alma101_api::config::AppConfig;
use alma101_api::handlers::create_router;
use alma101_api::AppState;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const ADMIN_EMAIL: &str = "admin@alma101.io";
#[allow(dead_code)]
pub const ADMIN_ID: &str = "11111111-1111-1111-1111-111111111111";
#[allow(dead_code)]
pub const ADMIN_TOKEN: &str = "admin-token";
#[allow(dead_code)]
pub const READER_TOKEN: &str = "reader-token";

/// In-process application wired against a mock Supabase server and a
/// temporary asset root.
pub struct TestApp {
    pub router: Router,
    pub supabase: MockServer,
    root: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let supabase = MockServer::start().await;
        let root = TempDir::new().expect("temp asset root");
        let asset_dir = root.path().join("dist");
        std::fs::create_dir(&asset_dir).expect("create asset dir");

        let config = AppConfig {
            supabase_url: supabase.uri(),
            supabase_anon_key: "anon-key".to_string(),
            supabase_service_role_key: "service-key".to_string(),
            admin_email: ADMIN_EMAIL.to_string(),
            port: 0,
            static_dir: asset_dir.display().to_string(),
            cors_allowed_origins: vec!["*".to_string()],
        };

        let router = create_router(Arc::new(AppState::new(config)));

        Self {
            router,
            supabase,
            root,
        }
    }

    /// Directory served as the frontend bundle.
    #[allow(dead_code)]
    pub fn asset_dir(&self) -> PathBuf {
        self.root.path().join("dist")
    }

    /// A writable location outside the asset root, for traversal tests.
    #[allow(dead_code)]
    pub fn outside_asset_dir(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    /// Mount `/auth/v1/user` mocks: ADMIN_TOKEN resolves to the admin
    /// identity, READER_TOKEN to an ordinary user, anything else is 401.
    #[allow(dead_code)]
    pub async fn mock_user_lookup(&self) {
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(header("authorization", format!("Bearer {}", ADMIN_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": ADMIN_ID,
                "email": ADMIN_EMAIL,
            })))
            .mount(&self.supabase)
            .await;

        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(header("authorization", format!("Bearer {}", READER_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "22222222-2222-2222-2222-222222222222",
                "email": "reader@example.com",
            })))
            .mount(&self.supabase)
            .await;

        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "invalid JWT",
            })))
            .mount(&self.supabase)
            .await;
    }

    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[allow(dead_code)]
pub fn json_request(
    http_method: &str,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(http_method)
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    builder
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[allow(dead_code)]
pub fn bodyless_request(http_method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(http_method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    builder.body(Body::empty()).expect("request")
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
