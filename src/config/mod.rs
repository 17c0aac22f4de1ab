//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored when present; hosting platforms that inject
//! environment variables directly work without one.

use std::env;

use url::Url;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Supabase project base URL, without trailing slash.
    pub supabase_url: String,
    /// Public (anon) key, used for auth calls made on behalf of a user.
    pub supabase_anon_key: String,
    /// Service-role key, used for the REST data API and admin user creation.
    pub supabase_service_role_key: String,
    /// Email address of the single identity allowed to mutate content.
    pub admin_email: String,
    /// Server port.
    pub port: u16,
    /// Directory holding the built frontend bundle.
    pub static_dir: String,
    /// Allowed CORS origins; `*` allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let supabase_url = required("SUPABASE_URL")?;
        Url::parse(&supabase_url).map_err(|_| ConfigError::Invalid("SUPABASE_URL"))?;

        let service_role_key = required("SUPABASE_SERVICE_ROLE_KEY")?;
        if is_placeholder(&service_role_key) {
            // An example value copied from .env.example is as good as missing.
            return Err(ConfigError::Missing("SUPABASE_SERVICE_ROLE_KEY"));
        }

        Ok(Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key: required("SUPABASE_ANON_KEY")?,
            supabase_service_role_key: service_role_key,
            admin_email: required("SUPABASE_ADMIN_EMAIL")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "dist".to_string()),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::Missing(key)),
    }
}

/// Detect obvious example values so a real secret must be provided.
fn is_placeholder(value: &str) -> bool {
    let lower = value.to_lowercase();
    lower.contains("replace_with")
        || lower.contains("your_service_role")
        || lower.contains("your-service-role")
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
