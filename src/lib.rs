//! Alma101 content-site backend.
//!
//! A thin proxy between the Alma101 single-page frontend and Supabase:
//! authentication and content CRUD requests are forwarded to the hosted
//! platform, and the built frontend bundle is served with SPA fallback.
//! The service holds no durable state of its own.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

use config::AppConfig;
use services::SupabaseClient;

/// Shared application state.
pub struct AppState {
    pub config: AppConfig,
    pub supabase: SupabaseClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let supabase = SupabaseClient::new(&config);
        Self { config, supabase }
    }
}
