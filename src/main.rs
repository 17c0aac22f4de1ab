use std::sync::Arc;

use alma101_api::config::AppConfig;
use alma101_api::handlers;
use alma101_api::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;
    let port = config.port;
    tracing::info!(port, static_dir = %config.static_dir, "Starting Alma101 API");

    let state = Arc::new(AppState::new(config));
    let app = handlers::create_router(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(address = %bind_addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("alma101_api=debug,tower_http=debug,info")),
        )
        .init();
}
