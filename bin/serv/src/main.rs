use std::net::SocketAddr;

use axum::{Router, routing::get};
use habla_api::{config::ApiConfig, state::ApiState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables (and `.env` when present)
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    habla_api::tracing::init_tracing(config.env);

    let metrics_handle = habla_api::metrics::init_metrics()?;

    // Initialize the application state
    let state = ApiState::new(&config)?;

    // Metrics endpoint, kept out of the tracked and rate limited stack
    let metrics_app = Router::new()
        .route("/metrics", get(habla_api::metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = habla_api::router::app(&config, state)?.merge(metrics_app);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        frontend_dir = %config.frontend_dir.display(),
        "Server running"
    );

    // Peer addresses back the per-IP rate limit when no forwarding header is set
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
