mod config;
mod error;
mod middleware;
mod models;
mod pipeline;
mod routes;
mod state;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkcost=info,tower_http=info".into()),
        )
        .init();

    // Load config
    let config = Config::from_env()?;
    let port = config.port;

    tracing::info!("Starting inkcost on port {}", port);
    tracing::info!(
        printers = pipeline::printers::PRINTERS.len(),
        currency = %config.currency_symbol,
        max_upload_bytes = config.max_upload_bytes,
        "Printer catalog ready"
    );

    let state = AppState::new(config)?;

    // Init health tracking
    routes::health::init_start_time();

    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Listening on 0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
