use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

use webcheck::config::{CliArgs, WebCheckConfig};
use webcheck::server;
use webcheck::settings;
use webcheck::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "webcheck=info,tower_http=info".into()),
        )
        .init();

    let args = CliArgs::parse();
    info!("Starting webcheck v{}", env!("CARGO_PKG_VERSION"));

    let config = WebCheckConfig::from_args(&args);
    let port = config.port;
    info!("Data dir: {:?}", config.data_dir);
    info!(
        "Models: text={}, image={}",
        config.text_model, config.image_model
    );

    // Stored key wins over the environment
    let api_key = settings::get_api_key(&config.settings_path()).or_else(|| {
        args.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
    });
    if api_key.is_none() {
        warn!("No API key configured; generation calls will fail until one is saved");
    }

    let state = Arc::new(AppState::new(config, api_key));

    let router = server::build_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("webcheck listening on http://0.0.0.0:{}", port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("webcheck shutting down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Received shutdown signal");
}
