use std::sync::Arc;

use anyhow::{Context, Result};
use gateway_core::TosClient;
use gateway_server::{AppState, Config, create_router, load_dotenv};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "gateway_server=info,gateway_core=info,tower_http=info".to_string());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env().context("failed to load configuration")?;
    info!(config = ?config, "configuration loaded");

    let store = TosClient::new(config.tos.clone());
    let state = AppState::new(Arc::new(store), &config);
    let app = create_router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, bucket = %config.tos.bucket, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, starting graceful shutdown"),
        _ = terminate => info!("received terminate signal, starting graceful shutdown"),
    }
}
