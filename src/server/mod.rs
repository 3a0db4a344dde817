pub mod handlers;
pub mod types;

use crate::{
    Error, Result,
    chain::Chain,
    config::{Config, ServerConfig},
};
use axum::{Router, routing::post};
use handlers::AppState;
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/query", post(handlers::query))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let chain = Chain::from_config(&config)?;
    info!(
        "Relaying queries to model {} (max_tokens={}, temperature={})",
        config.llm.model, config.llm.max_tokens, config.llm.temperature
    );

    let app = router(AppState {
        chain: Arc::new(chain),
    });

    let addr = bind_addr(&config.server)?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr> {
    let ip = server
        .host
        .parse::<IpAddr>()
        .map_err(|e| Error::config(format!("Invalid server.host '{}': {}", server.host, e)))?;
    Ok(SocketAddr::new(ip, server.port))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
