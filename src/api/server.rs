//! HTTP API Server
//!
//! Binds the configured address and serves the router until Ctrl+C or
//! SIGTERM.

use std::time::Duration;

use axum::http::{Method, header::CONTENT_TYPE};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, instrument};

use crate::config::ServerConfig;
use crate::errors::Result;

use super::{AppState, routes::create_router};

/// Runs the HTTP API until a shutdown signal arrives.
#[instrument(skip(config, state), fields(address = %config.bind_address))]
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let mut app = create_router(state);

    if config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE])
            .allow_origin(Any)
            .max_age(Duration::from_secs(60 * 60));
        app = app.layer(cors);
    }

    app = app.layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind_address.as_str()).await?;
    info!("Server running on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
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
}
