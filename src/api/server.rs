use crate::api::routes;
use crate::api::state::AppState;
use crate::config::RelayConfig;
use crate::errors::Error;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

/// Starts and runs the HTTP server using Axum web framework
///
/// Spawns the rate-limit sweeper, binds `0.0.0.0:<port>` and serves until
/// Ctrl+C or SIGTERM.
///
/// # Arguments
/// * `config` - Fully resolved relay configuration
///
/// # Returns
/// * `Result<(), Error>` - Ok after a graceful shutdown, Error if binding or serving fails
pub async fn launch_server(config: RelayConfig) -> Result<(), Error> {
    let state = AppState::from_config(&config)?;
    tokio::spawn(state.rate_limiter.clone().run_sweeper());

    let app = routes::app(state, &config.allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://localhost:{}", config.port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
