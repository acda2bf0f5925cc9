//! easel-server - HTTP chat relay binary.

use std::net::SocketAddr;
use std::time::Duration;

use easel_core::EaselConfig;
use easel_server::{create_orchestrator, create_server, spawn_session_sweeper, AppState};
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    let filter = EnvFilter::from_default_env()
        .add_directive(Level::INFO.into())
        .add_directive("easel_server=debug".parse()?);
    let json_logs = std::env::var("EASEL_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json_logs {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    let config = EaselConfig::load()?;
    let orchestrator = create_orchestrator(&config)?;
    let state = AppState::new(
        orchestrator,
        config.server.clone(),
        config.relay.session_ttl_secs,
    );

    let sweeper = spawn_session_sweeper(
        state.sessions(),
        Duration::from_secs(config.server.purge_interval_secs),
    );

    let app = create_server(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(mode = %config.server.mode, "Starting easel-server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    sweeper.abort();
    info!("Server stopped cleanly");
    Ok(())
}
