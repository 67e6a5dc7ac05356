use std::sync::Arc;
use time_service::clock::SystemClock;
use time_service::config::Config;
use time_service::server::{
    bind_listener, drain_on_signal, run_server, shutdown_channel, wait_for_signal,
    ReadinessState, ServerState,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting SimpleTimeService");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    info!(
        addr = %config.addr(),
        drain = ?config.drain,
        "Configuration loaded"
    );

    // Create shutdown channel for coordinated shutdown
    let (shutdown_controller, shutdown_signal) = shutdown_channel();

    // Readiness starts out ready; only the shutdown listener changes it
    let readiness = ReadinessState::new();
    let state = ServerState::new(readiness.clone(), Arc::new(SystemClock));

    let listener = match bind_listener(config.addr()).await {
        Ok(l) => l,
        Err(e) => {
            error!(error = %e, "Failed to bind listener");
            return Err(e.into());
        }
    };

    // Flip readiness on SIGTERM/SIGINT, drain, then stop the server
    let listener_handle = tokio::spawn(drain_on_signal(
        wait_for_signal(),
        readiness,
        shutdown_controller,
        config.drain,
    ));

    let result = run_server(listener, state, shutdown_signal).await;
    listener_handle.abort();
    result?;

    info!("SimpleTimeService shut down gracefully");
    Ok(())
}
