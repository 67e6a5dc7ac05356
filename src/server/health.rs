//! Probe endpoints, shared server state, and the serve loop
//!
//! - `/health` - Liveness: Is the process alive?
//! - `/ready` - Readiness: Should the orchestrator keep routing traffic here?

use crate::clock::Clock;
use crate::error::ServerError;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info};

use super::shutdown::ShutdownSignal;

/// Shared shutdown flag backing the readiness probe
///
/// Starts out ready. The shutdown listener flips it once when the process
/// begins shutting down; it is never reset for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ReadinessState {
    shutting_down: Arc<AtomicBool>,
}

impl ReadinessState {
    /// Create a new readiness state (initially ready)
    pub fn new() -> Self {
        Self {
            shutting_down: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mark the process as shutting down
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn begin_shutdown(&self) -> bool {
        !self.shutting_down.swap(true, Ordering::SeqCst)
    }

    /// Check if shutdown has begun
    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }

    /// Check if the instance should receive traffic
    pub fn is_ready(&self) -> bool {
        !self.is_shutting_down()
    }
}

impl Default for ReadinessState {
    fn default() -> Self {
        Self::new()
    }
}

/// State handed to every handler
#[derive(Clone)]
pub struct ServerState {
    pub(super) readiness: ReadinessState,
    pub(super) clock: Arc<dyn Clock>,
}

impl ServerState {
    /// Create new server state
    pub fn new(readiness: ReadinessState, clock: Arc<dyn Clock>) -> Self {
        Self { readiness, clock }
    }
}

/// Liveness payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// Readiness status reported by `/ready`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    Ready,
    ShuttingDown,
}

/// Readiness payload (no timestamp while shutting down)
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: ReadinessStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Liveness probe handler
///
/// Always returns 200 OK - if this responds, the process is alive.
async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: state.clock.timestamp(),
    })
}

/// Readiness probe handler
///
/// Returns 200 OK while serving, 503 Service Unavailable once shutdown has begun.
async fn ready(State(state): State<ServerState>) -> (StatusCode, Json<ReadyResponse>) {
    if state.readiness.is_shutting_down() {
        debug!("Readiness probe answered while shutting down");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyResponse {
                status: ReadinessStatus::ShuttingDown,
                timestamp: None,
            }),
        );
    }

    (
        StatusCode::OK,
        Json(ReadyResponse {
            status: ReadinessStatus::Ready,
            timestamp: Some(state.clock.timestamp()),
        }),
    )
}

/// Build the router for the time and probe endpoints
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(super::time::current_time))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}

/// Bind the listening socket
pub async fn bind_listener(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serve requests on `listener` until `shutdown` fires
///
/// In-flight requests complete before this returns. Peer addresses are
/// recorded per connection so `/` can fall back to them.
pub async fn run_server(
    listener: TcpListener,
    state: ServerState,
    mut shutdown: ShutdownSignal,
) -> Result<(), ServerError> {
    let app = build_router(state);

    // Log after successful bind - server is actually listening
    let addr = listener.local_addr()?;
    info!(addr = %addr, "Time service listening (HTTP)");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { shutdown.wait().await })
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
