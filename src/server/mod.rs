//! HTTP server for the time endpoint and Kubernetes probes
//!
//! - `/` - Current UTC time and the caller's IP address
//! - `/health` - Liveness probe (process is running)
//! - `/ready` - Readiness probe (503 once shutdown has begun)
//!
//! Also provides graceful shutdown handling for SIGTERM/SIGINT.

mod health;
pub mod shutdown;
mod time;

pub use health::{
    bind_listener, build_router, run_server, HealthResponse, ReadinessState, ReadinessStatus,
    ReadyResponse, ServerState,
};
pub use shutdown::{
    drain_on_signal, shutdown_channel, wait_for_signal, ShutdownController, ShutdownSignal,
};
pub use time::{client_ip, TimeResponse};

#[cfg(test)]
mod test_support;

#[cfg(test)]
#[path = "health_test.rs"]
mod health_tests;

#[cfg(test)]
#[path = "time_test.rs"]
mod time_tests;

#[cfg(test)]
#[path = "shutdown_test.rs"]
mod shutdown_tests;
