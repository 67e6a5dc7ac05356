//! SimpleTimeService: current UTC time and caller IP over HTTP, with
//! liveness and readiness probes for orchestrated deployment.

pub mod clock;
pub mod config;
pub mod error;
pub mod server;
