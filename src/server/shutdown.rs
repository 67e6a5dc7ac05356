//! Graceful shutdown handling for the time service
//!
//! On SIGTERM/SIGINT:
//! - Readiness flips to `shutting_down` so the orchestrator stops routing here
//! - The listener keeps serving for the configured drain period
//! - The server stops accepting connections and finishes in-flight requests

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info};

use super::health::ReadinessState;

/// Receiving half of the shutdown channel
///
/// Every task that has to stop with the server holds its own clone.
#[derive(Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolve once shutdown has been requested
    pub async fn wait(&mut self) {
        while !*self.receiver.borrow() {
            if self.receiver.changed().await.is_err() {
                // No controller left to ever flip it
                break;
            }
        }
    }

    /// Whether shutdown has been requested, without waiting
    pub fn is_shutdown(&self) -> bool {
        *self.receiver.borrow()
    }
}

/// Sending half of the shutdown channel, owned by the shutdown listener
pub struct ShutdownController {
    sender: watch::Sender<bool>,
}

impl ShutdownController {
    /// Ask every `ShutdownSignal` holder to stop
    pub fn shutdown(&self) {
        let _ = self.sender.send(true);
        info!("Shutdown requested");
    }
}

/// Create a linked controller and signal
pub fn shutdown_channel() -> (ShutdownController, ShutdownSignal) {
    let (sender, receiver) = watch::channel(false);
    (ShutdownController { sender }, ShutdownSignal { receiver })
}

/// Shutdown listener: flip readiness, drain, then stop the server
///
/// `signal` resolves with the name of the lifecycle event that ended the
/// process (normally [`wait_for_signal`]).
pub async fn drain_on_signal<F>(
    signal: F,
    readiness: ReadinessState,
    controller: ShutdownController,
    drain: Duration,
) where
    F: Future<Output = &'static str>,
{
    let received = signal.await;
    info!(signal = received, "Initiating graceful shutdown");

    // Mark not ready so the orchestrator stops sending traffic during drain
    if readiness.begin_shutdown() {
        info!("Readiness set to shutting_down");
    }

    if !drain.is_zero() {
        info!(drain = ?drain, "Draining before closing listener");
        tokio::time::sleep(drain).await;
    }

    controller.shutdown();
}

/// Wait for SIGTERM or SIGINT
///
/// Returns the name of the signal that arrived. If a handler cannot be
/// registered, that arm waits on Ctrl+C instead.
#[cfg(unix)]
pub async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| error!(error = %e, "Failed to register SIGTERM handler"))
        .ok();
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| error!(error = %e, "Failed to register SIGINT handler"))
        .ok();

    let received = tokio::select! {
        name = recv_or_fallback(sigterm.as_mut(), "SIGTERM", ctrl_c()) => name,
        name = recv_or_fallback(sigint.as_mut(), "SIGINT", ctrl_c()) => name,
    };
    info!(signal = received, "Received termination signal");
    received
}

/// Wait on a registered signal, or on `fallback` when registration failed
#[cfg(unix)]
pub(super) async fn recv_or_fallback<F>(
    signal: Option<&mut tokio::signal::unix::Signal>,
    name: &'static str,
    fallback: F,
) -> &'static str
where
    F: Future<Output = ()>,
{
    match signal {
        Some(signal) => {
            signal.recv().await;
            name
        }
        None => {
            fallback.await;
            "CTRL_C"
        }
    }
}

/// Wait for Ctrl+C signal (Windows)
#[cfg(not(unix))]
pub async fn wait_for_signal() -> &'static str {
    ctrl_c().await;
    info!("Received Ctrl+C");
    "CTRL_C"
}

/// Resolve on Ctrl+C; never resolves if the handler cannot be installed
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to wait for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
