//! Helpers for tests that talk to a real listening server

use super::*;
use crate::clock::SystemClock;
use crate::error::ServerError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A server bound to an ephemeral loopback port
pub struct TestServer {
    pub addr: SocketAddr,
    pub readiness: ReadinessState,
    pub controller: ShutdownController,
    pub handle: JoinHandle<Result<(), ServerError>>,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Start a server using the system clock
    pub async fn start() -> Self {
        Self::start_with(ReadinessState::new(), Arc::new(SystemClock)).await
    }

    /// Start a server with explicit readiness and clock
    pub async fn start_with(
        readiness: ReadinessState,
        clock: Arc<dyn crate::clock::Clock>,
    ) -> Self {
        let listener = bind_listener(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no local address");

        let (controller, signal) = shutdown_channel();
        let state = ServerState::new(readiness.clone(), clock);
        let handle = tokio::spawn(run_server(listener, state, signal));

        Self {
            addr,
            readiness,
            controller,
            handle,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// GET `path` and decode the JSON body
    pub async fn get_json(&self, path: &str) -> (u16, serde_json::Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to connect to test server");
        let status = response.status().as_u16();
        let body = response.json().await.expect("Response body is not JSON");
        (status, body)
    }

    /// Trigger shutdown and wait for the server task to finish
    pub async fn stop(self) {
        self.controller.shutdown();
        let result = tokio::time::timeout(std::time::Duration::from_secs(5), self.handle)
            .await
            .expect("Server did not stop in time")
            .expect("Server task panicked");
        assert!(result.is_ok(), "Server returned error: {:?}", result);
    }
}
