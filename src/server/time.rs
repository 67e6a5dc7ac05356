//! Current time endpoint
//!
//! `GET /` reports the UTC time and the caller's address. Behind a load
//! balancer the caller is taken from `X-Forwarded-For`, which is trusted
//! verbatim: nothing stops a client from forging it unless the edge proxy
//! overwrites the header.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use std::net::SocketAddr;
use tracing::debug;

use super::health::ServerState;

/// Header set by proxies carrying the original client address chain
const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Time/IP payload
#[derive(Debug, Serialize)]
pub struct TimeResponse {
    pub timestamp: String,
    pub ip: String,
}

/// First entry of `X-Forwarded-For`, trimmed
///
/// Returns `None` when the header is missing or empty. Bytes outside ASCII
/// are decoded as latin-1 rather than rejected.
fn forwarded_client(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(X_FORWARDED_FOR)?.as_bytes();
    if raw.is_empty() {
        return None;
    }

    let value: String = raw.iter().map(|&b| char::from(b)).collect();
    value.split(',').next().map(|first| first.trim().to_string())
}

/// Resolve the client IP for a request
///
/// Prefers the proxy-supplied header, then the transport peer address.
/// Empty when neither is available.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    forwarded_client(headers)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_default()
}

/// Current time handler
pub(super) async fn current_time(
    State(state): State<ServerState>,
    request: Request,
) -> Json<TimeResponse> {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = client_ip(request.headers(), peer);

    debug!(ip = %ip, peer = ?peer, "Serving current time");

    Json(TimeResponse {
        timestamp: state.clock.timestamp(),
        ip,
    })
}
