//! Service discovery and liveness-probe types.
//!
//! The daemon publishes a [`ServiceDescriptor`] to `service.json` inside the
//! per-user state directory when it starts. Clients read the descriptor to
//! find the endpoint, then probe it and check the [`HealthCheck`] marker to
//! make sure the URL is not a stale record left by a terminated daemon or a
//! foreign process that happens to occupy the same port.

use serde::{Deserialize, Serialize};

/// Name of the descriptor file inside the state directory.
pub const SERVICE_FILE: &str = "service.json";

/// Endpoint record published by a running daemon.
///
/// Written only by the daemon; clients treat the file as read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Base URL of the daemon's local HTTP API, e.g. `http://127.0.0.1:18760/`.
    pub url: String,
}

/// Liveness-probe response, version 1 of the probe contract.
///
/// A bare `GET` on the service base URL returns a JSON object carrying the
/// `__uni_token` marker. The marker distinguishes a live UniToken daemon from
/// anything else answering on the recorded URL. Unknown fields are ignored so
/// future daemon versions can extend the response without breaking v1 clients.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthCheck {
    /// Marker field identifying the responder as a UniToken service.
    #[serde(rename = "__uni_token", default)]
    pub service_marker: bool,
}
