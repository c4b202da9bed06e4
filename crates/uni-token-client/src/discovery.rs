//! Service discovery: descriptor file lookup and liveness probing.
//!
//! Discovery is a two-stage check. The descriptor file is consulted first so
//! a fresh install (no file at all) never pays for a network round-trip; only
//! when a URL is on record does the locator probe it and verify the
//! [`HealthCheck`] marker. The probe guards against trusting a URL recorded by
//! a since-terminated daemon, or a foreign process that now occupies the port.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use url::Url;

use uni_token_common::{HealthCheck, SERVICE_FILE, ServiceDescriptor};

use crate::bootstrap::ServiceLocator;

/// Timeout for the liveness probe.
///
/// Unlike registration calls, probes are expected to answer immediately; a
/// slow endpoint is treated the same as a dead one.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Production locator: reads `service.json` and probes the recorded URL.
#[derive(Debug, Clone, Default)]
pub struct FileLocator {
    http: reqwest::Client,
}

impl FileLocator {
    /// Creates a locator with a default HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn probe(&self, url: &Url) -> bool {
        let response = match self
            .http
            .get(url.clone())
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!("Service probe failed for {url}: {e}");
                return false;
            }
        };

        match response.json::<HealthCheck>().await {
            Ok(probe) => probe.service_marker,
            Err(e) => {
                debug!("Service probe returned a non-UniToken response: {e}");
                false
            }
        }
    }
}

#[async_trait]
impl ServiceLocator for FileLocator {
    /// Returns the service URL if a live, trusted daemon is on record.
    ///
    /// Every failure mode short of a live confirmed daemon collapses to
    /// `None`: missing descriptor (the expected first-run case), unparseable
    /// descriptor (corrupted or incompatible state), unreachable URL, and a
    /// response without the service marker. None of these are errors; they
    /// all mean "bootstrap has to bring a daemon up".
    async fn detect(&self, state_dir: &Path) -> Option<Url> {
        let path = state_dir.join(SERVICE_FILE);
        debug!("Checking for service descriptor at {}", path.display());

        let contents = tokio::fs::read_to_string(&path).await.ok()?;
        let descriptor: ServiceDescriptor = serde_json::from_str(&contents).ok()?;
        let url = Url::parse(&descriptor.url).ok()?;

        if self.probe(&url).await {
            Some(url)
        } else {
            None
        }
    }
}
