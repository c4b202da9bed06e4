//! HTTP broker client for the local service.
//!
//! A [`BrokerClient`] owns the resolved service base URL for the lifetime of
//! the session; the URL is immutable after construction and never persisted.
//! The client exposes thin request primitives with no retries and no default
//! timeout: the registration exchange may legitimately wait on a human
//! answering a consent prompt, so bounding it here would turn "user is
//! thinking" into a spurious failure. Callers who want a bound wrap the
//! future externally.

use serde::Serialize;
use url::Url;

use crate::bootstrap::Bootstrapper;
use crate::error::Result;
use crate::paths;

/// Session handle for the local service's HTTP API.
#[derive(Debug, Clone)]
pub struct BrokerClient {
    server_url: Url,
    http: reqwest::Client,
}

impl BrokerClient {
    /// Bootstraps the service with the production components and connects.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::Error::Filesystem`] from state-directory
    /// resolution and any bootstrap failure
    /// ([`crate::Error::Install`], [`crate::Error::Launch`],
    /// [`crate::Error::Bootstrap`]).
    pub async fn connect() -> Result<Self> {
        Self::connect_with(&Bootstrapper::new()).await
    }

    /// Connects using an injected bootstrapper.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`BrokerClient::connect`].
    pub async fn connect_with(bootstrapper: &Bootstrapper) -> Result<Self> {
        let state_dir = paths::state_dir()?;
        let server_url = bootstrapper.ensure_service(&state_dir).await?;
        Ok(Self::from_url(server_url))
    }

    /// Wraps an already-resolved service URL without bootstrapping.
    #[must_use]
    pub fn from_url(server_url: Url) -> Self {
        Self {
            server_url,
            http: reqwest::Client::new(),
        }
    }

    /// The resolved service base URL.
    #[must_use]
    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    /// Sends a `GET` to `path` relative to the service base URL.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Url`] for an unjoinable path and
    /// [`crate::Error::Network`] for transport failures.
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = self.server_url.join(path)?;
        Ok(self.http.get(url).send().await?)
    }

    /// Sends a JSON `POST` to `path` relative to the service base URL.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Url`] for an unjoinable path and
    /// [`crate::Error::Network`] for transport failures.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        let url = self.server_url.join(path)?;
        Ok(self.http.post(url).json(body).send().await?)
    }
}
