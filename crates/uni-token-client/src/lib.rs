//! # uni-token-client
//!
//! Client SDK for the UniToken service: obtain a short-lived, scoped
//! credential for an OpenAI-compatible provider without your application ever
//! holding a long-lived secret.
//!
//! Secret custody, the consent UI, and token issuance live in a local daemon.
//! This crate makes sure that daemon is present and running (downloading and
//! setting it up on first use), then runs a registration exchange that trades
//! an application identity for a provider base URL plus an opaque API key —
//! or an explicit "permission denied" outcome, which is a valid result, not
//! an error.
//!
//! ## Example
//!
//! ```no_run
//! use secrecy::ExposeSecret;
//! use uni_token_client::request_openai_token;
//!
//! # async fn example() -> uni_token_client::Result<()> {
//! let access = request_openai_token(
//!     "Example App",
//!     "An example application.",
//!     None, // or the token persisted from a previous run
//! )
//! .await?;
//!
//! match &access.api_key {
//!     Some(key) => {
//!         // Point any OpenAI-compatible SDK at the gateway.
//!         println!("base url: {}", access.base_url);
//!         let _ = key.expose_secret();
//!     }
//!     None => println!("User rejected the request"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Bootstrap
//!
//! [`request_openai_token`] bootstraps transparently: probe the descriptor in
//! the per-user state directory, and if no live service answers, download the
//! platform binary and run its interactive `sudo setup`. Lower-level pieces
//! ([`BrokerClient`], [`Bootstrapper`], the component traits) are public so
//! embedders can inject their own locator/installer/launcher or drive the
//! registration exchange directly.

/// Bootstrap orchestration and component traits.
pub mod bootstrap;
/// HTTP broker client for the local service.
pub mod broker;
/// Descriptor lookup and liveness probing.
pub mod discovery;
/// Error types for the client library.
pub mod error;
/// Service binary installation.
pub mod install;
/// The elevated first-run setup launcher.
pub mod launch;
/// Per-user state directory resolution.
pub mod paths;
/// The application registration exchange.
pub mod register;

pub use bootstrap::{Bootstrapper, ServiceInstaller, ServiceLauncher, ServiceLocator};
pub use broker::BrokerClient;
pub use error::{Error, Result};
pub use register::ProviderAccess;

/// Requests an OpenAI-compatible credential from the UniToken service.
///
/// Bootstraps the service if needed (state directory, descriptor probe,
/// download, elevated setup), then registers the application. `saved_api_key`
/// is the token persisted from a previous run, if any; passing it back keeps
/// the registration idempotent for the same logical application.
///
/// The returned [`ProviderAccess::base_url`] always ends in `openai/`,
/// whether or not consent was granted, so the caller can retry registration
/// later against the same gateway.
///
/// # Errors
///
/// Propagates every fatal bootstrap and protocol failure: [`Error::Filesystem`],
/// [`Error::Install`], [`Error::Launch`], [`Error::Bootstrap`], and
/// [`Error::Registration`]. Consent denial is not an error; it comes back as
/// `api_key: None`.
pub async fn request_openai_token(
    app_name: &str,
    description: &str,
    saved_api_key: Option<&str>,
) -> Result<ProviderAccess> {
    let client = BrokerClient::connect().await?;
    client.register(app_name, description, saved_api_key).await
}
