//! Error types for the client library.

use thiserror::Error;

/// Errors that can occur while bootstrapping the service or registering an app.
///
/// Every variant is fatal to the operation that produced it; the library never
/// retries internally. Consent denial is deliberately absent from this enum —
/// a `403` from the registration endpoint is a successful outcome carrying no
/// token, not an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The per-user state directory could not be resolved or created.
    ///
    /// Typically a missing home directory or a permission problem. There is
    /// nothing the library can do without a writable state directory.
    #[error("State directory unavailable: {0}")]
    Filesystem(String),

    /// The service binary could not be downloaded or written.
    ///
    /// Covers unrecognized platforms, non-success download statuses, and
    /// write failures. No fallback mirror is attempted.
    #[error("Service install failed: {0}")]
    Install(String),

    /// The service setup subprocess could not be spawned or exited non-zero.
    #[error("Service setup failed: {0}")]
    Launch(String),

    /// The service never became reachable after install and launch.
    ///
    /// Terminal state of the bootstrap sequence. Recovery is re-running the
    /// whole bootstrap, not retrying a single step.
    #[error("Failed to start UniToken service")]
    Bootstrap,

    /// The registration endpoint answered with an unexpected status.
    ///
    /// Carries the status and body verbatim so daemon-side problems can be
    /// diagnosed from the client. `403` never produces this variant.
    #[error("Failed to register app: {status} {body}")]
    Registration {
        /// HTTP status code returned by the daemon.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// Network or HTTP transport failure.
    ///
    /// Probe failures during discovery collapse to "service not found" and
    /// never surface here; this variant covers downloads and registration.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A request path could not be joined onto the service base URL.
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
