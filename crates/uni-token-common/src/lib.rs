//! # uni-token-common
//!
//! Wire types shared between the UniToken service and its clients.
//!
//! The UniToken service is a local daemon that holds provider credentials on
//! the user's behalf and brokers scoped API tokens to applications after an
//! interactive consent step. This crate defines the small JSON contracts that
//! cross the client/service boundary:
//!
//! - [`ServiceDescriptor`]: the `service.json` record the daemon publishes so
//!   clients can find its HTTP endpoint
//! - [`HealthCheck`]: the liveness-probe response that proves the endpoint is
//!   actually a UniToken service
//! - [`RegisterRequest`] / [`RegisterResponse`]: the application registration
//!   exchange
//!
//! ## Example
//!
//! ```
//! use uni_token_common::{RegisterRequest, RegisterResponse};
//!
//! let request = RegisterRequest::new("Example App", "An example application.")
//!     .with_uid(Some("previously-saved-token".to_string()));
//!
//! let response: RegisterResponse =
//!     serde_json::from_str(r#"{"token": "abc123"}"#).unwrap();
//! assert_eq!(response.token.as_deref(), Some("abc123"));
//! ```

/// Application registration request/response types.
pub mod register;
/// Service discovery and liveness-probe types.
pub mod service;

pub use register::{RegisterRequest, RegisterResponse};
pub use service::{HealthCheck, SERVICE_FILE, ServiceDescriptor};
