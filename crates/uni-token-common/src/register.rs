//! Application registration request/response types.
//!
//! Registration is a single `POST app/register` exchange. The `uid` field
//! carries the token from a previous successful registration so the daemon can
//! recognize a returning application instead of creating a duplicate consent
//! record; it is serialized as `null` on first contact.

use serde::{Deserialize, Serialize};

/// Body of a `POST app/register` call.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Human-readable application name shown in the consent prompt.
    pub name: String,
    /// What the application does, shown alongside the name.
    pub description: String,
    /// Token from a previous successful registration, if any.
    ///
    /// Always present on the wire (`null` when absent) so the daemon can
    /// distinguish "first contact" from a malformed request.
    pub uid: Option<String>,
}

impl RegisterRequest {
    /// Creates a first-contact request with no prior credential.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            uid: None,
        }
    }

    /// Attaches the token from a previous registration.
    #[must_use]
    pub fn with_uid(mut self, uid: Option<String>) -> Self {
        self.uid = uid;
        self
    }
}

/// Body of a successful (`200`) registration response.
///
/// A `403` response means consent was withheld and carries no token; that case
/// never reaches this type. A `200` without a `token` field deserializes to
/// `token: None` rather than failing.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    /// Opaque credential granted to the application.
    #[serde(default)]
    pub token: Option<String>,
}
