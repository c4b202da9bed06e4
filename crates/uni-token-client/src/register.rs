//! Application registration: the consent exchange.
//!
//! Registration is a single `POST app/register` per call. The daemon shows
//! the user a consent prompt (unless the app is already granted) and answers
//! `200` with a token, or `403` when consent is withheld. Denial is a
//! first-class outcome of the protocol, not an error: the caller still gets
//! the provider base URL and may re-run registration later.

use secrecy::SecretString;

use uni_token_common::{RegisterRequest, RegisterResponse};

use crate::broker::BrokerClient;
use crate::error::{Error, Result};

/// Path of the provider gateway under the service base URL.
const OPENAI_GATEWAY: &str = "openai/";

/// Path of the registration endpoint under the service base URL.
const REGISTER_PATH: &str = "app/register";

/// Result of a registration exchange.
///
/// `base_url` is always populated, whatever the consent outcome, so a caller
/// can hold onto it and retry registration later against the same gateway.
#[derive(Debug, Clone)]
pub struct ProviderAccess {
    /// OpenAI-compatible gateway URL, always ending in `openai/`.
    pub base_url: String,
    /// Granted credential, or `None` when consent was withheld (or the
    /// daemon answered success without a token).
    ///
    /// The token doubles as the app's identity: persist it and pass it back
    /// as `saved_token` on the next run so the daemon recognizes the app
    /// instead of opening a duplicate consent record.
    pub api_key: Option<SecretString>,
}

impl BrokerClient {
    /// Registers an application and requests a provider credential.
    ///
    /// `saved_token` is the credential from a previous successful call, if
    /// the caller persisted one. Passing it back makes the call idempotent
    /// per logical app identity: the daemon returns the same (or an
    /// equivalent refreshed) token rather than registering a duplicate.
    ///
    /// The request runs without a timeout; the daemon may be waiting on the
    /// user to answer a consent prompt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Registration`] for any response that is neither
    /// success nor `403`, carrying the status and body verbatim. Transport
    /// failures surface as [`Error::Network`]. A `403` is not an error.
    pub async fn register(
        &self,
        app_name: &str,
        description: &str,
        saved_token: Option<&str>,
    ) -> Result<ProviderAccess> {
        let base_url = format!("{}{OPENAI_GATEWAY}", self.server_url());

        let request =
            RegisterRequest::new(app_name, description).with_uid(saved_token.map(str::to_string));
        let response = self.post_json(REGISTER_PATH, &request).await?;

        let status = response.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            return Ok(ProviderAccess {
                base_url,
                api_key: None,
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Registration {
                status: status.as_u16(),
                body,
            });
        }

        let granted: RegisterResponse = response.json().await?;
        Ok(ProviderAccess {
            base_url,
            api_key: granted.token.map(SecretString::from),
        })
    }
}
