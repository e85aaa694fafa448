//! The SleepIQ client.
//!
//! [`SleepIq`] owns the configuration, the HTTP transport and both sessions.
//! Operations are grouped by resource:
//!
//! - [`auth`]: primary and Insights login
//! - [`bed`]: bed, foundation and lighting status readers
//! - [`sleeper`]: sleeper profiles and sleep data readers
//! - [`insights`]: Insights analytics readers
//! - [`control`]: foot warmer, position, lighting, air and sleep number commands
//!
//! Every response type embeds a [`ServiceError`]; the shared helpers here do
//! the GET/PUT, decode and error check so each operation only names its
//! endpoint and response type.

pub mod auth;
pub mod bed;
pub mod control;
pub mod insights;
pub mod sleeper;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::endpoint::Endpoint;
use crate::core::http::{HttpResponse, HttpTransport, insights_headers, primary_headers};
use crate::core::session::Session;
use crate::error::{Result, SleepIqError};
use crate::storage::ClientConfig;

/// Error object embedded in every vendor response.
///
/// `code == 0` means success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    #[serde(rename = "Code", default)]
    pub code: i64,
    #[serde(rename = "Message", default)]
    pub message: String,
}

impl ServiceError {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.code > 0
    }
}

/// A decoded vendor payload carrying an embedded [`ServiceError`].
pub trait ApiResponse: DeserializeOwned {
    fn service_error(&self) -> &ServiceError;
}

macro_rules! api_response {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::api::ApiResponse for $ty {
                fn service_error(&self) -> &$crate::api::ServiceError {
                    &self.error
                }
            }
        )+
    };
}
pub(crate) use api_response;

/// Generic `{ "Error": {...} }` envelope returned by control commands.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ControlResponse {
    #[serde(rename = "Error", default)]
    pub error: ServiceError,
}

api_response!(ControlResponse);

/// Client for the SleepIQ bed and Insights APIs.
///
/// One instance holds one pair of sessions. Use independent instances for
/// independent accounts.
#[derive(Debug)]
pub struct SleepIq {
    config: ClientConfig,
    api_base: Url,
    insights_base: Url,
    transport: HttpTransport,
    session: Session,
}

impl SleepIq {
    /// Create a client against the production endpoints.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client using configuration from file and environment.
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::load()?)
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration does not validate.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout(), config.user_agent.as_deref())?;
        Ok(Self {
            api_base: config.api_base_url()?,
            insights_base: config.insights_base_url()?,
            transport,
            session: Session::default(),
            config,
        })
    }

    /// Configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current session state.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Whether the bed API session is logged in.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.primary().is_logged_in()
    }

    /// Whether the Insights session is logged in.
    #[must_use]
    pub fn is_insights_logged_in(&self) -> bool {
        self.session.insights().is_logged_in()
    }

    // =========================================================================
    // Shared request helpers
    // =========================================================================

    /// GET a bed API endpoint and decode it into `T`.
    pub(crate) async fn get_primary<T: ApiResponse>(
        &self,
        endpoint: Endpoint,
        operation: &'static str,
    ) -> Result<T> {
        let primary = self.session.require_primary()?;
        let url = endpoint
            .clone()
            .query("_k", primary.session_key())
            .to_url(&self.api_base);

        tracing::debug!(operation, path = %endpoint.display_path(), "fetching");
        let response = self
            .transport
            .get(url, primary_headers(), primary.cookies())
            .await
            .map_err(|source| SleepIqError::Transport { operation, source })?;

        decode_checked(&response, operation)
    }

    /// GET an Insights endpoint and decode it into `T`.
    pub(crate) async fn get_insights<T: ApiResponse>(
        &self,
        endpoint: Endpoint,
        operation: &'static str,
    ) -> Result<T> {
        let insights = self.session.require_insights()?;
        let url = endpoint
            .clone()
            .query("access_token", insights.token())
            .to_url(&self.insights_base);

        tracing::debug!(operation, path = %endpoint.display_path(), "fetching insights");
        let response = self
            .transport
            .get(url, insights_headers(&self.config.subscription_key)?, &[])
            .await
            .map_err(|source| SleepIqError::Transport { operation, source })?;

        decode_checked(&response, operation)
    }

    /// PUT a command to a bed API endpoint and check the returned envelope.
    ///
    /// Cookies set by the response replace the held cookies.
    pub(crate) async fn put_command<B: Serialize>(
        &mut self,
        endpoint: Endpoint,
        body: Option<&B>,
        operation: &'static str,
    ) -> Result<()> {
        let payload = match body {
            Some(body) => serde_json::to_vec(body)
                .map_err(|source| SleepIqError::Decode { operation, source })?,
            None => Vec::new(),
        };

        let primary = self.session.require_primary()?;
        let url = endpoint
            .clone()
            .query("_k", primary.session_key())
            .to_url(&self.api_base);

        tracing::debug!(operation, path = %endpoint.display_path(), "sending command");
        let response = self
            .transport
            .put(url, payload, primary.cookies())
            .await
            .map_err(|source| SleepIqError::Transport { operation, source })?;

        let _: ControlResponse = decode_checked(&response, operation)?;
        self.session.primary.replace_cookies(response.cookies);
        Ok(())
    }
}

/// Decode a response body and surface its embedded service error.
pub(crate) fn decode_checked<T: ApiResponse>(
    response: &HttpResponse,
    operation: &'static str,
) -> Result<T> {
    let decoded: T = decode_body(&response.body).map_err(|source| {
        tracing::debug!(operation, status = %response.status, "response body did not decode");
        SleepIqError::Decode { operation, source }
    })?;

    let error = decoded.service_error();
    if error.is_error() {
        tracing::warn!(operation, code = error.code, detail = %error.message, "service returned an error");
        return Err(SleepIqError::Service {
            operation,
            code: error.code,
            message: error.message.clone(),
        });
    }

    Ok(decoded)
}

/// Parse a vendor body, treating `null` object members as absent.
///
/// The vendor sends `null` for fields it has no value for, including the
/// `Error` object itself. Dropping those members lets every field fall back
/// to its `#[serde(default)]` value instead of failing the whole decode.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> serde_json::Result<T> {
    let mut value: Value = serde_json::from_slice(body)?;
    drop_null_members(&mut value);
    serde_json::from_value(value)
}

fn drop_null_members(value: &mut Value) {
    match value {
        Value::Object(members) => {
            members.retain(|_, member| !member.is_null());
            members.values_mut().for_each(drop_null_members);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_null_members),
        _ => {}
    }
}

/// Reject empty identifiers before any request is built.
pub(crate) fn require_id<'a>(name: &'static str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        Err(SleepIqError::invalid(name, "must not be empty"))
    } else {
        Ok(value)
    }
}
