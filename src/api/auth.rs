//! Login for the bed API and the Insights API.
//!
//! Each login clears its session before sending anything and only marks the
//! session logged in after the response decodes with a zero error code.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::{ServiceError, SleepIq, api_response, decode_checked};
use crate::core::endpoint::Endpoint;
use crate::core::http::{HttpTransport, insights_headers};
use crate::core::session::{Cookie, LoginAttempt};
use crate::error::{Result, SleepIqError};

/// Response to a bed API login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginResponse {
    pub user_id: String,
    pub key: String,
    pub registration_state: i64,
    pub edp_login_status: i64,
    pub edp_login_message: String,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

/// Response to an Insights login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsightsLoginResponse {
    pub token: String,
    pub sleeper_id: String,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

api_response!(LoginResponse, InsightsLoginResponse);

#[derive(Serialize)]
struct LoginCredentials<'a> {
    login: &'a str,
    password: &'a str,
}

impl SleepIq {
    /// Authenticate against the bed API.
    ///
    /// On success the session key and the cookies from the response are
    /// stored and the primary session is logged in. On any failure, or if
    /// the returned future is dropped before it finishes, the session ends
    /// logged out.
    ///
    /// # Errors
    ///
    /// Returns a transport, decode or service error.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<LoginResponse> {
        const OPERATION: &str = "login";

        let mut attempt = LoginAttempt::begin(&mut self.session.primary);
        let url = Endpoint::path("login").to_url(&self.api_base);
        let result = send_login(
            &self.transport,
            url,
            attempt.session().cookies(),
            username,
            password,
            OPERATION,
        )
        .await;

        match result {
            Ok(response) => {
                attempt
                    .session_mut()
                    .complete_login(response.body.key.clone(), response.cookies);
                tracing::info!(user_id = %response.body.user_id, "logged in to SleepIQ");
                Ok(response.body)
            }
            Err(err) => {
                attempt.session_mut().fail_login();
                tracing::debug!(error = %err, "SleepIQ login failed");
                Err(err)
            }
        }
    }

    /// Authenticate against the Insights API.
    ///
    /// Independent of [`SleepIq::login`]: neither login affects the other
    /// session.
    ///
    /// # Errors
    ///
    /// Returns a transport, decode or service error.
    pub async fn insights_login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<InsightsLoginResponse> {
        const OPERATION: &str = "Insights login";

        let mut attempt = LoginAttempt::begin(&mut self.session.insights);
        let url = Endpoint::path("accesstoken").to_url(&self.insights_base);
        let result = send_insights_login(
            &self.transport,
            url,
            &self.config.subscription_key,
            username,
            password,
            OPERATION,
        )
        .await;

        match result {
            Ok(response) => {
                attempt
                    .session_mut()
                    .complete_login(response.token.clone());
                tracing::info!(sleeper_id = %response.sleeper_id, "logged in to Insights");
                Ok(response)
            }
            Err(err) => {
                attempt.session_mut().fail_login();
                tracing::debug!(error = %err, "Insights login failed");
                Err(err)
            }
        }
    }
}

struct DecodedLogin {
    body: LoginResponse,
    cookies: Vec<Cookie>,
}

fn credentials_payload(
    username: &str,
    password: &str,
    operation: &'static str,
) -> Result<Vec<u8>> {
    serde_json::to_vec(&LoginCredentials {
        login: username,
        password,
    })
    .map_err(|source| SleepIqError::Decode { operation, source })
}

async fn send_login(
    transport: &HttpTransport,
    url: Url,
    cookies: &[Cookie],
    username: &str,
    password: &str,
    operation: &'static str,
) -> Result<DecodedLogin> {
    let payload = credentials_payload(username, password, operation)?;
    let response = transport
        .put(url, payload, cookies)
        .await
        .map_err(|source| SleepIqError::Transport { operation, source })?;

    let body: LoginResponse = decode_checked(&response, operation)?;
    Ok(DecodedLogin {
        body,
        cookies: response.cookies,
    })
}

async fn send_insights_login(
    transport: &HttpTransport,
    url: Url,
    subscription_key: &str,
    username: &str,
    password: &str,
    operation: &'static str,
) -> Result<InsightsLoginResponse> {
    let payload = credentials_payload(username, password, operation)?;
    let response = transport
        .post(url, payload, insights_headers(subscription_key)?)
        .await
        .map_err(|source| SleepIqError::Transport { operation, source })?;

    decode_checked(&response, operation)
}
