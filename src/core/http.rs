//! HTTP transport.
//!
//! Thin wrappers over a shared `reqwest` client that attach headers and
//! cookies, send GET/PUT/POST requests with a fixed timeout, and hand back
//! the raw body together with any cookies the server set. Status codes are
//! returned to the caller untouched: the vendor reports failures inside the
//! JSON body, not through the status line.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue, SET_COOKIE};
use reqwest::{Client, ClientBuilder, Method, StatusCode, Url};

use crate::core::session::Cookie;
use crate::error::{Result, SleepIqError};

/// Default timeout for HTTP requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// `Accept` value for the bed API.
pub const ACCEPT_JSON: &str = "application/json";

/// `Accept` value the Insights API expects.
pub const INSIGHTS_ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";

/// Header carrying the Insights subscription key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Raw response from one round trip.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    /// Cookies from `Set-Cookie` headers, in header order.
    pub cookies: Vec<Cookie>,
}

/// Build a configured HTTP client.
///
/// # Errors
///
/// Returns error if client construction fails.
pub fn build_client(timeout: Duration, user_agent: Option<&str>) -> Result<Client> {
    let agent = user_agent.map_or_else(
        || format!("sleepiq/{}", env!("CARGO_PKG_VERSION")),
        ToString::to_string,
    );
    ClientBuilder::new()
        .timeout(timeout)
        .user_agent(agent)
        .build()
        .map_err(|e| SleepIqError::Config(format!("could not build HTTP client: {e}")))
}

/// Headers sent with every bed API read.
#[must_use]
pub fn primary_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
    headers
}

/// Headers sent with every Insights call, including login.
///
/// # Errors
///
/// Returns a configuration error if the subscription key is not a valid
/// header value.
pub fn insights_headers(subscription_key: &str) -> Result<HeaderMap> {
    let key = HeaderValue::from_str(subscription_key)
        .map_err(|_| SleepIqError::Config("subscription key is not a valid header value".into()))?;
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(INSIGHTS_ACCEPT));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(ACCEPT_JSON));
    headers.insert(HeaderName::from_static("ocp-apim-subscription-key"), key);
    Ok(headers)
}

/// Shared transport used by one client instance.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying client cannot be built.
    pub fn new(timeout: Duration, user_agent: Option<&str>) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout, user_agent)?,
        })
    }

    /// GET `url` with `headers` and `cookies`.
    pub async fn get(
        &self,
        url: Url,
        headers: HeaderMap,
        cookies: &[Cookie],
    ) -> reqwest::Result<HttpResponse> {
        self.send(Method::GET, url, headers, cookies, None).await
    }

    /// PUT a JSON `payload` to `url` with `cookies`.
    pub async fn put(
        &self,
        url: Url,
        payload: Vec<u8>,
        cookies: &[Cookie],
    ) -> reqwest::Result<HttpResponse> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(ACCEPT_JSON));
        self.send(Method::PUT, url, headers, cookies, Some(payload))
            .await
    }

    /// POST a JSON `payload` to `url` with `headers`.
    pub async fn post(
        &self,
        url: Url,
        payload: Vec<u8>,
        headers: HeaderMap,
    ) -> reqwest::Result<HttpResponse> {
        self.send(Method::POST, url, headers, &[], Some(payload))
            .await
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        cookies: &[Cookie],
        payload: Option<Vec<u8>>,
    ) -> reqwest::Result<HttpResponse> {
        tracing::debug!(%method, path = url.path(), "sending request");

        let mut request = self.client.request(method, url).headers(headers);
        if let Some(cookie_header) = Cookie::header_value(cookies) {
            request = request.header(COOKIE, cookie_header);
        }
        if let Some(payload) = payload {
            request = request.body(payload);
        }

        // Request URLs carry the session key or token; keep them out of errors.
        let response = request.send().await.map_err(reqwest::Error::without_url)?;
        let status = response.status();
        let cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(Cookie::parse)
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(reqwest::Error::without_url)?
            .to_vec();

        tracing::debug!(%status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            body,
            cookies,
        })
    }
}
