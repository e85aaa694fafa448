//! Fixture loading and mock-server setup shared by the integration tests.
//!
//! ```rust,ignore
//! use common::fixtures::*;
//!
//! let server = MockServer::start().await;
//! let mut client = logged_in_client(&server).await;
//! let beds: serde_json::Value = load_fixture("bed/beds.json");
//! ```
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub use sleepiq::test_utils::{
    TEST_API_PATH, TEST_BED_ID, TEST_INSIGHTS_PATH, TEST_SESSION_KEY, TEST_SLEEPER_ID,
    make_command_ok, make_insights_login_response, make_login_response, make_service_error,
    test_config,
};
pub use sleepiq::{SleepIq, SleepIqError};

/// Insights token handed out by [`mount_insights_login`].
pub const TEST_TOKEN: &str = "test-insights-token";

/// Cookie set by [`mount_login`].
pub const LOGIN_COOKIE: &str = "JSESSIONID=login-cookie; Path=/; HttpOnly";

// =============================================================================
// Fixture Loading
// =============================================================================

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Load and deserialize a JSON file under `tests/fixtures/`.
///
/// # Panics
///
/// Panics if the file cannot be read or parsed.
pub fn load_fixture<T: DeserializeOwned>(path: &str) -> T {
    let full_path = fixtures_dir().join(path);
    let content = fs::read_to_string(&full_path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {e}", full_path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {e}", full_path.display()))
}

pub fn load_fixture_json(path: &str) -> Value {
    load_fixture(path)
}

// =============================================================================
// Paths
// =============================================================================

/// Full mock-server path of a bed API resource, e.g. `api_path("bed")`.
pub fn api_path(resource: &str) -> String {
    format!("{TEST_API_PATH}/{resource}")
}

/// Full mock-server path of a bed resource, e.g. `bed_path("foundation/status")`.
pub fn bed_path(resource: &str) -> String {
    format!("{TEST_API_PATH}/bed/{TEST_BED_ID}/{resource}")
}

pub fn insights_path(resource: &str) -> String {
    format!("{TEST_INSIGHTS_PATH}/{resource}")
}

// =============================================================================
// Clients
// =============================================================================

/// A fresh, logged-out client pointed at `server`.
pub fn client_for(server: &MockServer) -> SleepIq {
    SleepIq::with_config(test_config(&server.uri())).expect("test config is valid")
}

/// Mount a successful bed API login returning [`TEST_SESSION_KEY`] and
/// [`LOGIN_COOKIE`].
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("PUT"))
        .and(path(api_path("login")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(make_login_response("U1", TEST_SESSION_KEY))
                .insert_header("set-cookie", LOGIN_COOKIE),
        )
        .mount(server)
        .await;
}

/// Mount a successful Insights login returning [`TEST_TOKEN`].
pub async fn mount_insights_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(insights_path("accesstoken")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(make_insights_login_response(TEST_TOKEN)),
        )
        .mount(server)
        .await;
}

/// A client already logged in to the bed API.
pub async fn logged_in_client(server: &MockServer) -> SleepIq {
    mount_login(server).await;
    let mut client = client_for(server);
    client
        .login("user@example.com", "secret")
        .await
        .expect("login succeeds");
    client
}

/// A client already logged in to Insights only.
pub async fn insights_client(server: &MockServer) -> SleepIq {
    mount_insights_login(server).await;
    let mut client = client_for(server);
    client
        .insights_login("user@example.com", "secret")
        .await
        .expect("insights login succeeds");
    client
}

// =============================================================================
// Mocks
// =============================================================================

/// Mount a GET on a bed API path that must carry the session key.
pub async fn mount_primary_get(server: &MockServer, full_path: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(full_path))
        .and(query_param("_k", TEST_SESSION_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Mount a GET on an Insights path that must carry the access token.
pub async fn mount_insights_get(server: &MockServer, full_path: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(full_path))
        .and(query_param("access_token", TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Mount a PUT on a bed API path that accepts the command.
pub async fn mount_command(server: &MockServer, full_path: &str) {
    Mock::given(method("PUT"))
        .and(path(full_path))
        .and(query_param("_k", TEST_SESSION_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(make_command_ok()))
        .expect(1)
        .mount(server)
        .await;
}

/// Number of requests the server received for `full_path`.
pub async fn request_count(server: &MockServer, full_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == full_path)
        .count()
}
