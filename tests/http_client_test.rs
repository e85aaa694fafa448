//! Integration tests for the HTTP transport against a mock server.
//!
//! Covers header and cookie handling, status passthrough, timeouts, and
//! that transport failures never expose session secrets.

mod common;

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::json;
use wiremock::matchers::{body_bytes, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sleepiq::ErrorCategory;
use sleepiq::core::Cookie;
use sleepiq::core::http::{HttpTransport, build_client};

use common::fixtures::*;
use common::logger::TestLogger;

fn url(server: &MockServer, p: &str) -> reqwest::Url {
    reqwest::Url::parse(&format!("{}{p}", server.uri())).unwrap()
}

#[tokio::test]
async fn get_sends_headers_cookies_and_user_agent() {
    let log = TestLogger::new("get_sends_headers_cookies_and_user_agent");
    log.phase("setup");
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/bed"))
        .and(header("accept", "application/json"))
        .and(header("cookie", "a=1; b=2"))
        .and(header("user-agent", "custom-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"beds": []})))
        .expect(1)
        .mount(&server)
        .await;

    log.phase("execute");
    let transport = HttpTransport::new(Duration::from_secs(5), Some("custom-agent")).unwrap();
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    let cookies = vec![
        Cookie::parse("a=1; Path=/").unwrap(),
        Cookie::parse("b=2").unwrap(),
    ];
    let response = transport
        .get(url(&server, "/rest/bed"), headers, &cookies)
        .await;
    log.outcome(&response.as_ref().map(|r| r.status));

    log.phase("verify");
    let response = response.unwrap();
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, br#"{"beds":[]}"#);
    log.finish_ok();
}

#[tokio::test]
async fn default_user_agent_names_the_crate() {
    let server = MockServer::start().await;
    let expected = format!("sleepiq/{}", env!("CARGO_PKG_VERSION"));
    Mock::given(method("GET"))
        .and(header("user-agent", expected.as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(Duration::from_secs(5), None).unwrap();
    let response = client.get(server.uri()).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn put_sends_json_payload_and_collects_cookies() {
    let log = TestLogger::new("put_sends_json_payload_and_collects_cookies");
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/rest/bed/B1/responsiveAir"))
        .and(header("content-type", "application/json"))
        .and(body_bytes(br#"{"leftSideEnabled":true}"#.to_vec()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .append_header("set-cookie", "JSESSIONID=new; Path=/")
                .append_header("set-cookie", "AWSALB=lb==; Expires=Wed"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(Duration::from_secs(5), None).unwrap();
    let response = transport
        .put(
            url(&server, "/rest/bed/B1/responsiveAir"),
            br#"{"leftSideEnabled":true}"#.to_vec(),
            &[],
        )
        .await
        .unwrap();

    let names: Vec<&str> = response.cookies.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["JSESSIONID", "AWSALB"]);
    assert_eq!(response.cookies[1].value, "lb==");
    log.finish_ok();
}

#[tokio::test]
async fn error_status_is_returned_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(Duration::from_secs(5), None).unwrap();
    let response = transport
        .get(url(&server, "/rest/bed"), HeaderMap::new(), &[])
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body, b"maintenance");
}

#[tokio::test]
async fn slow_response_times_out() {
    let log = TestLogger::new("slow_response_times_out");
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let transport = HttpTransport::new(Duration::from_millis(200), None).unwrap();
    let result = transport
        .get(url(&server, "/rest/bed"), HeaderMap::new(), &[])
        .await;
    log.outcome(&result.as_ref().map(|r| r.status));
    assert!(result.unwrap_err().is_timeout());
    log.finish_ok();
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let log = TestLogger::new("unreachable_server_is_transport_error");
    let mut config = test_config("http://127.0.0.1:1");
    config.timeout_seconds = 2;
    let mut client = SleepIq::with_config(config).unwrap();

    let result = client.login("user@example.com", "hunter2").await;
    log.outcome(&result);
    let err = result.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Transport);
    assert_eq!(err.error_code(), "SIQ-N001");
    assert!(!err.is_local());
    assert!(!err.to_string().contains("hunter2"));
    assert!(!client.is_logged_in());
    log.finish_ok();
}

#[tokio::test]
async fn transport_error_does_not_expose_session_key() {
    let log = TestLogger::new("transport_error_does_not_expose_session_key");
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;
    Mock::given(method("GET"))
        .and(path(api_path("bed")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"beds": []}))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let result = client.beds().await;
    log.outcome(&result);
    let err = result.unwrap_err();
    assert!(matches!(err, SleepIqError::Transport { .. }));
    let rendered = format!("{err} / {err:?}");
    assert!(!rendered.contains(TEST_SESSION_KEY), "leaked: {rendered}");
    log.finish_ok();
}
