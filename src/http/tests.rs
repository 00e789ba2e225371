//! Tests for the HTTP module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::types::BackoffType;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> HttpClientConfig {
    HttpClientConfig::default()
        .with_base_url(server.uri())
        .with_rate_limit(None)
        .with_backoff(
            BackoffType::Constant,
            Duration::from_millis(1),
            Duration::from_millis(1),
        )
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.max_retries, 5);
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("tap-everflow/"));
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("page", "1")
        .query("page_size", "2000")
        .header("X-Request-Id", "abc123")
        .json(json!({"key": "value"}))
        .retries(2);

    assert_eq!(
        config.query,
        vec![
            ("page".to_string(), "1".to_string()),
            ("page_size".to_string(), "2000".to_string())
        ]
    );
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert!(config.body.is_some());
    assert_eq!(config.max_retries, Some(2));
}

#[test]
fn test_calculate_backoff() {
    let config = HttpClientConfig::default().with_backoff(
        BackoffType::Exponential,
        Duration::from_millis(100),
        Duration::from_secs(1),
    );
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(3), Duration::from_millis(800));
    assert_eq!(client.calculate_backoff(10), Duration::from_secs(1));
}

#[tokio::test]
async fn test_send_get_with_query_and_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/networks/offers"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "2000"))
        .and(header("X-Eflow-API-Key", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"offers": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        HttpClient::with_auth(test_config(&mock_server), AuthConfig::everflow("key")).unwrap();
    let request = StreamRequest::get("/networks/offers")
        .query("page", 2)
        .query("page_size", 2000);

    let body = client.send(&request).await.unwrap();
    assert_eq!(body, json!({"offers": []}));
}

#[tokio::test]
async fn test_send_post_json_body() {
    let mock_server = MockServer::start().await;
    let payload = json!({"from": "2024-01-01 00:00:00", "to": "2024-01-05 00:00:00"});

    Mock::given(method("POST"))
        .and(path("/networks/reporting/conversions"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"conversions": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(test_config(&mock_server)).unwrap();
    let request = StreamRequest::post("/networks/reporting/conversions", payload.clone());

    let body = client.send(&request).await.unwrap();
    assert_eq!(body["conversions"], json!([]));
}

#[tokio::test]
async fn test_retry_on_500_then_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(test_config(&mock_server)).unwrap();
    let body = client.send(&StreamRequest::get("/flaky")).await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_server_error_after_retries_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server).with_max_retries(2);
    let client = HttpClient::with_config(config).unwrap();

    let err = client.send(&StreamRequest::get("/down")).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_client_error_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forbidden"))
        .respond_with(ResponseTemplate::new(403).set_body_string("bad key"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(test_config(&mock_server)).unwrap();
    let err = client
        .send(&StreamRequest::get("/forbidden"))
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "bad key");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(test_config(&mock_server)).unwrap();
    let err = client.send(&StreamRequest::get("/html")).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}
