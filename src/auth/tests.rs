//! Tests for the auth module

use super::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_no_auth() {
    let auth = Authenticator::new(AuthConfig::None);
    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert!(built.headers().get(EVERFLOW_API_KEY_HEADER).is_none());
    assert!(!auth.is_configured());
}

#[test]
fn test_everflow_api_key_header() {
    let auth = Authenticator::new(AuthConfig::everflow("test-key-123"));
    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://api.eflow.team/v1/networks/offers"));

    let built = req.build().unwrap();
    assert_eq!(
        built.headers().get("X-Eflow-API-Key").unwrap(),
        "test-key-123"
    );
    assert!(auth.is_configured());
}

#[test]
fn test_api_key_query() {
    let auth = Authenticator::new(AuthConfig::ApiKey {
        location: Location::Query,
        name: "api_key".to_string(),
        value: "secret123".to_string(),
    });

    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert!(built.url().query().unwrap().contains("api_key=secret123"));
}

#[tokio::test]
async fn test_api_key_reaches_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/meta/timezones"))
        .and(header("X-Eflow-API-Key", "live-key"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::everflow("live-key"));
    let client = reqwest::Client::new();
    let response = auth
        .apply(client.get(format!("{}/meta/timezones", mock_server.uri())))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}
