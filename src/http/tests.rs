//! Tests for the HTTP transport module

use super::*;
use crate::error::Error;
use crate::types::BackoffType;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(0)
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert!(config.rate_limit.is_none());
    assert!(config.user_agent.starts_with("aws-opkit/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://clouddirectory.us-west-2.amazonaws.com")
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .rate_limit(RateLimiterConfig::new(5, 5))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, "https://clouddirectory.us-west-2.amazonaws.com");
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");

    let client = HttpClient::with_config(config).unwrap();
    assert!(client.has_rate_limiter());
}

#[test]
fn test_invalid_base_url_rejected() {
    let config = HttpClientConfig::builder().base_url("not a url").build();
    assert!(matches!(
        HttpClient::with_config(config),
        Err(Error::InvalidUrl(_))
    ));

    let config = HttpClientConfig::builder().base_url("mailto:ops@example.com").build();
    assert!(matches!(
        HttpClient::with_config(config),
        Err(Error::InvalidConfigValue { .. })
    ));
}

#[test]
fn test_build_url_encodes_path_parameters() {
    let config = HttpClientConfig::builder()
        .base_url("http://localhost:4566")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let request = HttpRequest::get("/event-rules")
        .segment("arn:aws:notifications::123456789012:configuration/abc/rule/def");
    let url = client.build_url(&request).unwrap();

    assert_eq!(
        url.as_str(),
        "http://localhost:4566/event-rules/arn:aws:notifications::123456789012:configuration%2Fabc%2Frule%2Fdef"
    );
}

#[test]
fn test_build_url_keeps_endpoint_prefix_and_query_order() {
    let config = HttpClientConfig::builder()
        .base_url("http://localhost:4566/proxy/")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let request = HttpRequest::get("/channels")
        .query("notificationConfigurationArn", "arn:a/b")
        .query("maxResults", 5);
    let url = client.build_url(&request).unwrap();

    assert_eq!(url.path(), "/proxy/channels");
    assert_eq!(
        url.query(),
        Some("notificationConfigurationArn=arn%3Aa%2Fb&maxResults=5")
    );
}

#[test]
fn test_calculate_backoff() {
    let config = HttpClientConfig::builder()
        .base_url("http://localhost")
        .backoff(
            BackoffType::Exponential,
            Duration::from_millis(100),
            Duration::from_millis(500),
        )
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(400));
    assert_eq!(client.calculate_backoff(5), Duration::from_millis(500));
}

#[tokio::test]
async fn test_get_with_query_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notification-hubs"))
        .and(query_param("maxResults", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "notificationHubs": [],
            "nextToken": "t1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = HttpRequest::get("/notification-hubs").query("maxResults", 3);
    let body = client.send(&request).await.unwrap();

    assert_eq!(body["nextToken"], "t1");
}

#[tokio::test]
async fn test_post_json_body_and_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/amazonclouddirectory/2017-01-11/directory/get"))
        .and(header("x-amz-data-partition", "arn:dir"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Directory": {"Name": "corp"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = HttpRequest::post("/amazonclouddirectory/2017-01-11/directory/get")
        .header("x-amz-data-partition", "arn:dir")
        .json(json!({}));
    let body = client.send(&request).await.unwrap();

    assert_eq!(body["Directory"]["Name"], "corp");
}

#[tokio::test]
async fn test_empty_body_decodes_to_object() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/notification-hubs/us-east-1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let body = client
        .send(&HttpRequest::delete("/notification-hubs").segment("us-east-1"))
        .await
        .unwrap();

    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_error_type_header_folded_into_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/event-rules/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-amzn-ErrorType", "ResourceNotFoundException")
                .set_body_json(json!({"message": "no such rule"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .send(&HttpRequest::get("/event-rules").segment("missing"))
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            let body: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(body["__type"], "ResourceNotFoundException");
            assert_eq!(body["message"], "no such rule");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_retry_on_500_then_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"channels": ["c1"]})))
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(2)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(5),
            Duration::from_millis(5),
        )
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let body = client.send(&HttpRequest::get("/channels")).await.unwrap();
    assert_eq!(body["channels"][0], "c1");
}

#[tokio::test]
async fn test_server_error_without_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.send(&HttpRequest::get("/channels")).await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_throttled_request_honours_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notification-hubs"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "0")
                .set_body_json(json!({"__type": "ThrottlingException", "message": "slow down"})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/notification-hubs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"notificationHubs": []})))
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(1)
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let body = client.send(&HttpRequest::get("/notification-hubs")).await.unwrap();
    assert_eq!(body, json!({"notificationHubs": []}));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_throttled_request_exhausts_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notification-hubs"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "0")
                .set_body_json(json!({"__type": "ThrottlingException"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.send(&HttpRequest::get("/notification-hubs")).await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 429, .. }));
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"__type": "ResourceNotFoundException"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(3)
        .backoff(BackoffType::Constant, Duration::from_millis(1), Duration::from_millis(1))
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let err = client.send(&HttpRequest::get("/channels")).await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
}
