//! Integration tests for the HTTP client pipeline.
//!
//! These tests run the executor against a mock server and verify URL
//! construction, header handling, credential attachment, and error
//! classification.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dokan_api::clients::{HttpClient, HttpMethod, HttpRequest};
use dokan_api::{AuthError, BaseUrl, Credentials, DokanConfig, Error, RetryPolicy};

/// Base64 of "user:pass", as sent by basic auth.
const BASIC_USER_PASS: &str = "Basic dXNlcjpwYXNz";

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(50),
        multiplier: 1.0,
    }
}

fn create_client(server: &MockServer, credentials: Credentials) -> HttpClient {
    let config = DokanConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .credentials(credentials)
        .retry_policy(fast_retry())
        .build()
        .unwrap();
    HttpClient::new(config)
}

#[tokio::test]
async fn test_get_decodes_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/dokan/v1/products/42"))
        .and(header("authorization", BASIC_USER_PASS))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42, "name": "Widget"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, Credentials::basic("user", "pass"));
    let request = HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/products/42").build();

    let response = client.request(request).await.unwrap();
    assert_eq!(response.status, 200);

    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body, json!({"id": 42, "name": "Widget"}));
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/dokan/v1/orders/"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, Credentials::bearer("secret-token"));
    let request = HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/orders/").build();

    assert!(client.request(request).await.is_ok());
}

#[tokio::test]
async fn test_query_pairs_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/dokan/v1/products/"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    #[derive(serde::Serialize)]
    struct Params {
        page: Option<u32>,
        per_page: Option<u32>,
        search: Option<String>,
    }

    let client = create_client(&server, Credentials::basic("user", "pass"));
    let request = HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/products/")
        .query(&Params {
            page: Some(2),
            per_page: Some(10),
            search: None,
        })
        .unwrap()
        .build();

    assert!(client.request(request).await.is_ok());
}

#[tokio::test]
async fn test_body_sets_json_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/wp-json/dokan/v1/products/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "Widget"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1, "name": "Widget"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, Credentials::basic("user", "pass"));
    let request = HttpRequest::builder(HttpMethod::Post, "/wp-json/dokan/v1/products/")
        .body(json!({"name": "Widget"}))
        .build();

    let response = client.request(request).await.unwrap();
    assert_eq!(response.status, 201);
}

#[tokio::test]
async fn test_extra_headers_override_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/dokan/v1/stores/"))
        .and(header("accept", "application/vnd.dokan+json"))
        .and(header("x-request-source", "sync-job"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, Credentials::basic("user", "pass"));
    let request = HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/stores/")
        .header("Accept", "application/vnd.dokan+json")
        .header("X-Request-Source", "sync-job")
        .build();

    assert!(client.request(request).await.is_ok());
}

#[tokio::test]
async fn test_path_join_tolerates_slashes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/dokan/v1/products/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "name": "Bolt"})))
        .expect(2)
        .mount(&server)
        .await;

    let client = create_client(&server, Credentials::basic("user", "pass"));

    // With and without a leading slash, the same URL is produced.
    for request_path in ["/wp-json/dokan/v1/products/7", "wp-json/dokan/v1/products/7"] {
        let request = HttpRequest::builder(HttpMethod::Get, request_path).build();
        assert!(client.request(request).await.is_ok());
    }
}

#[tokio::test]
async fn test_404_with_empty_body_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/dokan/v1/products/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, Credentials::basic("user", "pass"));
    let request = HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/products/42").build();

    let error = client.request(request).await.unwrap_err();
    assert!(
        matches!(&error, Error::NotFound { resource, id } if resource == "resource" && id == "unknown"),
        "unexpected error: {error:?}"
    );
}

#[tokio::test]
async fn test_structured_error_payload_wins() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/dokan/v1/products/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "dokan_rest_invalid_product_id",
            "message": "Invalid product ID.",
            "data": {"status": 404}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, Credentials::basic("user", "pass"));
    let request = HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/products/42").build();

    let error = client.request(request).await.unwrap_err();
    match error {
        Error::Api {
            code,
            message,
            status,
            ..
        } => {
            assert_eq!(code, "dokan_rest_invalid_product_id");
            assert_eq!(message, "Invalid product ID.");
            assert_eq!(status, 404);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_401_maps_to_auth_error_and_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/dokan/v1/orders/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, Credentials::basic("user", "wrong"));
    let request = HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/orders/").build();

    let error = client.request(request).await.unwrap_err();
    assert!(
        matches!(&error, Error::Auth(AuthError::Denied(message)) if message == "unauthorized access"),
        "unexpected error: {error:?}"
    );
}

#[tokio::test]
async fn test_empty_credentials_fail_before_any_network_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server, Credentials::basic("", ""));
    let request = HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/products/").build();

    let error = client.request(request).await.unwrap_err();
    assert!(matches!(
        error,
        Error::Auth(AuthError::MissingBasicCredentials)
    ));
}

#[tokio::test]
async fn test_transport_failure_maps_to_network_error() {
    // Nothing listens on this port; connections are refused.
    let config = DokanConfig::builder()
        .base_url(BaseUrl::new("http://127.0.0.1:1").unwrap())
        .credentials(Credentials::basic("user", "pass"))
        .retry_policy(RetryPolicy {
            max_attempts: 1,
            ..fast_retry()
        })
        .build()
        .unwrap();
    let client = HttpClient::new(config);

    let request = HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/products/").build();
    let error = client.request(request).await.unwrap_err();
    assert!(matches!(error, Error::Network(_)), "got: {error:?}");
}

#[tokio::test]
async fn test_pagination_headers_are_exposed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/dokan/v1/products/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1, "name": "Widget"}]))
                .insert_header("X-WP-Total", "57")
                .insert_header("X-WP-TotalPages", "6"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, Credentials::basic("user", "pass"));
    let request = HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/products/").build();

    let response = client.request(request).await.unwrap();
    assert_eq!(response.total_items(), 57);
    assert_eq!(response.total_pages(), 6);
}

#[tokio::test]
async fn test_429_exposes_retry_after_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/dokan/v1/products/"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({}))
                .insert_header("Retry-After", "17"),
        )
        .mount(&server)
        .await;

    let config = DokanConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .credentials(Credentials::basic("user", "pass"))
        .retry_policy(RetryPolicy {
            max_attempts: 1,
            ..fast_retry()
        })
        .build()
        .unwrap();
    let client = HttpClient::new(config);

    let request = HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/products/").build();
    let error = client.request(request).await.unwrap_err();
    assert!(matches!(error, Error::RateLimited { retry_after: 17 }));
}

#[tokio::test]
async fn test_configured_rate_limit_fallback_applies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/dokan/v1/products/"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({})))
        .mount(&server)
        .await;

    let config = DokanConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .credentials(Credentials::basic("user", "pass"))
        .retry_policy(RetryPolicy {
            max_attempts: 1,
            ..fast_retry()
        })
        .rate_limit_retry_after(120)
        .build()
        .unwrap();
    let client = HttpClient::new(config);

    let request = HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/products/").build();
    let error = client.request(request).await.unwrap_err();
    assert!(matches!(error, Error::RateLimited { retry_after: 120 }));
}
