//! HTTP executor classification against a local mock server

use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nara_market_lib::domain::ErrorDescriptor;
use nara_market_lib::infrastructure::http_executor::{HttpClientConfig, HttpRequestExecutor, RequestExecutor};
use nara_market_lib::infrastructure::request_builder::build_url;

fn executor() -> HttpRequestExecutor {
    HttpRequestExecutor::with_config(HttpClientConfig {
        timeout_seconds: 5,
        ..HttpClientConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn success_returns_body_and_keyword_is_decoded_by_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("bidNtceNm", "감압 챔버"))
        .and(query_param("serviceKey", "a+b/c=="))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"response":{"body":{"items":[]}}}"#))
        .expect(1)
        .mount(&server)
        .await;

    let url = build_url(
        &format!("{}/search", server.uri()),
        &[("serviceKey", "a+b/c=="), ("bidNtceNm", "감압 챔버")],
    );
    let body = executor().execute(&url, Duration::from_secs(2)).await.unwrap();

    assert!(body.contains("items"));
}

#[tokio::test]
async fn non_success_status_is_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .mount(&server)
        .await;

    let result = executor().execute(&format!("{}/search", server.uri()), Duration::from_secs(2)).await;

    assert_eq!(
        result,
        Err(ErrorDescriptor::HttpStatus {
            code: 404,
            reason: "Not Found".to_string(),
        })
    );
}

#[tokio::test]
async fn server_error_is_http_status_too() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = executor().execute(&server.uri(), Duration::from_secs(2)).await;
    assert!(matches!(result, Err(ErrorDescriptor::HttpStatus { code: 500, .. })), "{result:?}");
}

#[tokio::test]
async fn slow_response_is_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let started = std::time::Instant::now();
    let result = executor().execute(&server.uri(), Duration::from_millis(200)).await;

    assert_eq!(result, Err(ErrorDescriptor::Timeout));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    // Bind then drop to get a local port with nothing listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let result = executor()
        .execute(&format!("http://127.0.0.1:{port}/search"), Duration::from_secs(2))
        .await;

    assert!(matches!(result, Err(ErrorDescriptor::Network(_))), "{result:?}");
}
