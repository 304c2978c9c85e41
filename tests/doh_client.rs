use email_vet_core::utils::throttle::Throttle;
use email_vet_core::{AppError, CheckStatus, Config, ConfigBuilder, DohClient, RecordType, Validator};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    ConfigBuilder::new()
        .resolver_url(format!("{}/resolve", server.uri()))
        .sleep_between_attempts(0.0, 0.0)
        .build()
        .unwrap()
}

fn mx_body() -> serde_json::Value {
    json!({
        "Status": 0,
        "TC": false,
        "RD": true,
        "Question": [{ "name": "example.com.", "type": 15 }],
        "Answer": [
            { "name": "example.com.", "type": 15, "TTL": 300, "data": "10 mx1.example.com." },
            { "name": "example.com.", "type": 15, "TTL": 300, "data": "20 mx2.example.com." }
        ]
    })
}

#[tokio::test]
async fn sends_json_query_and_parses_answers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resolve"))
        .and(query_param("name", "example.com"))
        .and(query_param("type", "MX"))
        .and(header("accept", "application/dns-json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mx_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = DohClient::new(Arc::new(config_for(&server)), None).unwrap();
    let response = client.query("example.com", RecordType::Mx).await.unwrap();

    assert!(response.is_success());
    let data: Vec<&str> = response.answers_of(RecordType::Mx).map(|a| a.data.as_str()).collect();
    assert_eq!(data, vec!["10 mx1.example.com.", "20 mx2.example.com."]);
}

#[tokio::test]
async fn retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mx_body()))
        .mount(&server)
        .await;

    let client = DohClient::new(Arc::new(config_for(&server)), None).unwrap();
    let response = client.query("example.com", RecordType::Mx).await.unwrap();
    assert_eq!(response.answers.len(), 2);
}

#[tokio::test]
async fn retries_servfail_then_returns_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Status": 2 })))
        .expect(2)
        .mount(&server)
        .await;

    let client = DohClient::new(Arc::new(config_for(&server)), None).unwrap();
    let response = client.query("example.com", RecordType::Mx).await.unwrap();
    assert_eq!(response.status, 2);
    assert!(!response.is_success());
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = DohClient::new(Arc::new(config_for(&server)), None).unwrap();
    let err = client.query("example.com", RecordType::A).await.unwrap_err();
    assert!(matches!(err, AppError::DnsHttpStatus(404)));
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not dns</html>"))
        .mount(&server)
        .await;

    let client = DohClient::new(Arc::new(config_for(&server)), None).unwrap();
    let err = client.query("example.com", RecordType::A).await.unwrap_err();
    assert!(matches!(err, AppError::Json(_)));
}

#[tokio::test]
async fn rate_limiting_engages_the_throttle() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let throttle = Arc::new(Throttle::new(10, Duration::from_millis(100), Duration::from_secs(5)));
    let config = ConfigBuilder::new()
        .resolver_url(format!("{}/resolve", server.uri()))
        .max_lookup_attempts(1)
        .build()
        .unwrap();
    let client = DohClient::new(Arc::new(config), Some(throttle.clone())).unwrap();

    let err = client.query("example.com", RecordType::Mx).await.unwrap_err();
    assert!(matches!(err, AppError::DnsHttpStatus(429)));
    assert!(throttle.current_backoff().is_some());
}

#[tokio::test]
async fn validator_resolves_through_doh_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("name", "example.com"))
        .and(query_param("type", "MX"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mx_body()))
        .expect(1)
        .mount(&server)
        .await;

    let config = ConfigBuilder::new()
        .resolver_url(format!("{}/resolve", server.uri()))
        .enable_blacklist_checks(false)
        .build()
        .unwrap();
    let validator = Validator::new(config).unwrap();

    let result = validator.validate_email("someone@example.com").await;
    assert_eq!(result.checks.mx.status, CheckStatus::Pass);
    assert_eq!(result.checks.mx.records.len(), 2);
    assert!(result.is_valid);
    assert_eq!(result.score, 100);
}
