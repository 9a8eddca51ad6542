use infinibrowser::api::client::{ClientConfig, InfinibrowserClient, RefineConfig};
use infinibrowser::api::models::{LineageStep, StepElement};
use infinibrowser::api::request::RequestOptions;
use infinibrowser::api::response::{ApiResult, ErrorCode};
use infinibrowser::error::ApiError;
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, timeout_ms: u64) -> InfinibrowserClient {
    InfinibrowserClient::new(ClientConfig::new(format!("{}/api", server.uri()), timeout_ms))
        .expect("client creation failed")
}

fn steam_steps() -> Vec<LineageStep> {
    vec![
        (
            StepElement::new("Water", "💧"),
            StepElement::new("Fire", "🔥"),
            StepElement::new("Steam", "💨"),
        ),
        (
            StepElement::new("Steam", "💨"),
            StepElement::new("Earth", "🌍"),
            StepElement::new("Geyser", "⛲"),
        ),
    ]
}

#[tokio::test]
async fn test_get_item_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/item"))
        .and(query_param("id", "Water"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"text": "Water", "emoji": "💧"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 2000);
    let result = client.get_item("Water").await;

    assert!(result.is_ok());
    assert_eq!(result.error_code(), None);
    let data = result.data().expect("success payload");
    assert_eq!(data["text"], "Water");
    let raw = result.raw_response().expect("raw response");
    assert_eq!(raw.status.as_u16(), 200);
    assert_eq!(raw.url.query(), Some("id=Water"));
}

#[tokio::test]
async fn test_get_item_unknown_element_is_not_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/item"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"code": 404, "message": "Unknown element"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, 2000);
    let result = client.get_item("Nothing").await;

    assert!(!result.is_ok());
    assert_eq!(result.error_code(), Some(ErrorCode::NotOk));
    match result {
        ApiResult::NotOk { data, raw_response } => {
            assert_eq!(data.code, 404);
            assert_eq!(data.message, "Unknown element");
            assert_eq!(raw_response.status.as_u16(), 404);
        }
        other => panic!("Expected NOT_OK, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json_is_syntax_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/item"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, 2000);
    let result = client.get_item("Water").await;

    assert_eq!(result.error_code(), Some(ErrorCode::SyntaxError));
    assert!(result.raw_response().is_none());
}

#[tokio::test]
async fn test_non_json_error_body_is_syntax_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/uses"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server, 2000);
    let result = client.get_uses("Water", None).await;

    assert_eq!(result.error_code(), Some(ErrorCode::SyntaxError));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/item"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"text": "Water"}))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, 200);
    let started = Instant::now();
    let result = client.get_item("Water").await;
    let elapsed = started.elapsed();

    assert_eq!(result.error_code(), Some(ErrorCode::Timeout));
    assert!(elapsed >= Duration::from_millis(200), "returned after {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(1200), "returned after {:?}", elapsed);
}

#[tokio::test]
async fn test_connection_failure_is_unknown_error() {
    // Bind then release a port so nothing is listening on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let base_url = format!("http://{}/api", listener.local_addr().unwrap());
    drop(listener);

    let client = InfinibrowserClient::new(ClientConfig::new(base_url, 2000))
        .expect("client creation failed");
    let result = client.get_item("Water").await;

    assert_eq!(result.error_code(), Some(ErrorCode::UnknownError));
}

#[tokio::test]
async fn test_recipes_and_uses_default_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/recipes"))
        .and(query_param("id", "Steam"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"recipes": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/uses"))
        .and(query_param("id", "Steam"))
        .and(query_param("offset", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uses": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 2000);

    assert!(client.get_recipes("Steam", None).await.is_ok());
    assert!(client.get_uses("Steam", Some(40)).await.is_ok());
}

#[tokio::test]
async fn test_lineage_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/recipe"))
        .and(query_param("id", "Steam"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"steps": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/recipe/custom"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"code": 400, "message": "Invalid element ID"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 2000);

    assert!(client.get_lineage("Steam").await.is_ok());

    let custom = client.get_custom_lineage("not-an-id").await;
    assert_eq!(custom.error_code(), Some(ErrorCode::NotOk));
    assert_eq!(custom.error_data().map(|e| e.code), Some(400));
}

#[tokio::test]
async fn test_get_sends_accept_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/item"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "Fire"})))
        .mount(&server)
        .await;

    let client = client_for(&server, 2000);
    assert!(client.get_item("Fire").await.is_ok());

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;
    assert_eq!(
        headers.get("accept").unwrap().to_str().unwrap(),
        "application/json"
    );
    assert_eq!(
        headers.get("accept-encoding").unwrap().to_str().unwrap(),
        "gzip, deflate, identity"
    );
}

#[tokio::test]
async fn test_optimize_lineage_posts_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/optimize-lineage"))
        .and(query_param("id", "Geyser"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "Geyser", "before": 5, "after": 3})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 2000);
    let result = client.optimize_lineage("Geyser").await;

    let data = result.data().expect("success payload");
    assert_eq!(data.id, "Geyser");
    assert_eq!((data.before, data.after), (5, 3));

    let requests = server.received_requests().await.expect("recording enabled");
    let request = &requests[0];
    assert_eq!(request.body, b"{}");
    assert_eq!(
        request.headers.get("content-type").unwrap().to_str().unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn test_share_lineage_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analytics/share"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "abc123"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 2000);
    let result = client
        .share_lineage(&steam_steps())
        .await
        .expect("non-empty steps");

    assert_eq!(result.data().map(|d| d.id.as_str()), Some("abc123"));

    let requests = server.received_requests().await.expect("recording enabled");
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["id"], "Geyser");
    assert_eq!(body["emoji"], "⛲");
    assert_eq!(body["steps"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["steps"][0][2]["id"], "Steam");
}

#[tokio::test]
async fn test_share_lineage_empty_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, 2000);
    let result = client.share_lineage(&[]).await;

    assert!(matches!(result, Err(ApiError::EmptyLineage)));
}

#[tokio::test]
async fn test_base_request_headers_merge_with_call_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/item"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "Earth"})))
        .mount(&server)
        .await;

    let base = RequestOptions::new()
        .header("x-client", "tests")
        .and_then(|o| o.header("accept", "text/plain"))
        .expect("valid headers");
    let client = client_for(&server, 2000).refine(RefineConfig {
        base_request: Some(base),
        ..Default::default()
    });

    assert!(client.get_item("Earth").await.is_ok());

    let requests = server.received_requests().await.expect("recording enabled");
    let headers = &requests[0].headers;
    assert_eq!(headers.get("x-client").unwrap().to_str().unwrap(), "tests");
    // Call-specific options win over the base request
    assert_eq!(
        headers.get("accept").unwrap().to_str().unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn test_refined_client_targets_new_base_url() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;
    Mock::given(path("/api/item"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "Air"})))
        .expect(1)
        .mount(&second)
        .await;

    let client = client_for(&first, 2000);
    let refined = client.refine(RefineConfig {
        base_url: Some(format!("{}/api", second.uri())),
        ..Default::default()
    });

    assert!(refined.get_item("Air").await.is_ok());
    assert_eq!(client.config().base_url, format!("{}/api", first.uri()));
}

#[tokio::test]
async fn test_concurrent_calls_share_client() {
    let server = MockServer::start().await;
    Mock::given(path("/api/item"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "Water"})))
        .expect(4)
        .mount(&server)
        .await;

    let client = client_for(&server, 2000);
    let (a, b, c, d) = tokio::join!(
        client.get_item("Water"),
        client.get_item("Water"),
        client.get_item("Water"),
        client.get_item("Water"),
    );

    assert!(a.is_ok() && b.is_ok() && c.is_ok() && d.is_ok());
}
