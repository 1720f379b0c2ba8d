//! The request client against a real local HTTP backend.

use guide_content::{Query, RequestOptions};
use serde_json::json;

mod common;
use common::{MockResponse, RecordedRequest};

#[tokio::test]
async fn test_json_200_succeeds() {
    let backend =
        common::start_fixed_backend(MockResponse::json(200, json!([{"id": 1, "title": "Arikok"}])))
            .await;
    let client = common::legacy_client(&backend.url());

    let envelope = client.request("tours", RequestOptions::get()).await;
    assert!(envelope.success);
    assert_eq!(envelope.data, Some(json!([{"id": 1, "title": "Arikok"}])));
    assert!(envelope.error.is_none());
}

#[tokio::test]
async fn test_html_200_fails_as_non_json() {
    let backend =
        common::start_fixed_backend(MockResponse::html(200, "<!doctype html><h1>Login</h1>")).await;
    let client = common::legacy_client(&backend.url());

    let envelope = client.request("tours", RequestOptions::get()).await;
    assert!(!envelope.success);
    assert!(envelope.data.is_none());
    assert!(envelope.error.unwrap().contains("Non-JSON response"));
}

#[tokio::test]
async fn test_json_500_surfaces_server_error() {
    let backend =
        common::start_fixed_backend(MockResponse::json(500, json!({"error": "database offline"})))
            .await;
    let client = common::legacy_client(&backend.url());

    let envelope = client.request("tours", RequestOptions::get()).await;
    assert!(!envelope.success);
    assert_eq!(envelope.error.as_deref(), Some("database offline"));
}

#[tokio::test]
async fn test_status_without_message_uses_generic_error() {
    let backend = common::start_fixed_backend(MockResponse::json(502, json!({}))).await;
    let client = common::legacy_client(&backend.url());

    let envelope = client.request("tours", RequestOptions::get()).await;
    assert_eq!(envelope.error.as_deref(), Some("Request failed: 502"));
}

#[tokio::test]
async fn test_connection_refused_fails() {
    let addr = common::refused_addr();
    let client = common::legacy_client(&format!("http://{}", addr));

    let envelope = client.request("tours", RequestOptions::get()).await;
    assert!(!envelope.success);
    assert!(envelope.error.unwrap().starts_with("Network error"));
}

#[tokio::test]
async fn test_malformed_json_fails() {
    let backend = common::start_fixed_backend(MockResponse {
        status: 200,
        content_type: Some("application/json"),
        body: "{\"items\": [".to_string(),
    })
    .await;
    let client = common::legacy_client(&backend.url());

    let envelope = client.request("tours", RequestOptions::get()).await;
    assert!(!envelope.success);
    assert!(envelope.error.unwrap().starts_with("Malformed response"));
}

#[tokio::test]
async fn test_envelope_is_unwrapped() {
    let backend = common::start_fixed_backend(MockResponse::json(
        200,
        json!({"success": true, "data": {"restaurants": [{"name": "Zeerovers"}]}}),
    ))
    .await;
    let client = common::legacy_client(&backend.url());

    let envelope = client.request("restaurants", RequestOptions::get()).await;
    assert_eq!(
        envelope.data,
        Some(json!({"restaurants": [{"name": "Zeerovers"}]}))
    );
}

#[tokio::test]
async fn test_rejected_envelope_fails_with_its_error() {
    let backend = common::start_fixed_backend(MockResponse::json(
        200,
        json!({"success": false, "error": "Not allowed"}),
    ))
    .await;
    let client = common::legacy_client(&backend.url());

    let envelope = client.request("tours", RequestOptions::get()).await;
    assert!(!envelope.success);
    assert_eq!(envelope.error.as_deref(), Some("Not allowed"));
}

#[tokio::test]
async fn test_empty_body_is_null_payload() {
    let backend = common::start_fixed_backend(MockResponse {
        status: 204,
        content_type: None,
        body: String::new(),
    })
    .await;
    let client = common::legacy_client(&backend.url());

    let envelope = client.request("tours/3", RequestOptions::delete()).await;
    assert!(envelope.success);
    assert_eq!(envelope.data, Some(serde_json::Value::Null));
}

#[tokio::test]
async fn test_legacy_paths_and_headers() {
    let backend = common::start_fixed_backend(MockResponse::json(200, json!([]))).await;
    let client = common::legacy_client(&backend.url());

    let query = Query::new().flag("active", true).param("type", "bus");
    client
        .request("transportation", RequestOptions::get().with_query(query))
        .await;
    client.request("tours/42", RequestOptions::get()).await;

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);

    let list: &RecordedRequest = &requests[0];
    assert_eq!(list.method, "GET");
    assert_eq!(list.path(), "/api/transportation");
    assert!(list.query().contains("active=true"));
    assert!(list.query().contains("type=bus"));
    assert_eq!(list.header("content-type"), Some("application/json"));
    assert!(list.header("apikey").is_none());
    assert!(list.header("authorization").is_none());

    assert_eq!(requests[1].path(), "/api/tours/42");
}

#[tokio::test]
async fn test_gateway_paths_and_api_key() {
    let backend = common::start_fixed_backend(MockResponse::json(200, json!({"items": []}))).await;
    let client = common::functions_client(&format!("{}/functions/v1", backend.url()), "anon-key");

    let envelope = client.request("cultural-events", RequestOptions::get()).await;
    assert!(envelope.success);

    let requests = backend.requests();
    assert_eq!(requests[0].path(), "/functions/v1/admin-content/cultural-events");
    assert_eq!(requests[0].header("apikey"), Some("anon-key"));
}

#[tokio::test]
async fn test_admin_call_carries_bearer_and_body() {
    let backend =
        common::start_fixed_backend(MockResponse::json(201, json!({"success": true, "data": {"id": 5}})))
            .await;
    let client = common::legacy_client(&backend.url());

    let envelope = client
        .request(
            "restaurants",
            RequestOptions::post(json!({"name": "Zeerovers"})).with_bearer("session-token"),
        )
        .await;
    assert_eq!(envelope.data, Some(json!({"id": 5})));

    let request = &backend.requests()[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.header("authorization"), Some("Bearer session-token"));
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body, json!({"name": "Zeerovers"}));
}

#[tokio::test]
async fn test_unmapped_endpoint_passes_through() {
    let backend = common::start_fixed_backend(MockResponse::json(200, json!({"ok": true}))).await;
    let client = common::legacy_client(&backend.url());

    client.request("health", RequestOptions::get()).await;
    assert_eq!(backend.requests()[0].path(), "/health");
}
