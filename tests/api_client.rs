//! Integration tests for the HTTP client against a mock server.

use std::time::Duration;

use serde_json::json;
use td::api::ApiClient;
use td::error::Error;
use wiremock::matchers::{body_json, body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn fetch_all_decodes_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "text": "Buy milk", "done": false},
            {"id": 2, "text": "Ship release", "done": true}
        ])))
        .mount(&server)
        .await;

    let tasks = client(&server).fetch_all().await.expect("fetch");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].text, "Buy milk");
    assert!(tasks[1].done);
}

#[tokio::test]
async fn fetch_all_decodes_wrapped_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"id": 1, "text": "Buy milk", "done": false, "created_at": 1700000000.25}
            ],
            "count": 1
        })))
        .mount(&server)
        .await;

    let tasks = client(&server).fetch_all().await.expect("fetch");
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].created().is_some());
}

#[tokio::test]
async fn fetch_all_non_2xx_is_uniform_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "error": "Failed to fetch tasks"
        })))
        .mount(&server)
        .await;

    let err = client(&server).fetch_all().await.expect_err("failure");
    assert!(matches!(err, Error::Api { status: 500, .. }));
    assert!(err.to_string().starts_with("failed to load tasks"));
}

#[tokio::test]
async fn create_posts_text_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_json(json!({"text": "Buy milk"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).create("Buy milk").await.expect("create");
}

#[tokio::test]
async fn rename_patches_item_path() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/7"))
        .and(body_json(json!({"text": "Buy oat milk"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).rename(7, "Buy oat milk").await.expect("rename");
}

#[tokio::test]
async fn complete_puts_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/7"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).complete(7).await.expect("complete");
}

#[tokio::test]
async fn delete_hits_item_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete(7).await.expect("delete");
}

#[tokio::test]
async fn mutation_failure_carries_fixed_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "error": "Task text cannot be empty"
        })))
        .mount(&server)
        .await;

    let err = client(&server).create("x").await.expect_err("failure");
    assert!(err.to_string().starts_with("failed to add task"));
    assert_eq!(err.exit_code(), td::error::exit_codes::OPERATION_FAILED);
}
