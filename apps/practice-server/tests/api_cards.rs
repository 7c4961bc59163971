//! Card and group listing API tests.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;

use common::{TestContext, TOKEN};

fn words(body: &serde_json::Value) -> Vec<String> {
    body["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|card| card["word"].as_str().unwrap().to_string())
        .collect()
}

/// Test health check needs no token.
#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

/// Test cards default to newest first.
#[tokio::test]
async fn test_list_cards_newest_by_default() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .get("/api/cards")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(TOKEN),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["sort"], "newest");
    assert_eq!(words(&body), vec!["zebra", "Éclair", "banana", "apple"]);
}

/// Test alphabetical sort ignores accents and case.
#[tokio::test]
async fn test_list_cards_alphabetical() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .get("/api/cards?sort=az")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(TOKEN),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(words(&body), vec!["apple", "banana", "Éclair", "zebra"]);

    let response = server
        .get("/api/cards?sort=za")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(TOKEN),
        )
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(words(&body), vec!["zebra", "Éclair", "banana", "apple"]);
}

/// Test groups come back in name order with sorted members.
#[tokio::test]
async fn test_list_groups() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .get("/api/groups?sort=oldest")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(TOKEN),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let groups = body["groups"].as_array().unwrap();
    let names: Vec<&str> = groups.iter().map(|g| g["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Desserts", "Fruit", "Ungrouped"]);

    let fruit: Vec<&str> = groups[1]["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(fruit, vec!["c1", "c3"]);
}

/// Test missing Authorization header is rejected.
#[tokio::test]
async fn test_list_cards_requires_token() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/api/cards").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "unauthorized");
}

/// Test a token the remote rejects maps to 401.
#[tokio::test]
async fn test_list_cards_remote_rejects_token() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .get("/api/cards")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value("stale"),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

/// Test remote outage surfaces as a fetch error.
#[tokio::test]
async fn test_list_cards_remote_down() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();
    ctx.api.set_offline(true);

    let response = server
        .get("/api/cards")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(TOKEN),
        )
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "fetch_error");
}
