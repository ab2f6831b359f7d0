//! Server Listing API Tests
//!
//! Covers the checks that run before the listing reaches the database.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{assert_error, token_for, TestApp};

#[tokio::test]
async fn test_by_user_requires_authentication() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/servers?by_user=true", None).await;

    let body = assert_error(response, StatusCode::UNAUTHORIZED, 10003).await;
    assert_eq!(body["message"], "Authentication credentials were not provided");
}

#[tokio::test]
async fn test_by_serverid_requires_authentication() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/servers?by_serverid=1", None).await;

    assert_error(response, StatusCode::UNAUTHORIZED, 10003).await;
}

#[tokio::test]
async fn test_invalid_token_counts_as_anonymous() {
    let app = TestApp::new().await;

    let response = app
        .get("/api/v1/servers?by_user=true", Some("not-a-jwt"))
        .await;

    assert_error(response, StatusCode::UNAUTHORIZED, 10003).await;
}

#[tokio::test]
async fn test_non_numeric_qty_rejected() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/servers?qty=two", None).await;

    assert_error(response, StatusCode::BAD_REQUEST, 10007).await;
}

#[tokio::test]
async fn test_negative_qty_rejected() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/servers?qty=-3", None).await;

    assert_error(response, StatusCode::BAD_REQUEST, 10007).await;
}

#[tokio::test]
async fn test_non_numeric_server_id_rejected() {
    let app = TestApp::new().await;
    let token = token_for(7);

    let response = app
        .get("/api/v1/servers?by_serverid=abc", Some(&token))
        .await;

    let body = assert_error(response, StatusCode::BAD_REQUEST, 10007).await;
    assert_eq!(body["message"], json!("Server with id abc not found"));
}

#[tokio::test]
async fn test_create_server_requires_authentication() {
    let app = TestApp::new().await;

    let response = app
        .send_json("POST", "/api/v1/servers", &json!({"category": "1"}), None)
        .await;

    assert_error(response, StatusCode::UNAUTHORIZED, 10003).await;
}

#[tokio::test]
async fn test_create_server_with_non_numeric_category() {
    let app = TestApp::new().await;
    let token = token_for(7);

    let response = app
        .send_json(
            "POST",
            "/api/v1/servers",
            &json!({"name": "Lobby", "category": "games"}),
            Some(&token),
        )
        .await;

    assert_error(response, StatusCode::BAD_REQUEST, 10007).await;
}

#[tokio::test]
async fn test_join_requires_authentication() {
    let app = TestApp::new().await;

    let response = app
        .send_json("PUT", "/api/v1/servers/1/members/@me", &json!({}), None)
        .await;

    assert_error(response, StatusCode::UNAUTHORIZED, 10003).await;
}

#[tokio::test]
async fn test_invalid_server_path_id() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/servers/abc", None).await;

    assert_error(response, StatusCode::BAD_REQUEST, 10002).await;
}
