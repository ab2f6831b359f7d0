//! Category API Tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;

use crate::common::{assert_error, token_for, TestApp};

#[tokio::test]
async fn test_create_category_requires_authentication() {
    let app = TestApp::new().await;

    let response = app
        .send_json("POST", "/api/v1/categories", &json!({"name": "Games"}), None)
        .await;

    assert_error(response, StatusCode::UNAUTHORIZED, 10003).await;
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::new().await;

    let response = app
        .send_json(
            "POST",
            "/api/v1/categories",
            &json!({"name": "Games"}),
            Some("eyJhbGciOiJIUzI1NiJ9.e30.invalid"),
        )
        .await;

    let body = assert_error(response, StatusCode::UNAUTHORIZED, 10003).await;
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn test_category_name_too_long() {
    let app = TestApp::new().await;
    let token = token_for(1);

    let response = app
        .send_json(
            "POST",
            "/api/v1/categories",
            &json!({"name": "x".repeat(101)}),
            Some(&token),
        )
        .await;

    assert_error(response, StatusCode::BAD_REQUEST, 10007).await;
}

#[tokio::test]
async fn test_invalid_category_path_id() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/categories/not-a-number", None).await;

    let body = assert_error(response, StatusCode::BAD_REQUEST, 10002).await;
    assert_eq!(body["message"], "Invalid category ID");
}

#[tokio::test]
async fn test_icon_upload_requires_multipart() {
    let app = TestApp::new().await;
    let token = token_for(1);

    let response = app
        .request(
            Request::builder()
                .method("PUT")
                .uri("/api/v1/categories/1/icon")
                .header("Authorization", format!("Bearer {}", token))
                .header("Content-Type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await;

    assert_error(response, StatusCode::BAD_REQUEST, 10002).await;
    assert!(app.storage.is_empty());
}
