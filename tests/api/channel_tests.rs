//! Channel API Tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;

use crate::common::{assert_error, token_for, TestApp};

const BOUNDARY: &str = "X-CHAT-COMMUNITY-BOUNDARY";

fn multipart_body(field: &str, filename: &str, contents: &str) -> String {
    format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n{contents}\r\n--{b}--\r\n",
        b = BOUNDARY,
    )
}

#[tokio::test]
async fn test_update_channel_requires_authentication() {
    let app = TestApp::new().await;

    let response = app
        .send_json("PATCH", "/api/v1/channels/1", &json!({"name": "news"}), None)
        .await;

    assert_error(response, StatusCode::UNAUTHORIZED, 10003).await;
}

#[tokio::test]
async fn test_create_channel_validates_body() {
    let app = TestApp::new().await;
    let token = token_for(3);

    let response = app
        .send_json(
            "POST",
            "/api/v1/servers/1/channels",
            &json!({"name": "", "topic": "talk"}),
            Some(&token),
        )
        .await;

    assert_error(response, StatusCode::BAD_REQUEST, 10007).await;
}

#[tokio::test]
async fn test_banner_upload_missing_file_field() {
    let app = TestApp::new().await;
    let token = token_for(3);

    let response = app
        .request(
            Request::builder()
                .method("PUT")
                .uri("/api/v1/channels/1/banner")
                .header("Authorization", format!("Bearer {}", token))
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(multipart_body("image", "banner.png", "data")))
                .unwrap(),
        )
        .await;

    let body = assert_error(response, StatusCode::BAD_REQUEST, 10002).await;
    assert_eq!(body["message"], "Missing multipart field 'file'");
    assert!(app.storage.is_empty());
}

#[tokio::test]
async fn test_icon_upload_over_body_limit() {
    let app = TestApp::new().await;
    let token = token_for(3);
    let oversized = "x".repeat(128 * 1024);

    let response = app
        .request(
            Request::builder()
                .method("PUT")
                .uri("/api/v1/channels/1/icon")
                .header("Authorization", format!("Bearer {}", token))
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(multipart_body("file", "huge.png", &oversized)))
                .unwrap(),
        )
        .await;

    assert_error(response, StatusCode::PAYLOAD_TOO_LARGE, 10008).await;
    assert!(app.storage.is_empty());
}

#[tokio::test]
async fn test_invalid_channel_path_id() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/channels/1x", None).await;

    assert_error(response, StatusCode::BAD_REQUEST, 10002).await;
}
