//! Fail-fast validation paths.
//!
//! Every request here is rejected before the store is consulted, so these
//! run against a router whose pool has never connected to anything.

use axum::http::StatusCode;
use serde_json::json;

use grapevine_integration_tests::{send_json, test_router};

#[tokio::test]
async fn register_rejects_missing_username() {
    let (status, body) = send_json(
        test_router(),
        "POST",
        "/auth/register",
        Some(json!({ "password": "longenough" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn register_rejects_blank_username() {
    let (status, _) = send_json(
        test_router(),
        "POST",
        "/auth/register",
        Some(json!({ "username": "   ", "password": "longenough" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_rejects_missing_password() {
    let (status, body) = send_json(
        test_router(),
        "POST",
        "/auth/register",
        Some(json!({ "username": "alice" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn register_rejects_short_password() {
    let (status, body) = send_json(
        test_router(),
        "POST",
        "/auth/register",
        Some(json!({ "username": "alice", "password": "12345" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("at least 6 characters")
    );
}

#[tokio::test]
async fn login_rejects_missing_password() {
    let (status, _) = send_json(
        test_router(),
        "POST",
        "/auth/login",
        Some(json!({ "username": "alice" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_gossip_rejects_blank_content() {
    let (status, body) = send_json(
        test_router(),
        "POST",
        "/gossips",
        Some(json!({
            "content": "   \n ",
            "authorId": "7f1a1e5e-43c2-4b5a-9a64-0f2a9c1d2e3f",
            "authorUsername": "alice",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn create_gossip_rejects_missing_author() {
    let (status, _) = send_json(
        test_router(),
        "POST",
        "/gossips",
        Some(json!({ "content": "hello" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn vote_rejects_unknown_vote_type() {
    let (status, body) = send_json(
        test_router(),
        "POST",
        "/gossips/7f1a1e5e-43c2-4b5a-9a64-0f2a9c1d2e3f/vote",
        Some(json!({
            "userId": "11111111-2222-3333-4444-555555555555",
            "voteType": "sideways",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("voteType"));
}

#[tokio::test]
async fn vote_rejects_missing_user() {
    let (status, _) = send_json(
        test_router(),
        "POST",
        "/gossips/7f1a1e5e-43c2-4b5a-9a64-0f2a9c1d2e3f/vote",
        Some(json!({ "voteType": "up" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn comment_rejects_blank_content() {
    let (status, _) = send_json(
        test_router(),
        "POST",
        "/gossips/7f1a1e5e-43c2-4b5a-9a64-0f2a9c1d2e3f/comments",
        Some(json!({
            "content": "",
            "authorId": "11111111-2222-3333-4444-555555555555",
            "authorUsername": "bob",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_rejects_missing_user() {
    let (status, _) = send_json(
        test_router(),
        "DELETE",
        "/gossips/7f1a1e5e-43c2-4b5a-9a64-0f2a9c1d2e3f",
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
