//! Authentication flows.
//!
//! Administrator login is a constant lookup against configuration, so those
//! tests need no database. Member registration and login round-trips do;
//! they are `#[ignore]`d until a test database is available.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use grapevine_integration_tests::{
    TEST_ADMIN_PASSWORD, TEST_ADMIN_USERNAME, db_router, send_json, test_router,
};

#[tokio::test]
async fn admin_login_succeeds_with_configured_credentials() {
    let (status, body) = send_json(
        test_router(),
        "POST",
        "/auth/login",
        Some(json!({
            "username": TEST_ADMIN_USERNAME,
            "password": TEST_ADMIN_PASSWORD,
            "isAdmin": true,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["isAdmin"], true);
    assert_eq!(body["user"]["username"], TEST_ADMIN_USERNAME);
    // The administrator's fixed, well-known id
    assert_eq!(
        body["user"]["id"],
        "00000000-0000-0000-0000-000000000000"
    );
}

#[tokio::test]
async fn admin_login_fails_with_wrong_password() {
    let (status, body) = send_json(
        test_router(),
        "POST",
        "/auth/login",
        Some(json!({
            "username": TEST_ADMIN_USERNAME,
            "password": "not-the-password",
            "isAdmin": true,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set GRAPEVINE_TEST_DATABASE_URL)"]
async fn register_then_login_roundtrip() {
    let (router, _pool) = db_router().await;
    let username = format!("alice-{}", Uuid::new_v4());

    let (status, body) = send_json(
        router.clone(),
        "POST",
        "/auth/register",
        Some(json!({ "username": username, "password": "secret6" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["username"], username.as_str());
    assert_eq!(body["user"]["isAdmin"], false);
    // Credential material never crosses the boundary
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());

    let (status, body) = send_json(
        router,
        "POST",
        "/auth/login",
        Some(json!({ "username": username, "password": "secret6" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], username.as_str());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set GRAPEVINE_TEST_DATABASE_URL)"]
async fn duplicate_username_is_rejected() {
    let (router, _pool) = db_router().await;
    let username = format!("bob-{}", Uuid::new_v4());

    let (status, _) = send_json(
        router.clone(),
        "POST",
        "/auth/register",
        Some(json!({ "username": username, "password": "secret6" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_json(
        router,
        "POST",
        "/auth/register",
        Some(json!({ "username": username, "password": "other-secret" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set GRAPEVINE_TEST_DATABASE_URL)"]
async fn wrong_password_matches_unknown_user_exactly() {
    let (router, _pool) = db_router().await;
    let username = format!("carol-{}", Uuid::new_v4());

    let (status, _) = send_json(
        router.clone(),
        "POST",
        "/auth/register",
        Some(json!({ "username": username, "password": "secret6" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (wrong_pw_status, wrong_pw_body) = send_json(
        router.clone(),
        "POST",
        "/auth/login",
        Some(json!({ "username": username, "password": "wrong" })),
    )
    .await;

    let (missing_status, missing_body) = send_json(
        router,
        "POST",
        "/auth/login",
        Some(json!({ "username": format!("ghost-{}", Uuid::new_v4()), "password": "wrong" })),
    )
    .await;

    // Indistinguishable: same status, same message
    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw_status, missing_status);
    assert_eq!(wrong_pw_body["message"], missing_body["message"]);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set GRAPEVINE_TEST_DATABASE_URL)"]
async fn user_lookup_returns_public_view() {
    let (router, _pool) = db_router().await;
    let username = format!("dave-{}", Uuid::new_v4());

    let (_, body) = send_json(
        router.clone(),
        "POST",
        "/auth/register",
        Some(json!({ "username": username, "password": "secret6" })),
    )
    .await;
    let id = body["user"]["id"].as_str().unwrap().to_string();

    let (status, body) = send_json(router, "GET", &format!("/auth/user/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], username.as_str());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set GRAPEVINE_TEST_DATABASE_URL)"]
async fn user_lookup_404s_for_unknown_id() {
    let (router, _pool) = db_router().await;

    let (status, _) = send_json(
        router,
        "GET",
        &format!("/auth/user/{}", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
