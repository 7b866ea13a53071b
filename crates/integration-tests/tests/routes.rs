//! Router wiring: info, health, unknown routes, and the WebSocket endpoint.

use axum::http::StatusCode;

use grapevine_integration_tests::{send_json, test_router};

#[tokio::test]
async fn index_reports_api_info() {
    let (status, body) = send_json(test_router(), "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Grapevine API");
    assert_eq!(body["websocket"], "enabled");
}

#[tokio::test]
async fn liveness_check_needs_no_database() {
    let (status, _) = send_json(test_router(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_404s() {
    let (status, _) = send_json(test_router(), "GET", "/no/such/route", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn websocket_route_rejects_plain_get() {
    // Without the upgrade handshake headers the endpoint refuses the request.
    let (status, _) = send_json(test_router(), "GET", "/ws", None).await;
    assert!(status.is_client_error());
}
