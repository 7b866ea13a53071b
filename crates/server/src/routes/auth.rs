//! Authentication route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use grapevine_core::UserId;

use crate::error::Result;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body.
///
/// Fields default to empty so that missing input reaches the service's
/// validation and comes back as a 400 rather than a body-rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Selects the administrator code path. Selecting it grants nothing:
    /// the configured admin credentials still have to match.
    #[serde(default)]
    pub is_admin: bool,
}

/// Handle `POST /auth/register`.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool(), &state.config().admin);
    let user = auth.register(&body.username, &body.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Registration successful",
            "user": user,
        })),
    ))
}

/// Handle `POST /auth/login`.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool(), &state.config().admin);
    let user = auth
        .login(&body.username, &body.password, body.is_admin)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "user": user,
    })))
}

/// Handle `GET /auth/user/{id}`.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool(), &state.config().admin);
    let user = auth.get_user(id).await?;

    Ok(Json(json!({
        "success": true,
        "user": user,
    })))
}
