//! Gossip feed route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use grapevine_core::{GossipId, UserId};

use crate::error::{AppError, Result};
use crate::models::{NewComment, NewGossip, Principal, SortKey, VoteKind};
use crate::services::feed::FeedService;
use crate::state::AppState;

/// Query parameters for the feed listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

/// Body for creating a gossip or a comment; both carry the same fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeRequest {
    #[serde(default)]
    pub content: String,
    pub author_id: Option<UserId>,
    pub author_username: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
}

/// Body for casting a vote.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub user_id: Option<UserId>,
    pub vote_type: Option<String>,
}

/// Body for deleting a gossip.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    pub user_id: Option<UserId>,
}

/// Handle `GET /gossips`.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse> {
    let feed = FeedService::new(state.pool(), state.events());
    let sort = SortKey::from_query(query.sort_by.as_deref());
    let gossips = feed.list_gossips(sort).await?;

    Ok(Json(json!({
        "success": true,
        "gossips": gossips,
    })))
}

/// Handle `POST /gossips`.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<ComposeRequest>,
) -> Result<impl IntoResponse> {
    let (author_id, author_username) = require_author(&body)?;

    let feed = FeedService::new(state.pool(), state.events());
    let gossip = feed
        .create_gossip(NewGossip {
            content: body.content,
            author_id,
            author_username,
            is_anonymous: body.is_anonymous,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "gossip": gossip,
        })),
    ))
}

/// Handle `POST /gossips/{id}/vote`.
pub async fn vote(
    State(state): State<AppState>,
    Path(id): Path<GossipId>,
    Json(body): Json<VoteRequest>,
) -> Result<impl IntoResponse> {
    let user_id = body
        .user_id
        .ok_or_else(|| AppError::Validation("userId is required".to_string()))?;
    let kind = body
        .vote_type
        .as_deref()
        .and_then(VoteKind::from_param)
        .ok_or_else(|| {
            AppError::Validation("voteType must be \"up\" or \"down\"".to_string())
        })?;

    let feed = FeedService::new(state.pool(), state.events());
    let tally = feed.vote(id, user_id, kind).await?;

    Ok(Json(json!({
        "success": true,
        "upvotes": tally.upvotes,
        "downvotes": tally.downvotes,
    })))
}

/// Handle `POST /gossips/{id}/comments`.
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<GossipId>,
    Json(body): Json<ComposeRequest>,
) -> Result<impl IntoResponse> {
    let (author_id, author_username) = require_author(&body)?;

    let feed = FeedService::new(state.pool(), state.events());
    let comment = feed
        .add_comment(
            id,
            NewComment {
                content: body.content,
                author_id,
                author_username,
                is_anonymous: body.is_anonymous,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "comment": comment,
        })),
    ))
}

/// Handle `DELETE /gossips/{id}`.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<GossipId>,
    Json(body): Json<DeleteRequest>,
) -> Result<impl IntoResponse> {
    let user_id = body
        .user_id
        .ok_or_else(|| AppError::Validation("userId is required".to_string()))?;
    let principal = Principal::from_claimed_id(user_id);

    let feed = FeedService::new(state.pool(), state.events());
    feed.delete_gossip(id, &principal).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Gossip deleted",
    })))
}

fn require_author(body: &ComposeRequest) -> Result<(UserId, String)> {
    let author_id = body
        .author_id
        .ok_or_else(|| AppError::Validation("authorId is required".to_string()))?;
    let author_username = body
        .author_username
        .clone()
        .ok_or_else(|| AppError::Validation("authorUsername is required".to_string()))?;

    Ok((author_id, author_username))
}
