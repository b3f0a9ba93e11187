//! Reply endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Post, PostRepo};
use crate::http::error::ApiError;
use crate::http::extractors::ThreadId;
use crate::http::server::AppState;
use crate::models::NewPost;

/// Create post request
#[derive(Debug, Default, Deserialize)]
pub struct CreatePostRequest {
    pub body: Option<String>,
    pub author: Option<String>,
}

/// Post response
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub thread_id: i64,
    pub body: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            thread_id: p.thread_id,
            body: p.body,
            author: p.author,
            created_at: p.created_at,
        }
    }
}

/// POST /threads/{id}/posts - reply to a thread
async fn create_post(
    State(state): State<Arc<AppState>>,
    ThreadId(thread_id): ThreadId,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let req = payload.map(|Json(req)| req).unwrap_or_else(|rejection| {
        tracing::debug!(%rejection, thread_id, "unreadable post payload");
        CreatePostRequest::default()
    });
    let new_post = NewPost::new(req.body, req.author)?;

    let mut conn = state.gateway.acquire().await?;
    let post = PostRepo::new(&mut conn).create(thread_id, &new_post).await?;
    tracing::debug!(thread_id, post_id = post.id, "reply created");

    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// Post routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/threads/{id}/posts", post(create_post))
}
