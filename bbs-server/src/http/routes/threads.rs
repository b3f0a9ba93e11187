//! Thread endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::posts::PostResponse;
use crate::db::repos::{PostRepo, Thread, ThreadRepo, ThreadSummary};
use crate::http::error::ApiError;
use crate::http::extractors::ThreadId;
use crate::http::server::AppState;
use crate::models::NewThread;

/// Create thread request
#[derive(Debug, Default, Deserialize)]
pub struct CreateThreadRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub author: Option<String>,
}

/// Thread response
#[derive(Debug, Serialize)]
pub struct ThreadResponse {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl From<Thread> for ThreadResponse {
    fn from(t: Thread) -> Self {
        Self {
            id: t.id,
            title: t.title,
            body: t.body,
            author: t.author,
            created_at: t.created_at,
        }
    }
}

/// One row of the thread list
#[derive(Debug, Serialize)]
pub struct ThreadSummaryResponse {
    pub thread_id: i64,
    pub title: String,
    pub thread_author: String,
    pub thread_created_at: DateTime<Utc>,
    pub reply_count: i64,
}

impl From<ThreadSummary> for ThreadSummaryResponse {
    fn from(t: ThreadSummary) -> Self {
        Self {
            thread_id: t.thread_id,
            title: t.title,
            thread_author: t.thread_author,
            thread_created_at: t.thread_created_at,
            reply_count: t.reply_count,
        }
    }
}

/// Thread with its replies
#[derive(Debug, Serialize)]
pub struct ThreadDetailResponse {
    pub thread: ThreadResponse,
    pub posts: Vec<PostResponse>,
}

/// GET /threads - list threads with reply counts, newest first
async fn list_threads(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ThreadSummaryResponse>>, ApiError> {
    let mut conn = state.gateway.acquire().await?;
    let threads = ThreadRepo::new(&mut conn).list_with_reply_counts().await?;

    Ok(Json(
        threads.into_iter().map(ThreadSummaryResponse::from).collect(),
    ))
}

/// POST /threads - create a new thread
async fn create_thread(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateThreadRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ThreadResponse>), ApiError> {
    // An unreadable body is treated like an empty one: every field is missing.
    let req = payload.map(|Json(req)| req).unwrap_or_else(|rejection| {
        tracing::debug!(%rejection, "unreadable thread payload");
        CreateThreadRequest::default()
    });
    let new_thread = NewThread::new(req.title, req.body, req.author)?;

    let mut conn = state.gateway.acquire().await?;
    let thread = ThreadRepo::new(&mut conn).create(&new_thread).await?;
    tracing::debug!(thread_id = thread.id, "thread created");

    Ok((StatusCode::CREATED, Json(ThreadResponse::from(thread))))
}

/// GET /threads/{id} - a thread and its replies, oldest reply first
async fn get_thread(
    State(state): State<Arc<AppState>>,
    ThreadId(id): ThreadId,
) -> Result<Json<ThreadDetailResponse>, ApiError> {
    let mut conn = state.gateway.acquire().await?;
    let thread = ThreadRepo::new(&mut conn).get(id).await?;
    let posts = PostRepo::new(&mut conn).list_for_thread(id).await?;

    Ok(Json(ThreadDetailResponse {
        thread: ThreadResponse::from(thread),
        posts: posts.into_iter().map(PostResponse::from).collect(),
    }))
}

/// Thread routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/threads", get(list_threads).post(create_thread))
        .route("/threads/{id}", get(get_thread))
}
