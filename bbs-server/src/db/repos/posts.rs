//! Post (reply) repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};

use crate::db::DbError;
use crate::models::NewPost;

/// Post record from database
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,
    pub thread_id: i64,
    pub body: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Post repository
pub struct PostRepo<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PostRepo<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Add a reply to a thread.
    ///
    /// The parent thread is not looked up first; the foreign key rejects a
    /// missing thread and that violation becomes [`DbError::ThreadNotFound`].
    pub async fn create(&mut self, thread_id: i64, post: &NewPost) -> Result<Post, DbError> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO bbs_posts (thread_id, body, author)
            VALUES ($1, $2, $3)
            RETURNING id, thread_id, body, author, created_at
            "#,
        )
        .bind(thread_id)
        .bind(post.body())
        .bind(post.author())
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DbError::ThreadNotFound { id: thread_id }
            } else {
                e.into()
            }
        })
    }

    /// All replies for a thread, oldest first.
    pub async fn list_for_thread(&mut self, thread_id: i64) -> Result<Vec<Post>, DbError> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, thread_id, body, author, created_at
            FROM bbs_posts
            WHERE thread_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(thread_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(posts)
    }
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation())
}
