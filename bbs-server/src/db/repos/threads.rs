//! Thread repository
//!
//! Handles thread creation, lookup, and the list view with reply counts.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};

use crate::db::DbError;
use crate::models::NewThread;

/// Thread record from database
#[derive(Debug, Clone, FromRow)]
pub struct Thread {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Thread with reply count for list display
#[derive(Debug, Clone, FromRow)]
pub struct ThreadSummary {
    pub thread_id: i64,
    pub title: String,
    pub thread_author: String,
    pub thread_created_at: DateTime<Utc>,
    pub reply_count: i64,
}

/// Thread repository
pub struct ThreadRepo<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> ThreadRepo<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// List every thread with its reply count, newest first.
    ///
    /// LEFT JOIN so threads without replies report a count of 0.
    pub async fn list_with_reply_counts(&mut self) -> Result<Vec<ThreadSummary>, DbError> {
        let threads = sqlx::query_as::<_, ThreadSummary>(
            r#"
            SELECT
                t.id          AS thread_id,
                t.title,
                t.author      AS thread_author,
                t.created_at  AS thread_created_at,
                COUNT(p.id)   AS reply_count
            FROM bbs_threads t
            LEFT JOIN bbs_posts p ON p.thread_id = t.id
            GROUP BY t.id
            ORDER BY t.created_at DESC, t.id DESC
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(threads)
    }

    /// Insert a thread; id and created_at come from the store.
    pub async fn create(&mut self, thread: &NewThread) -> Result<Thread, DbError> {
        let thread = sqlx::query_as::<_, Thread>(
            r#"
            INSERT INTO bbs_threads (title, body, author)
            VALUES ($1, $2, $3)
            RETURNING id, title, body, author, created_at
            "#,
        )
        .bind(thread.title())
        .bind(thread.body())
        .bind(thread.author())
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(thread)
    }

    /// Get a single thread by ID.
    pub async fn get(&mut self, id: i64) -> Result<Thread, DbError> {
        sqlx::query_as::<_, Thread>(
            r#"
            SELECT id, title, body, author, created_at
            FROM bbs_threads
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or(DbError::ThreadNotFound { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{schema, Gateway, PoolOptions};

    async fn gateway() -> Gateway {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let gateway = Gateway::connect(&url, PoolOptions::default())
            .await
            .expect("pool creation failed");
        schema::ensure(&gateway).await.expect("schema");
        gateway
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_get() {
        let gateway = gateway().await;
        let mut conn = gateway.acquire().await.unwrap();
        let mut repo = ThreadRepo::new(&mut conn);

        let input = NewThread::new(Some("t".into()), Some("b".into()), Some("a".into())).unwrap();
        let created = repo.create(&input).await.unwrap();
        let fetched = repo.get(created.id).await.unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.title, "t");
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn get_missing_is_not_found() {
        let gateway = gateway().await;
        let mut conn = gateway.acquire().await.unwrap();

        let err = ThreadRepo::new(&mut conn).get(i64::MAX).await.unwrap_err();
        assert!(matches!(err, DbError::ThreadNotFound { id } if id == i64::MAX));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn new_thread_lists_with_zero_replies() {
        let gateway = gateway().await;
        let mut conn = gateway.acquire().await.unwrap();
        let mut repo = ThreadRepo::new(&mut conn);

        let input = NewThread::new(Some("zero".into()), Some("b".into()), Some("a".into())).unwrap();
        let created = repo.create(&input).await.unwrap();
        let listed: Vec<_> = repo
            .list_with_reply_counts()
            .await
            .unwrap()
            .into_iter()
            .filter(|t| t.thread_id == created.id)
            .collect();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].reply_count, 0);
        assert_eq!(listed[0].thread_author, "a");
    }
}
