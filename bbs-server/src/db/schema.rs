//! Schema bootstrap for the thread and post tables

use super::{DbError, Gateway};

const STATEMENTS: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS bbs_threads (
        id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
        title TEXT NOT NULL,
        body TEXT NOT NULL,
        author TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bbs_posts (
        id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
        thread_id BIGINT NOT NULL REFERENCES bbs_threads(id),
        body TEXT NOT NULL,
        author TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS bbs_posts_thread_id_idx ON bbs_posts (thread_id)",
];

/// Create the tables if they are missing. Safe to run on every startup.
pub async fn ensure(gateway: &Gateway) -> Result<(), DbError> {
    tracing::info!("Ensuring bbs schema...");

    let mut conn = gateway.acquire().await?;
    for statement in STATEMENTS {
        sqlx::query(statement).execute(&mut *conn).await?;
    }

    tracing::info!("bbs schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::PoolOptions;

    #[test]
    fn statements_are_idempotent() {
        for statement in STATEMENTS {
            assert!(statement.contains("IF NOT EXISTS"), "{statement}");
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ensure_twice() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let gateway = Gateway::connect(&url, PoolOptions::default())
            .await
            .expect("pool creation failed");

        ensure(&gateway).await.expect("first run");
        ensure(&gateway).await.expect("second run");
    }
}
