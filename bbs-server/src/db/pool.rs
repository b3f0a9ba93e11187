//! Connection gateway over a PostgreSQL pool
//!
//! The pool is built once at startup and drained on shutdown. Everything in
//! between goes through [`Gateway::acquire`], which hands out a pooled
//! connection that returns itself to the pool when dropped.

use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Postgres;

use super::DbError;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// How long a request waits for a free connection before giving up.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// A connection checked out of the pool. Released on drop.
pub type Connection = PoolConnection<Postgres>;

/// Pool sizing and wait budget
#[derive(Debug, Clone, Copy)]
pub struct PoolOptions {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

impl PoolOptions {
    fn builder(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Handle to the process-wide connection pool.
///
/// Cloning is cheap; all clones share the same pool.
#[derive(Debug, Clone)]
pub struct Gateway {
    pool: PgPool,
}

impl Gateway {
    /// Create the pool and open an initial connection.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Connection`] if the store cannot be reached.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let gateway = Gateway::connect("postgres://localhost/bbs", PoolOptions::default()).await?;
    /// ```
    pub async fn connect(database_url: &str, options: PoolOptions) -> Result<Self, DbError> {
        let pool = options
            .builder()
            .connect(database_url)
            .await
            .map_err(DbError::Connection)?;

        tracing::debug!(max_connections = options.max_connections, "connection pool ready");
        Ok(Self { pool })
    }

    /// Create the pool without connecting. The first [`acquire`](Self::acquire)
    /// opens the first connection.
    pub fn connect_lazy(database_url: &str, options: PoolOptions) -> Result<Self, DbError> {
        let pool = options
            .builder()
            .connect_lazy(database_url)
            .map_err(DbError::Connection)?;

        Ok(Self { pool })
    }

    /// Check out a connection, waiting up to the acquire timeout.
    pub async fn acquire(&self) -> Result<Connection, DbError> {
        self.pool.acquire().await.map_err(DbError::Connection)
    }

    /// Number of connections currently idle in the pool.
    pub fn idle_connections(&self) -> usize {
        self.pool.num_idle()
    }

    /// Close the pool, waiting for checked-out connections to come back.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p bbs-server -- --ignored

    fn database_url() -> String {
        std::env::var("DATABASE_URL").expect("DATABASE_URL required")
    }

    #[test]
    fn default_options() {
        let options = PoolOptions::default();
        assert_eq!(options.max_connections, 10);
        assert_eq!(options.acquire_timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn lazy_gateway_does_not_connect() {
        let gateway =
            Gateway::connect_lazy("postgres://bbs@127.0.0.1:1/bbs", PoolOptions::default())
                .expect("lazy pool");
        assert_eq!(gateway.idle_connections(), 0);
    }

    #[tokio::test]
    async fn lazy_gateway_rejects_malformed_url() {
        let result = Gateway::connect_lazy("not a url", PoolOptions::default());
        assert!(matches!(result, Err(DbError::Connection(_))));
    }

    #[tokio::test]
    async fn acquire_times_out_when_store_is_unreachable() {
        let options = PoolOptions {
            max_connections: 1,
            acquire_timeout: Duration::from_millis(200),
        };
        let gateway = Gateway::connect_lazy("postgres://bbs@127.0.0.1:1/bbs", options)
            .expect("lazy pool");

        assert!(matches!(
            gateway.acquire().await,
            Err(DbError::Connection(_))
        ));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn connection_returns_to_pool_on_drop() {
        let options = PoolOptions {
            max_connections: 1,
            acquire_timeout: Duration::from_secs(1),
        };
        let gateway = Gateway::connect(&database_url(), options)
            .await
            .expect("pool creation failed");

        {
            let mut conn = gateway.acquire().await.expect("first acquire");
            let result: (i32,) = sqlx::query_as("SELECT 1")
                .fetch_one(&mut *conn)
                .await
                .expect("query failed");
            assert_eq!(result.0, 1);
        }

        // With a single-connection pool this only succeeds if the first one came back.
        gateway.acquire().await.expect("second acquire");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn connection_returns_to_pool_after_failed_statement() {
        let options = PoolOptions {
            max_connections: 1,
            acquire_timeout: Duration::from_secs(1),
        };
        let gateway = Gateway::connect(&database_url(), options)
            .await
            .expect("pool creation failed");

        let failed: Result<(), DbError> = async {
            let mut conn = gateway.acquire().await?;
            sqlx::query("SELECT * FROM no_such_table")
                .execute(&mut *conn)
                .await?;
            Ok(())
        }
        .await;
        assert!(matches!(failed, Err(DbError::Query(_))));

        gateway.acquire().await.expect("acquire after failure");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_acquire() {
        let gateway = Gateway::connect(&database_url(), PoolOptions::default())
            .await
            .expect("pool creation failed");

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let gateway = gateway.clone();
                tokio::spawn(async move {
                    let mut conn = gateway.acquire().await.expect("acquire failed");
                    let result: (i32,) = sqlx::query_as("SELECT $1::int")
                        .bind(i)
                        .fetch_one(&mut *conn)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i32);
        }

        gateway.close().await;
    }
}
