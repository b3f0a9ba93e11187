//! Database layer - connection gateway, schema and repositories
//!
//! # Design Principles
//!
//! - Handlers never see the pool, only a scoped connection from [`Gateway::acquire`]
//! - A connection goes back to the pool when it is dropped, on every exit path
//! - List operations use JOINs - no N+1 queries
//! - Rely on DB constraints, translate violations - no check-then-insert

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{Connection, Gateway, PoolOptions};
pub use repos::*;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Store unreachable, pool closed, or acquire timed out
    #[error("connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Statement rejected by the store
    #[error("query error: {0}")]
    Query(#[source] sqlx::Error),

    #[error("thread {id} not found")]
    ThreadNotFound { id: i64 },
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Connection(e),
            _ => Self::Query(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_failures_are_connection_errors() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::Connection(_)
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::Connection(_)
        ));
    }

    #[test]
    fn statement_failures_are_query_errors() {
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::Query(_)
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::Protocol("unexpected message".into())),
            DbError::Query(_)
        ));
    }
}
