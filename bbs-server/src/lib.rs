//! bbs-server: bulletin-board HTTP API
//!
//! Threads and replies over JSON, persisted in PostgreSQL.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, Gateway, PoolOptions};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
