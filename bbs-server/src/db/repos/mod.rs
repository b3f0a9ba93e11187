//! Repository implementations for database access
//!
//! Each repository borrows a connection checked out of the [`Gateway`](super::Gateway)
//! and follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Parameterized statements only
//! - Constraint violations are translated, not pre-checked

pub mod posts;
pub mod threads;

pub use posts::{Post, PostRepo};
pub use threads::{Thread, ThreadRepo, ThreadSummary};
