//! Route handlers organized by resource

pub mod health;
pub mod posts;
pub mod threads;
