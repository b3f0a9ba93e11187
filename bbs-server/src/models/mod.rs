//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod post;
pub mod thread;
pub mod validation;

pub use post::NewPost;
pub use thread::NewThread;
pub use validation::ValidationError;
