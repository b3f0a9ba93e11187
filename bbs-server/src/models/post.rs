//! New post (reply) validation

use super::validation::present;
use super::ValidationError;

const REQUIRED: &[&str] = &["body", "author"];

/// Validated input for a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    body: String,
    author: String,
}

impl NewPost {
    /// Validate a reply payload. Both `body` and `author` must be present and non-empty.
    pub fn new(body: Option<String>, author: Option<String>) -> Result<Self, ValidationError> {
        match (present(body), present(author)) {
            (Some(body), Some(author)) => Ok(Self { body, author }),
            _ => Err(ValidationError::MissingFields { fields: REQUIRED }),
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn author(&self) -> &str {
        &self.author
    }
}
