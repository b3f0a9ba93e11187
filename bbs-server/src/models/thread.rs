//! New thread validation

use super::validation::present;
use super::ValidationError;

const REQUIRED: &[&str] = &["title", "body", "author"];

/// Validated input for a new thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewThread {
    title: String,
    body: String,
    author: String,
}

impl NewThread {
    /// Validate a thread payload.
    ///
    /// # Rules
    /// - `title`, `body` and `author` must all be present
    /// - none of them may be the empty string
    ///
    /// # Example
    /// ```
    /// use bbs_server::models::NewThread;
    ///
    /// assert!(NewThread::new(Some("t".into()), Some("b".into()), Some("a".into())).is_ok());
    /// assert!(NewThread::new(Some("".into()), Some("b".into()), Some("a".into())).is_err());
    /// assert!(NewThread::new(None, Some("b".into()), Some("a".into())).is_err());
    /// ```
    pub fn new(
        title: Option<String>,
        body: Option<String>,
        author: Option<String>,
    ) -> Result<Self, ValidationError> {
        match (present(title), present(body), present(author)) {
            (Some(title), Some(body), Some(author)) => Ok(Self {
                title,
                body,
                author,
            }),
            _ => Err(ValidationError::MissingFields { fields: REQUIRED }),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn author(&self) -> &str {
        &self.author
    }
}
