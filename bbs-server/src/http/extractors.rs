//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;

/// Extract and validate an integer thread id from path
pub struct ThreadId(pub i64);

impl<S> FromRequestParts<S> for ThreadId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidId { raw: String::new() })?;

        raw.parse::<i64>()
            .map(Self)
            .map_err(|_| ApiError::InvalidId { raw })
    }
}
