//! Errors returned by the persistence boundary.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A write was attempted without a signed-in principal
    #[error("authentication required")]
    AuthRequired,

    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed input, e.g. a team id that is not a UUID
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("network error: {0}")]
    Network(String),
}

impl StoreError {
    /// Reads failing this way should yield an empty list, not an error.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Validation(_))
    }

    /// Worth retrying or degrading to a fallback dataset
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }
}
