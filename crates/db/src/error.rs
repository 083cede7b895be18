use std::time::Duration;

use thiserror::Error;

/// Outcome of a failed document-store call.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document matches the requested identifier.
    #[error("document not found")]
    NotFound,

    /// The identifier does not have the shape of the store's native key.
    #[error("invalid identifier '{0}'")]
    InvalidId(String),

    #[error("store operation exceeded {0:?} deadline")]
    Timeout(Duration),

    #[error("store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound | StoreError::InvalidId(_))
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
