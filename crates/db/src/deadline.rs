use std::future::Future;
use std::time::Duration;

use crate::error::{Result, StoreError};

/// Upper bound applied to a single store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Duration);

impl Deadline {
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// Run `operation`, failing with [`StoreError::Timeout`] once the limit elapses.
    pub async fn run<T, F>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.0, operation).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(target: "libris-db", limit = ?self.0, "store call timed out");
                Err(StoreError::Timeout(self.0))
            }
        }
    }
}
