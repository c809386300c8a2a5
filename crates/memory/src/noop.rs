//! No-op recall store — disables memory injection entirely.

use async_trait::async_trait;
use promptloom_core::error::MemoryError;
use promptloom_core::memory::{MemoryEntry, MemoryRecall};

/// A recall store that remembers nothing.
pub struct NoopRecall;

#[async_trait]
impl MemoryRecall for NoopRecall {
    fn name(&self) -> &str {
        "none"
    }

    async fn recall(&self, _query: &str, _limit: usize) -> Result<Vec<MemoryEntry>, MemoryError> {
        Ok(Vec::new())
    }
}
