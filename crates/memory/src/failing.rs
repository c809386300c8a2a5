//! Always-failing recall store.
//!
//! Exists so embedders and the pipeline's own tests can exercise the
//! fail-open contract: a store error must degrade to "no memories this
//! turn", never crash a run.

use async_trait::async_trait;
use promptloom_core::error::MemoryError;
use promptloom_core::memory::{MemoryEntry, MemoryRecall};

/// A recall store whose every recall fails with a storage error.
pub struct FailingRecall {
    reason: String,
}

impl FailingRecall {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl MemoryRecall for FailingRecall {
    fn name(&self) -> &str {
        "failing"
    }

    async fn recall(&self, _query: &str, _limit: usize) -> Result<Vec<MemoryEntry>, MemoryError> {
        Err(MemoryError::Storage(self.reason.clone()))
    }
}
