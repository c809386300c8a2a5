//! In-memory recall store — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use promptloom_core::error::MemoryError;
use promptloom_core::memory::{MemoryEntry, MemoryRecall};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A recall store that keeps entries in a Vec.
/// Useful for testing and sessions where persistence isn't needed.
pub struct InMemoryRecall {
    entries: Arc<RwLock<Vec<MemoryEntry>>>,
}

impl InMemoryRecall {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Add an entry to the store.
    pub async fn insert(&self, entry: MemoryEntry) {
        self.entries.write().await.push(entry);
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for InMemoryRecall {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemoryRecall for InMemoryRecall {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn recall(&self, query: &str, limit: usize) -> Result<Vec<MemoryEntry>, MemoryError> {
        let terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if terms.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let entries = self.entries.read().await;
        let mut results: Vec<MemoryEntry> = entries
            .iter()
            .filter_map(|e| {
                let summary_lower = e.summary.to_lowercase();
                let occurrences: usize = terms
                    .iter()
                    .map(|t| summary_lower.matches(t.as_str()).count())
                    .sum();
                if occurrences == 0 {
                    return None;
                }
                let mut hit = e.clone();
                // Keyword relevance, normalized by summary length
                hit.score = occurrences as f32 / (e.summary.len() as f32 / 100.0).max(1.0);
                Some(hit)
            })
            .collect();

        // Highest score first; equal scores fall back to layer precedence
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.layer.precedence().cmp(&b.layer.precedence()))
        });
        results.truncate(limit);

        debug!(count = results.len(), "Recalled entries from in-memory store");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptloom_core::memory::MemoryLayer;

    #[tokio::test]
    async fn insert_and_recall() {
        let store = InMemoryRecall::new();
        store
            .insert(MemoryEntry::new(
                MemoryLayer::Insight,
                "parser changes need a fuzz pass",
            ))
            .await;
        store
            .insert(MemoryEntry::new(MemoryLayer::Episode, "deployed build 42"))
            .await;

        let results = store.recall("parser review", 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].summary.contains("fuzz"));
        assert!(results[0].score > 0.0);
    }

    #[tokio::test]
    async fn recall_respects_limit() {
        let store = InMemoryRecall::new();
        for i in 0..5 {
            store
                .insert(MemoryEntry::new(
                    MemoryLayer::Trace,
                    format!("build step {i} logged"),
                ))
                .await;
        }

        let results = store.recall("build", 2).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn higher_score_ranks_first() {
        let store = InMemoryRecall::new();
        store
            .insert(MemoryEntry::new(MemoryLayer::Trace, "cache cache cache"))
            .await;
        store
            .insert(MemoryEntry::new(
                MemoryLayer::Trace,
                "cache invalidation is one of the two hard problems in computing",
            ))
            .await;

        let results = store.recall("cache", 10).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].summary, "cache cache cache");
    }

    #[tokio::test]
    async fn empty_query_recalls_nothing() {
        let store = InMemoryRecall::new();
        store
            .insert(MemoryEntry::new(MemoryLayer::Insight, "something"))
            .await;
        assert!(store.recall("   ", 10).await.unwrap().is_empty());
        assert!(store.recall("something", 0).await.unwrap().is_empty());
    }
}
