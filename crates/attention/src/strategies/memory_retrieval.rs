//! Memory retrieval — recalls and ranks long-term memory for the task.

use async_trait::async_trait;
use promptloom_core::context::EnhanceContext;
use promptloom_core::error::{MemoryError, StrategyError};
use promptloom_core::memory::{MemoryEntry, MemoryRecall};
use promptloom_core::output::AssemblyOutput;
use promptloom_core::strategy::Strategy;
use tracing::{debug, warn};

/// Priority-30 stage: queries the position store and the global store,
/// merges, ranks by abstraction layer, and injects the top entries into the
/// prompt.
///
/// Ranking prefers general knowledge over raw episodes: under a fixed entry
/// budget an Insight beats a Category beats a Trace beats an Episode. Ties
/// within a layer keep store-return order, position store first.
pub struct MemoryRetrieval {
    max_entries: usize,
}

impl MemoryRetrieval {
    pub fn new(max_entries: usize) -> Self {
        Self { max_entries }
    }

    fn drain_result(
        store: &dyn MemoryRecall,
        result: Result<Vec<MemoryEntry>, MemoryError>,
        into: &mut Vec<MemoryEntry>,
    ) {
        match result {
            Ok(mut entries) => into.append(&mut entries),
            Err(e) => {
                warn!(store = store.name(), error = %e, "Memory recall failed; continuing without that store");
            }
        }
    }
}

#[async_trait]
impl Strategy for MemoryRetrieval {
    fn name(&self) -> &str {
        "memory_retrieval"
    }

    fn priority(&self) -> i32 {
        30
    }

    async fn enhance(
        &self,
        output: AssemblyOutput,
        ctx: &EnhanceContext,
    ) -> Result<AssemblyOutput, StrategyError> {
        if self.max_entries == 0 {
            return Ok(output);
        }

        let query = ctx.task.recall_query();
        let (local, global) = tokio::join!(
            ctx.memory.recall(&query, self.max_entries),
            ctx.global_memory.recall(&query, self.max_entries),
        );

        let mut entries: Vec<MemoryEntry> = Vec::new();
        Self::drain_result(ctx.memory.as_ref(), local, &mut entries);
        Self::drain_result(ctx.global_memory.as_ref(), global, &mut entries);

        if entries.is_empty() {
            return Ok(output);
        }

        // Stable sort: ties within a layer keep merge order.
        entries.sort_by_key(|e| e.layer.precedence());
        entries.truncate(self.max_entries);
        debug!(count = entries.len(), "Injecting recalled memories");

        let mut prompt = output.prompt;
        prompt.push_str("\n\n## Recalled Memories\n");
        for entry in &entries {
            prompt.push_str(&format!("- [{}] {}\n", entry.layer.label(), entry.summary));
        }

        Ok(AssemblyOutput {
            prompt: prompt.trim_end().to_string(),
            system_prompt_append: output.system_prompt_append,
            history: output.history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_support::{context_with, store_with};
    use promptloom_core::memory::MemoryLayer;
    use promptloom_memory::FailingRecall;
    use std::sync::Arc;

    #[tokio::test]
    async fn insight_outranks_episode_under_budget() {
        // Episode sits in the position store, Insight in the global store:
        // the ranking that keeps the Insight is the strategy's, not a store's.
        let local = store_with(vec![MemoryEntry::new(
            MemoryLayer::Episode,
            "review run 81 hit a timeout",
        )])
        .await;
        let global = store_with(vec![MemoryEntry::new(
            MemoryLayer::Insight,
            "review large diffs bottom-up",
        )])
        .await;
        let ctx = context_with(|c| {
            c.memory = local.clone();
            c.global_memory = global.clone();
        });

        let out = MemoryRetrieval::new(1)
            .enhance(AssemblyOutput::seed("go"), &ctx)
            .await
            .unwrap();

        assert!(out.prompt.contains("[Insight] review large diffs bottom-up"));
        assert!(!out.prompt.contains("timeout"));
    }

    #[tokio::test]
    async fn merges_both_stores_position_first() {
        let local = store_with(vec![MemoryEntry::new(
            MemoryLayer::Trace,
            "review trace from this position",
        )])
        .await;
        let global = store_with(vec![MemoryEntry::new(
            MemoryLayer::Trace,
            "review trace from the fleet",
        )])
        .await;
        let ctx = context_with(|c| {
            c.memory = local.clone();
            c.global_memory = global.clone();
        });

        let out = MemoryRetrieval::new(8)
            .enhance(AssemblyOutput::seed("go"), &ctx)
            .await
            .unwrap();

        let pos = out.prompt.find("from this position").unwrap();
        let fleet = out.prompt.find("from the fleet").unwrap();
        assert!(pos < fleet, "equal-layer entries must keep merge order");
    }

    #[tokio::test]
    async fn no_matches_leaves_output_unchanged() {
        let ctx = context_with(|_| {});
        let seed = AssemblyOutput::seed("go");
        let out = MemoryRetrieval::new(8)
            .enhance(seed.clone(), &ctx)
            .await
            .unwrap();
        assert_eq!(out, seed);
    }

    #[tokio::test]
    async fn store_failure_degrades_to_no_memories() {
        let global = store_with(vec![MemoryEntry::new(
            MemoryLayer::Insight,
            "review checklists save time",
        )])
        .await;
        let ctx = context_with(|c| {
            c.memory = Arc::new(FailingRecall::new("index offline"));
            c.global_memory = global.clone();
        });

        let out = MemoryRetrieval::new(8)
            .enhance(AssemblyOutput::seed("go"), &ctx)
            .await
            .unwrap();

        // Surviving store still contributes
        assert!(out.prompt.contains("checklists"));
    }

    #[tokio::test]
    async fn zero_budget_is_identity() {
        let store = store_with(vec![MemoryEntry::new(MemoryLayer::Insight, "review tip")]).await;
        let ctx = context_with(|c| c.memory = store.clone());
        let seed = AssemblyOutput::seed("go");
        let out = MemoryRetrieval::new(0)
            .enhance(seed.clone(), &ctx)
            .await
            .unwrap();
        assert_eq!(out, seed);
    }
}
