//! History construction — synthesizes a virtual conversation history.
//!
//! The constructed turns are not a transcript. Two rewrites bias the model
//! toward self-correction and transfer learning:
//!
//! - **Failure erasure**: failed attempts on the position are rendered as
//!   retrospective lessons, never replayed as the literal failing action.
//! - **Prophet perspective**: insights gathered by *other* positions of the
//!   same role are voiced as the agent's own prior knowledge, giving the
//!   illusion of continuity across independent runs.

use async_trait::async_trait;
use promptloom_core::context::EnhanceContext;
use promptloom_core::error::StrategyError;
use promptloom_core::memory::{MemoryEntry, MemoryLayer};
use promptloom_core::output::{AssemblyOutput, ConversationTurn};
use promptloom_core::strategy::Strategy;
use tracing::{debug, warn};

/// Priority-40 stage: builds the synthetic history, capped at `max_turns`
/// (oldest dropped first). Leaves `history` untouched when no qualifying
/// material exists.
pub struct HistoryConstruction {
    max_turns: usize,
}

impl HistoryConstruction {
    pub fn new(max_turns: usize) -> Self {
        Self { max_turns }
    }

    /// Insight-layer entries from the global store, voiced later as the
    /// agent's own prior knowledge. A store failure degrades to none.
    async fn cross_position_insights(&self, ctx: &EnhanceContext) -> Vec<MemoryEntry> {
        match ctx
            .global_memory
            .recall(&ctx.task.recall_query(), self.max_turns)
            .await
        {
            Ok(entries) => entries
                .into_iter()
                .filter(|e| e.layer == MemoryLayer::Insight)
                .collect(),
            Err(e) => {
                warn!(store = ctx.global_memory.name(), error = %e, "Insight recall failed; constructing history without it");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl Strategy for HistoryConstruction {
    fn name(&self) -> &str {
        "history_construction"
    }

    fn priority(&self) -> i32 {
        40
    }

    async fn enhance(
        &self,
        output: AssemblyOutput,
        ctx: &EnhanceContext,
    ) -> Result<AssemblyOutput, StrategyError> {
        if self.max_turns == 0 {
            return Ok(output);
        }

        let mut turns: Vec<ConversationTurn> = Vec::new();

        for failure in &ctx.position.failures {
            turns.push(ConversationTurn::user(format!(
                "Earlier you attempted \"{}\". What did you take away from that?",
                failure.attempt,
            )));
            turns.push(ConversationTurn::assistant(format!(
                "That attempt fell short — {}. Lesson learned: I will check the preconditions \
                 and take a different route this time instead of repeating it.",
                failure.error,
            )));
        }

        let insights = self.cross_position_insights(ctx).await;
        if !insights.is_empty() {
            turns.push(ConversationTurn::user(
                "What do you already know that applies to this task?",
            ));
            let mut body = String::from("From my accumulated experience:\n");
            for insight in &insights {
                body.push_str(&format!("- {}\n", insight.summary));
            }
            turns.push(ConversationTurn::assistant(body.trim_end().to_string()));
        }

        if turns.is_empty() {
            return Ok(output);
        }

        let AssemblyOutput {
            prompt,
            system_prompt_append,
            history,
        } = output;

        let mut history = history.unwrap_or_default();
        history.extend(turns);
        if history.len() > self.max_turns {
            let excess = history.len() - self.max_turns;
            history.drain(..excess);
            debug!(dropped = excess, "Capped synthetic history at max turns");
        }

        Ok(AssemblyOutput {
            prompt,
            system_prompt_append,
            history: Some(history),
        })
    }
}
