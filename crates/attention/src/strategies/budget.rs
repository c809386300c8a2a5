//! Context budget — estimates token cost and trims least-valuable content.

use crate::token;
use async_trait::async_trait;
use promptloom_core::context::EnhanceContext;
use promptloom_core::error::StrategyError;
use promptloom_core::output::AssemblyOutput;
use promptloom_core::strategy::Strategy;
use tracing::debug;

/// Appended to a truncated prompt so the model and any downstream auditor
/// can see content was cut.
pub const TRUNCATION_NOTICE: &str = "\n[context truncated to fit token budget]";

/// Priority-50 stage. Runs after every other stage so it sees the
/// fully-assembled content.
///
/// Trimming order, least valuable first: oldest history turns one at a
/// time, then the prompt tail. The system-prompt addendum is never
/// truncated; when it alone exceeds the budget the result legitimately
/// stays over budget.
pub struct ContextBudget {
    max_tokens: usize,
}

impl ContextBudget {
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }
}

#[async_trait]
impl Strategy for ContextBudget {
    fn name(&self) -> &str {
        "context_budget"
    }

    fn priority(&self) -> i32 {
        50
    }

    async fn enhance(
        &self,
        output: AssemblyOutput,
        _ctx: &EnhanceContext,
    ) -> Result<AssemblyOutput, StrategyError> {
        let mut output = output;
        if token::estimate_output_tokens(&output) <= self.max_tokens {
            return Ok(output);
        }

        // Oldest history turns go first, re-estimating after each drop.
        let mut dropped = 0usize;
        loop {
            if token::estimate_output_tokens(&output) <= self.max_tokens {
                break;
            }
            match output.history.as_mut() {
                Some(history) if !history.is_empty() => {
                    history.remove(0);
                    dropped += 1;
                }
                _ => break,
            }
        }
        if dropped > 0 {
            debug!(dropped, "Dropped oldest history turns to fit token budget");
        }
        if token::estimate_output_tokens(&output) <= self.max_tokens {
            return Ok(output);
        }

        // Still over: truncate the prompt to the remaining allowance.
        let fixed = token::estimate_output_tokens(&output) - token::estimate_tokens(&output.prompt);
        let notice_tokens = token::estimate_tokens(TRUNCATION_NOTICE);
        let allowance_chars = self.max_tokens.saturating_sub(fixed + notice_tokens) * 4;

        let mut cut = allowance_chars.min(output.prompt.len());
        while cut > 0 && !output.prompt.is_char_boundary(cut) {
            cut -= 1;
        }
        debug!(
            kept_chars = cut,
            cut_chars = output.prompt.len() - cut,
            "Truncated prompt to fit token budget"
        );
        output.prompt.truncate(cut);
        output.prompt.push_str(TRUNCATION_NOTICE);

        Ok(output)
    }
}
