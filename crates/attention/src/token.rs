//! Token estimation utilities.
//!
//! Uses a character-based heuristic: ~4 characters per token.
//! This approximation is accurate within ~10% for BPE tokenizers
//! on English text. The budget stage needs a deterministic estimate,
//! not an exact count, so no real tokenizer is involved.

use promptloom_core::output::{AssemblyOutput, ConversationTurn};

/// Per-turn overhead for role name, delimiters, and wire-format markers.
pub const TURN_OVERHEAD: usize = 4;

/// Estimate the token count for a string.
///
/// Heuristic: 1 token ≈ 4 characters. Rounds up.
pub fn estimate_tokens(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    text.len().div_ceil(4)
}

/// Estimate tokens for a single history turn including per-turn overhead.
pub fn estimate_turn_tokens(turn: &ConversationTurn) -> usize {
    TURN_OVERHEAD + estimate_tokens(&turn.content)
}

/// Estimate total tokens for an assembled output: prompt, system-prompt
/// addendum, and every history turn.
pub fn estimate_output_tokens(output: &AssemblyOutput) -> usize {
    let history: usize = output
        .history
        .iter()
        .flatten()
        .map(estimate_turn_tokens)
        .sum();
    estimate_tokens(&output.prompt) + estimate_tokens(&output.system_prompt_append) + history
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_zero() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn four_chars_is_one_token() {
        assert_eq!(estimate_tokens("test"), 1);
    }

    #[test]
    fn five_chars_rounds_up() {
        assert_eq!(estimate_tokens("hello"), 2);
    }

    #[test]
    fn turn_includes_overhead() {
        let turn = ConversationTurn::user("test"); // 4 chars → 1 token + 4 overhead
        assert_eq!(estimate_turn_tokens(&turn), 5);
    }

    #[test]
    fn output_sums_all_parts() {
        let out = AssemblyOutput {
            prompt: "a".repeat(40),               // 10
            system_prompt_append: "b".repeat(20), // 5
            history: Some(vec![ConversationTurn::user("hello")]), // 2 + 4
        };
        assert_eq!(estimate_output_tokens(&out), 21);
    }

    #[test]
    fn absent_history_costs_nothing() {
        let out = AssemblyOutput::seed("abcd");
        assert_eq!(estimate_output_tokens(&out), 1);
    }
}
