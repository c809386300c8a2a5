//! Assembly output and conversation-turn value objects.
//!
//! `AssemblyOutput` is the accumulator threaded through the enhancement
//! pipeline: each stage receives the previous instance by value and returns
//! a new one. It has no existence outside a single `enhance` run.

use serde::{Deserialize, Serialize};

/// The role of a synthetic conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The end user
    User,
    /// The AI assistant
    Assistant,
}

/// A single turn in the synthetic conversation history.
///
/// Ordering is chronological: first-to-last = oldest-to-newest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who speaks in this turn
    pub role: TurnRole,

    /// The text content
    pub content: String,
}

impl ConversationTurn {
    /// Create a new user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    /// Create a new assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// The evolving context handed to the model-invocation layer.
///
/// `history: None` means "no synthetic history for this run". An empty
/// vector means a history was constructed and then emptied (e.g. by budget
/// trimming) — callers treat both as "nothing to prepend", but the two are
/// deliberately distinguishable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyOutput {
    /// The prompt text sent as the current user message.
    pub prompt: String,

    /// Text appended to the role's system prompt.
    pub system_prompt_append: String,

    /// Synthetic multi-turn history prepended before the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<ConversationTurn>>,
}

impl AssemblyOutput {
    /// The initial accumulator for a pipeline run.
    pub fn seed(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt_append: String::new(),
            history: None,
        }
    }

    /// Number of history turns, treating absence as zero.
    pub fn history_len(&self) -> usize {
        self.history.as_ref().map_or(0, Vec::len)
    }
}
