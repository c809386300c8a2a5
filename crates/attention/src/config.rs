//! Pipeline tunables.

use promptloom_core::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the built-in strategy set.
///
/// Deserializable from TOML so embedders can ship it alongside the rest of
/// their configuration:
///
/// ```toml
/// max_memory_entries = 8
/// max_history_turns = 12
/// max_tokens = 4096
/// workflow_change_capability = "request_workflow_change"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnhancerConfig {
    /// Most memory entries injected per run, across both stores.
    pub max_memory_entries: usize,

    /// Most synthetic history turns kept per run.
    pub max_history_turns: usize,

    /// Token budget for the assembled output.
    pub max_tokens: usize,

    /// Name of the capability the agent invokes to propose a change to its
    /// own workflow.
    pub workflow_change_capability: String,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            max_memory_entries: 8,
            max_history_turns: 12,
            max_tokens: 4096,
            workflow_change_capability: "request_workflow_change".into(),
        }
    }
}

impl EnhancerConfig {
    /// Parse a config from a TOML document. Missing keys take their
    /// defaults; unknown keys are rejected.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config {
            message: e.to_string(),
        })
    }
}
