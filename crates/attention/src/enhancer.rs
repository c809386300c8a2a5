//! The attention enhancer — owns the strategy registry and runs the pipeline.

use crate::config::EnhancerConfig;
use crate::strategies::{
    ContextBudget, HistoryConstruction, MemoryRetrieval, RoleFraming, WorkflowInjection,
};
use promptloom_core::context::EnhanceContext;
use promptloom_core::output::AssemblyOutput;
use promptloom_core::strategy::Strategy;
use std::sync::Arc;
use tracing::{debug, warn};

/// A registry entry. `seq` is a monotonically increasing insertion counter
/// used as the secondary sort key after priority, so equal-priority
/// strategies always run in registration order.
struct Registered {
    strategy: Arc<dyn Strategy>,
    seq: u64,
}

/// Runs registered strategies in ascending priority order, folding the
/// assembly output through each one.
///
/// The pipeline is fail-open: a stage that errors is logged by name and
/// skipped, and the fold continues with the last good output. `enhance`
/// never fails and always returns a well-formed output.
///
/// Registration is `&mut self` while `enhance` is `&self` — the borrow
/// checker enforces that registry mutation happens outside concurrent
/// pipeline runs.
pub struct AttentionEnhancer {
    registry: Vec<Registered>,
    next_seq: u64,
}

impl AttentionEnhancer {
    /// An enhancer with an empty strategy set.
    pub fn new() -> Self {
        Self {
            registry: Vec::new(),
            next_seq: 0,
        }
    }

    /// An enhancer with the five built-in strategies registered at
    /// priorities 10 through 50.
    pub fn with_default_strategies(config: &EnhancerConfig) -> Self {
        let mut enhancer = Self::new();
        enhancer.register(Arc::new(RoleFraming));
        enhancer.register(Arc::new(WorkflowInjection::new(
            config.workflow_change_capability.clone(),
        )));
        enhancer.register(Arc::new(MemoryRetrieval::new(config.max_memory_entries)));
        enhancer.register(Arc::new(HistoryConstruction::new(config.max_history_turns)));
        enhancer.register(Arc::new(ContextBudget::new(config.max_tokens)));
        enhancer
    }

    /// Register a strategy. Registering a name that is already present
    /// replaces the prior registration.
    pub fn register(&mut self, strategy: Arc<dyn Strategy>) {
        self.registry
            .retain(|r| r.strategy.name() != strategy.name());
        let seq = self.next_seq;
        self.next_seq += 1;
        self.registry.push(Registered { strategy, seq });
        self.registry
            .sort_by_key(|r| (r.strategy.priority(), r.seq));
    }

    /// Remove every strategy registered under `name`. Unknown names are a
    /// no-op.
    pub fn unregister(&mut self, name: &str) {
        self.registry.retain(|r| r.strategy.name() != name);
    }

    /// Snapshot of the registered strategies in execution order. Mutating
    /// the returned sequence does not affect the registry.
    pub fn strategies(&self) -> Vec<Arc<dyn Strategy>> {
        self.registry
            .iter()
            .map(|r| Arc::clone(&r.strategy))
            .collect()
    }

    /// Run the pipeline over `prompt` for one context.
    pub async fn enhance(&self, prompt: impl Into<String>, ctx: &EnhanceContext) -> AssemblyOutput {
        let mut output = AssemblyOutput::seed(prompt);
        for reg in &self.registry {
            let name = reg.strategy.name();
            match reg.strategy.enhance(output.clone(), ctx).await {
                Ok(next) => {
                    debug!(strategy = name, "Enhancement stage applied");
                    output = next;
                }
                Err(e) => {
                    warn!(strategy = name, error = %e, "Enhancement stage failed; skipping");
                }
            }
        }
        output
    }
}

impl Default for AttentionEnhancer {
    fn default() -> Self {
        Self::new()
    }
}
