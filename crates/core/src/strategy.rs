//! The enhancement strategy contract.
//!
//! A strategy is a named, priority-numbered transform over the assembly
//! output. New pipeline stages are added by implementing this trait, not by
//! modifying the orchestrator.

use crate::context::EnhanceContext;
use crate::error::StrategyError;
use crate::output::AssemblyOutput;
use async_trait::async_trait;

/// One stage of the context-assembly pipeline.
///
/// Stages execute in ascending `priority` order; equal priorities run in
/// registration order. A stage receives the previous stage's output by
/// value and returns a complete replacement — it must never hand back a
/// partially-initialized output. Stages may read the context (including
/// awaiting memory recalls) but never mutate it.
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Unique name, used for unregistration and failure diagnostics.
    fn name(&self) -> &str;

    /// Execution order; lower runs earlier.
    fn priority(&self) -> i32;

    /// Transform the current output. An `Err` means "skip this stage":
    /// the orchestrator logs it and continues with the input unchanged.
    async fn enhance(
        &self,
        output: AssemblyOutput,
        ctx: &EnhanceContext,
    ) -> std::result::Result<AssemblyOutput, StrategyError>;
}
