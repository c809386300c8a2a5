//! Attention enhancement pipeline — the core architectural component.
//!
//! Assembles the prompt, system-prompt addendum, and synthetic conversation
//! history handed to an LLM-driven agent before each invocation. Five
//! independent concerns are composed deterministically, none knowing about
//! the others:
//!
//! | Priority | Stage | Concern |
//! |----------|-------|---------|
//! | 10 | Role framing | role addendum, assignment summary, todos |
//! | 20 | Workflow injection | the agent's own workflow source |
//! | 30 | Memory retrieval | layered long-term memory recall |
//! | 40 | History construction | failure erasure + cross-position insights |
//! | 50 | Context budget | token estimation and truncation |
//!
//! The orchestrator folds the assembly output through the strategies in
//! ascending priority order, so budgeting always sees the fully-assembled
//! content. A failing stage is logged and skipped — the pipeline trades
//! completeness for availability and always returns a usable output.
//!
//! # Example
//!
//! ```no_run
//! use promptloom_attention::{AttentionEnhancer, EnhancerConfig};
//! use promptloom_core::{EnhanceContext, Position, RoleTemplate, Task};
//! # use promptloom_core::{MemoryRecall, MemoryEntry, MemoryError};
//! # use std::sync::Arc;
//! # struct Store;
//! # #[async_trait::async_trait]
//! # impl MemoryRecall for Store {
//! #     fn name(&self) -> &str { "store" }
//! #     async fn recall(&self, _q: &str, _l: usize) -> Result<Vec<MemoryEntry>, MemoryError> { Ok(vec![]) }
//! # }
//!
//! # async fn run() {
//! let enhancer = AttentionEnhancer::with_default_strategies(&EnhancerConfig::default());
//! let ctx = EnhanceContext::new(
//!     Position::new("builder"),
//!     RoleTemplate::new("builder", "Ship small, tested changes."),
//!     Task::new("implement", "add retry to the fetcher"),
//!     Arc::new(Store),
//!     Arc::new(Store),
//! );
//! let output = enhancer.enhance("Start the task.", &ctx).await;
//! # }
//! ```

pub mod config;
pub mod enhancer;
pub mod strategies;
pub mod token;

pub use config::EnhancerConfig;
pub use enhancer::AttentionEnhancer;
pub use strategies::{
    ContextBudget, HistoryConstruction, MemoryRetrieval, RoleFraming, TRUNCATION_NOTICE,
    WorkflowInjection,
};
