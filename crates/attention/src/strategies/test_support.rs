//! Shared test fixtures for strategy tests.

use promptloom_core::context::{EnhanceContext, Position, RoleTemplate, Task};
use promptloom_core::memory::MemoryEntry;
use promptloom_memory::{InMemoryRecall, NoopRecall};
use std::sync::Arc;

/// A reviewer context over no-op stores; `f` customizes it.
pub fn context_with(f: impl FnOnce(&mut EnhanceContext)) -> EnhanceContext {
    let mut ctx = EnhanceContext::new(
        Position::new("reviewer"),
        RoleTemplate::new("reviewer", "Be precise."),
        Task::new("review", "check the parser changes"),
        Arc::new(NoopRecall),
        Arc::new(NoopRecall),
    );
    f(&mut ctx);
    ctx
}

/// An in-memory store seeded with `entries`.
pub async fn store_with(entries: Vec<MemoryEntry>) -> Arc<InMemoryRecall> {
    let store = InMemoryRecall::new();
    for entry in entries {
        store.insert(entry).await;
    }
    Arc::new(store)
}
