//! Memory read contract — layered recall of long-term knowledge.
//!
//! The pipeline only *reads* memory. Storage, indexing, and consolidation
//! live behind the [`MemoryRecall`] trait; implementations are provided by
//! the `promptloom-memory` crate or by the embedding application.
//!
//! Entries carry an abstraction layer, from most general to most specific:
//! Insight > Category > Trace > Episode. Under a fixed entry budget the
//! pipeline prefers generalized knowledge — abstractions are cheaper in
//! tokens and more broadly applicable than raw episodic traces.

use crate::error::MemoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Abstraction layer of a stored memory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryLayer {
    /// Distilled cross-task knowledge — most general
    Insight,
    /// Grouped patterns over repeated traces
    Category,
    /// A single reasoning/action trace
    Trace,
    /// A raw recorded occurrence — most specific
    Episode,
}

impl MemoryLayer {
    /// Strict ranking precedence: lower ranks earlier.
    /// Insight (0) outranks Category (1) outranks Trace (2) outranks Episode (3).
    pub fn precedence(&self) -> u8 {
        match self {
            MemoryLayer::Insight => 0,
            MemoryLayer::Category => 1,
            MemoryLayer::Trace => 2,
            MemoryLayer::Episode => 3,
        }
    }

    /// Human-readable label used when rendering recall blocks.
    pub fn label(&self) -> &'static str {
        match self {
            MemoryLayer::Insight => "Insight",
            MemoryLayer::Category => "Category",
            MemoryLayer::Trace => "Trace",
            MemoryLayer::Episode => "Episode",
        }
    }
}

/// A single recalled memory entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Unique ID for this memory
    pub id: String,

    /// Abstraction layer of this entry
    pub layer: MemoryLayer,

    /// Condensed content of the memory
    pub summary: String,

    /// Relevance score (set by recall operations)
    #[serde(default)]
    pub score: f32,

    /// When this memory was created
    pub created_at: DateTime<Utc>,
}

impl MemoryEntry {
    /// Create a new entry with a generated id and a zero score.
    pub fn new(layer: MemoryLayer, summary: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            layer,
            summary: summary.into(),
            score: 0.0,
            created_at: Utc::now(),
        }
    }
}

/// The read contract consumed by the enhancement pipeline.
///
/// Implementations must return a finite, already-bounded result set:
/// at most `limit` entries, most relevant first.
#[async_trait]
pub trait MemoryRecall: Send + Sync {
    /// The store name (e.g., "in_memory", "none"), used in diagnostics.
    fn name(&self) -> &str;

    /// Recall entries relevant to `query`, at most `limit` of them.
    async fn recall(
        &self,
        query: &str,
        limit: usize,
    ) -> std::result::Result<Vec<MemoryEntry>, MemoryError>;
}
