//! Error types for the promptloom domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all promptloom operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Memory errors ---
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    // --- Strategy errors ---
    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum MemoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// Failure raised inside a single enhancement stage.
///
/// The pipeline never propagates these to its caller; they exist so a stage
/// can report *why* it was skipped.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Recall failed: {0}")]
    Recall(#[from] MemoryError),

    #[error("Stage failed: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_error_displays_correctly() {
        let err = Error::Memory(MemoryError::Storage("disk unavailable".into()));
        assert!(err.to_string().contains("disk unavailable"));
    }

    #[test]
    fn strategy_error_wraps_memory_error() {
        let err = StrategyError::from(MemoryError::QueryFailed("bad index".into()));
        assert!(err.to_string().contains("Recall failed"));
        assert!(err.to_string().contains("bad index"));
    }
}
