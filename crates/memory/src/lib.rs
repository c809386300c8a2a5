//! Recall store implementations for promptloom.
//!
//! The pipeline consumes the [`promptloom_core::MemoryRecall`] read
//! contract; this crate provides the in-process implementations. Durable
//! stores (database-backed, vector-indexed) are expected to live in the
//! embedding application and implement the same trait.

pub mod failing;
pub mod in_memory;
pub mod noop;

pub use failing::FailingRecall;
pub use in_memory::InMemoryRecall;
pub use noop::NoopRecall;
