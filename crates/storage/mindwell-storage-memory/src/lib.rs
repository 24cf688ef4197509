//! Mindwell In-Memory Storage
//!
//! Bounded per-user mood history kept in process memory.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-exports
pub use mindwell_core;

pub mod store;

pub use store::InMemoryHistoryStore;
