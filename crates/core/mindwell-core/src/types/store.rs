//! History store capability

use super::MoodReading;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default number of readings retained per user
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Outcome of appending a reading to a user's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppendOutcome {
    /// History length after the append
    pub len: usize,

    /// Entry evicted to stay within capacity, if any
    pub evicted: Option<MoodReading>,
}

/// Per-user bounded mood history
///
/// Implementations keep each user's readings in submission order
/// (oldest first) and evict the oldest entry once `capacity` is exceeded.
/// Append-and-evict must be atomic per user; different users are independent.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append a reading to its user's history
    async fn append(&self, reading: MoodReading) -> Result<AppendOutcome>;

    /// Snapshot of a user's history, oldest first (empty for unknown users)
    async fn history(&self, user_id: &str) -> Result<Vec<MoodReading>>;

    /// Whether any reading was ever stored for the user
    async fn contains_user(&self, user_id: &str) -> Result<bool>;

    /// Drop a user's history, returning how many readings were removed
    async fn clear(&self, user_id: &str) -> Result<usize>;

    /// Maximum readings retained per user
    fn capacity(&self) -> usize;
}
