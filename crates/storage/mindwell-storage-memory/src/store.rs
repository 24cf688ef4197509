//! In-memory history store
//!
//! Each user owns a FIFO ring guarded by its own mutex, so append-and-evict
//! is atomic per user while different users never contend beyond the brief
//! map lookup. An append re-checks, under its slot lock, that the slot is
//! still the one in the map, so a concurrent clear never swallows a reading.

use async_trait::async_trait;
use mindwell_core::{
    AppendOutcome, HistoryStore, MindwellError, MoodReading, Result, DEFAULT_HISTORY_CAPACITY,
};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::debug;

type UserHistory = Arc<Mutex<VecDeque<MoodReading>>>;

/// Bounded per-user history held in memory
pub struct InMemoryHistoryStore {
    capacity: usize,
    users: RwLock<HashMap<String, UserHistory>>,
}

impl InMemoryHistoryStore {
    /// Create a store retaining at most `capacity` readings per user
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(MindwellError::config(
                "history capacity must be at least 1",
            ));
        }
        Ok(Self {
            capacity,
            users: RwLock::new(HashMap::new()),
        })
    }

    /// Number of users with stored history
    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }

    fn slot(&self, user_id: &str) -> Option<UserHistory> {
        self.users.read().get(user_id).cloned()
    }

    fn is_current(&self, user_id: &str, slot: &UserHistory) -> bool {
        self.users
            .read()
            .get(user_id)
            .map_or(false, |current| Arc::ptr_eq(current, slot))
    }

    fn slot_or_insert(&self, user_id: &str) -> UserHistory {
        if let Some(slot) = self.slot(user_id) {
            return slot;
        }
        let mut users = self.users.write();
        users
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(VecDeque::with_capacity(self.capacity))))
            .clone()
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
            users: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, reading: MoodReading) -> Result<AppendOutcome> {
        loop {
            let slot = self.slot_or_insert(reading.user_id());
            let mut history = slot.lock();
            // clear() may have detached this slot between lookup and lock
            if !self.is_current(reading.user_id(), &slot) {
                continue;
            }

            history.push_back(reading);
            let evicted = if history.len() > self.capacity {
                history.pop_front()
            } else {
                None
            };

            if let Some(old) = &evicted {
                debug!(
                    "Evicted reading {} for user {} (capacity {})",
                    old.id(),
                    old.user_id(),
                    self.capacity
                );
            }

            return Ok(AppendOutcome {
                len: history.len(),
                evicted,
            });
        }
    }

    async fn history(&self, user_id: &str) -> Result<Vec<MoodReading>> {
        Ok(self
            .slot(user_id)
            .map(|slot| slot.lock().iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn contains_user(&self, user_id: &str) -> Result<bool> {
        Ok(self.users.read().contains_key(user_id))
    }

    async fn clear(&self, user_id: &str) -> Result<usize> {
        // the map lock is released before the slot lock is taken
        let removed = self.users.write().remove(user_id);
        Ok(removed.map(|slot| slot.lock().len()).unwrap_or(0))
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindwell_core::MoodSubmission;

    fn reading(user: &str, score: i64) -> MoodReading {
        MoodSubmission::new(user, score).validate().unwrap()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(InMemoryHistoryStore::new(0).is_err());
        assert_eq!(InMemoryHistoryStore::default().capacity(), 100);
    }

    #[tokio::test]
    async fn test_append_and_read_back_in_order() {
        let store = InMemoryHistoryStore::new(10).unwrap();
        for score in [3, 5, 7] {
            store.append(reading("u1", score)).await.unwrap();
        }
        let scores: Vec<u8> = store
            .history("u1")
            .await
            .unwrap()
            .iter()
            .map(|r| r.mood_score())
            .collect();
        assert_eq!(scores, vec![3, 5, 7]);
    }

    #[tokio::test]
    async fn test_unknown_user_is_empty() {
        let store = InMemoryHistoryStore::default();
        assert!(store.history("ghost").await.unwrap().is_empty());
        assert!(!store.contains_user("ghost").await.unwrap());
        assert_eq!(store.clear("ghost").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_eviction_is_fifo() {
        let store = InMemoryHistoryStore::new(3).unwrap();
        let first = reading("u1", 1);
        let first_id = first.id();
        store.append(first).await.unwrap();
        store.append(reading("u1", 2)).await.unwrap();
        let outcome = store.append(reading("u1", 3)).await.unwrap();
        assert_eq!(outcome.len, 3);
        assert!(outcome.evicted.is_none());

        let outcome = store.append(reading("u1", 4)).await.unwrap();
        assert_eq!(outcome.len, 3);
        assert_eq!(outcome.evicted.map(|r| r.id()), Some(first_id));

        let scores: Vec<u8> = store
            .history("u1")
            .await
            .unwrap()
            .iter()
            .map(|r| r.mood_score())
            .collect();
        assert_eq!(scores, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn test_users_are_independent() {
        let store = InMemoryHistoryStore::new(2).unwrap();
        store.append(reading("a", 5)).await.unwrap();
        store.append(reading("b", 6)).await.unwrap();
        store.append(reading("b", 7)).await.unwrap();
        store.append(reading("b", 8)).await.unwrap();

        assert_eq!(store.history("a").await.unwrap().len(), 1);
        assert_eq!(store.history("b").await.unwrap().len(), 2);
        assert_eq!(store.user_count(), 2);

        assert_eq!(store.clear("b").await.unwrap(), 2);
        assert!(!store.contains_user("b").await.unwrap());
        assert_eq!(store.user_count(), 1);
    }
}
