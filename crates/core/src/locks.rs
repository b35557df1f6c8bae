use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

type LockTable = DashMap<Uuid, Arc<Mutex<()>>>;

/// Per-mentor async mutexes serialising check-then-write sequences.
///
/// Entries are created on demand and evicted when the last guard for a
/// mentor is released with nobody waiting, so the table only grows with the
/// number of mentors that are busy at the same moment.
#[derive(Debug, Default)]
pub struct MentorLocks {
    locks: Arc<LockTable>,
}

/// Holds one mentor's lock; releasing it may evict the table entry.
#[derive(Debug)]
pub struct MentorGuard {
    mentor_id: Uuid,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<LockTable>,
}

impl Drop for MentorGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the table's own reference left: no holder and no waiter.
        self.locks
            .remove_if(&self.mentor_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl MentorLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, mentor_id: Uuid) -> MentorGuard {
        let lock = self.locks.entry(mentor_id).or_default().value().clone();
        let guard = lock.lock_owned().await;
        MentorGuard {
            mentor_id,
            guard: Some(guard),
            locks: self.locks.clone(),
        }
    }

    /// Number of mentors currently tracked.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
