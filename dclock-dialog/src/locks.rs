//! Per-username mutual exclusion.
//!
//! The controller reads, decides, writes and replies across several awaits; holding the
//! user's lock for the whole sequence keeps two messages from the same user from interleaving.
//! An entry lives only while someone holds or waits for it.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<String, Arc<Mutex<()>>>;

#[derive(Debug, Default)]
pub struct UserLocks {
    locks: Arc<LockMap>,
}

/// Held lock of one username. Dropping it releases the lock and evicts the entry when no
/// other task holds a handle to the same mutex.
#[derive(Debug)]
pub struct UserLockGuard {
    guard: Option<OwnedMutexGuard<()>>,
    username: String,
    locks: Arc<LockMap>,
}

impl Drop for UserLockGuard {
    fn drop(&mut self) {
        // Release first so our own handle no longer counts.
        self.guard.take();
        // The shard write lock is held for the check, and `acquire` clones under the same
        // shard lock, so a waiter always keeps the count above one.
        self.locks
            .remove_if(&self.username, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and holds the lock of `username` until the guard is dropped.
    pub async fn acquire(&self, username: &str) -> UserLockGuard {
        // Clone the Arc out so the map shard is not held across the await.
        let lock = self
            .locks
            .entry(username.to_string())
            .or_default()
            .value()
            .clone();
        let guard = lock.lock_owned().await;
        UserLockGuard {
            guard: Some(guard),
            username: username.to_string(),
            locks: self.locks.clone(),
        }
    }

    /// Usernames currently locked or waited on.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_user_waits() {
        let locks = Arc::new(UserLocks::new());
        let guard = locks.acquire("alice").await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _g = locks.acquire("alice").await;
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!contender.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("contender should acquire after release")
            .unwrap();
    }

    #[tokio::test]
    async fn test_different_users_do_not_block() {
        let locks = UserLocks::new();
        let _alice = locks.acquire("alice").await;
        let bob = tokio::time::timeout(Duration::from_secs(1), locks.acquire("bob")).await;
        assert!(bob.is_ok());
        assert_eq!(locks.len(), 2);
    }

    /// **Test: Released locks are evicted, so the map does not grow with every username seen.**
    #[tokio::test]
    async fn test_released_lock_is_evicted() {
        let locks = UserLocks::new();
        for name in ["alice", "bob", "carol"] {
            let _g = locks.acquire(name).await;
            assert_eq!(locks.len(), 1);
        }
        assert!(locks.is_empty());
    }

    /// **Test: An entry with a waiter survives the holder's release; the waiter still gets the same mutex.**
    #[tokio::test]
    async fn test_entry_kept_while_waited_on() {
        let locks = Arc::new(UserLocks::new());
        let first = locks.acquire("alice").await;

        let (acquired_tx, acquired_rx) = tokio::sync::oneshot::channel();
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _g = locks.acquire("alice").await;
                acquired_tx.send(()).unwrap();
                release_rx.await.unwrap();
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(first);
        tokio::time::timeout(Duration::from_secs(1), acquired_rx)
            .await
            .expect("waiter should acquire after release")
            .unwrap();
        assert_eq!(locks.len(), 1);

        // A third caller must queue behind the waiter, not get a fresh mutex.
        let third = tokio::time::timeout(Duration::from_millis(50), locks.acquire("alice")).await;
        assert!(third.is_err());

        release_tx.send(()).unwrap();
        waiter.await.unwrap();
        assert!(locks.is_empty());
    }
}
