// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serialization point for the global agent's personality.
//!
//! All sessions share one trait vector. Updates go through
//! [`TraitRepository::apply`], which holds a lock across a read of the latest
//! stored snapshot, the delta application, and the write-back, so concurrent
//! exchanges never apply their deltas to a stale copy.

use std::sync::Arc;

use plaza_core::{PersonalitySnapshot, PersonalityStore, TraitDeltas};
use plaza_personality::apply_deltas;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Read-modify-write access to the agent's personality snapshot.
pub struct TraitRepository {
    store: Arc<dyn PersonalityStore + Send + Sync>,
    current: Mutex<PersonalitySnapshot>,
}

impl TraitRepository {
    pub fn new(store: Arc<dyn PersonalityStore + Send + Sync>) -> Self {
        Self {
            store,
            current: Mutex::new(PersonalitySnapshot::default()),
        }
    }

    /// Loads the latest snapshot.
    ///
    /// When the store is empty or unreachable the in-memory copy is returned,
    /// which is the neutral vector with a zero counter until the first update.
    pub async fn load(&self) -> PersonalitySnapshot {
        let mut current = self.current.lock().await;
        match self.store.load_latest().await {
            Ok(Some(snapshot)) => *current = snapshot,
            Ok(None) => debug!("no stored personality snapshot"),
            Err(e) => warn!(error = %e, "failed to load personality snapshot, using in-memory copy"),
        }
        *current
    }

    /// The in-memory copy, without touching the store.
    pub async fn snapshot(&self) -> PersonalitySnapshot {
        *self.current.lock().await
    }

    /// Applies `deltas` to the latest snapshot and saves the result.
    ///
    /// Increments the exchange counter. A failed save is logged and the
    /// in-memory copy keeps the update.
    pub async fn apply(&self, deltas: &TraitDeltas) -> PersonalitySnapshot {
        let mut current = self.current.lock().await;

        let base = match self.store.load_latest().await {
            Ok(Some(latest)) => latest,
            Ok(None) => *current,
            Err(e) => {
                warn!(error = %e, "failed to re-read personality snapshot, applying to in-memory copy");
                *current
            }
        };

        let next = PersonalitySnapshot {
            traits: apply_deltas(&base.traits, deltas),
            exchange_count: base.exchange_count.max(current.exchange_count) + 1,
        };
        *current = next;

        if let Err(e) = self.store.save_snapshot(&next).await {
            warn!(error = %e, "failed to save personality snapshot");
        }
        debug!(exchange_count = next.exchange_count, "personality updated");
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_core::{NullStore, Trait, TraitVector};
    use plaza_test_utils::MemoryStore;

    fn snapshot(curiosity: f64, exchange_count: u64) -> PersonalitySnapshot {
        PersonalitySnapshot {
            traits: TraitVector::default().with(Trait::Curiosity, curiosity),
            exchange_count,
        }
    }

    #[tokio::test]
    async fn load_defaults_to_neutral_when_empty() {
        let repo = TraitRepository::new(Arc::new(MemoryStore::new()));
        assert_eq!(repo.load().await, PersonalitySnapshot::default());
    }

    #[tokio::test]
    async fn load_falls_back_on_store_error() {
        let store = Arc::new(MemoryStore::with_snapshot(snapshot(80.0, 4)));
        store.set_fail_reads(true);
        let repo = TraitRepository::new(store);
        let loaded = repo.load().await;
        assert_eq!(loaded.traits.get(Trait::Curiosity), 50.0);
        assert_eq!(loaded.exchange_count, 0);
    }

    #[tokio::test]
    async fn apply_rereads_latest_snapshot_before_updating() {
        let store = Arc::new(MemoryStore::with_snapshot(snapshot(60.0, 1)));
        let repo = TraitRepository::new(store.clone());
        repo.load().await;

        // Another writer lands between load and apply.
        store.push_snapshot(snapshot(70.0, 2)).await;

        let next = repo
            .apply(&TraitDeltas::single(Trait::Curiosity, 2.0))
            .await;
        assert_eq!(next.traits.get(Trait::Curiosity), 72.0);
        assert_eq!(next.exchange_count, 3);
        assert_eq!(store.latest().await, Some(next));
    }

    #[tokio::test]
    async fn failed_save_keeps_in_memory_update() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_writes(true);
        let repo = TraitRepository::new(store.clone());

        let next = repo.apply(&TraitDeltas::single(Trait::Humor, 3.0)).await;
        assert_eq!(next.traits.get(Trait::Humor), 53.0);
        assert_eq!(repo.snapshot().await, next);
        assert!(store.snapshots().await.is_empty());
    }

    #[tokio::test]
    async fn null_store_accumulates_in_memory() {
        let repo = TraitRepository::new(Arc::new(NullStore));
        repo.apply(&TraitDeltas::single(Trait::Empathy, 1.0)).await;
        let second = repo.apply(&TraitDeltas::single(Trait::Empathy, 1.0)).await;
        assert_eq!(second.traits.get(Trait::Empathy), 52.0);
        assert_eq!(second.exchange_count, 2);
        assert_eq!(repo.load().await, second);
    }

    #[tokio::test]
    async fn concurrent_applies_are_serialized() {
        let store = Arc::new(MemoryStore::new());
        let repo = Arc::new(TraitRepository::new(store.clone()));

        let mut handles = Vec::new();
        for _ in 0..10 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.apply(&TraitDeltas::single(Trait::Creativity, 1.0)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let latest = store.latest().await.unwrap();
        assert_eq!(latest.traits.get(Trait::Creativity), 60.0);
        assert_eq!(latest.exchange_count, 10);
    }
}
