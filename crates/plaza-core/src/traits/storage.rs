// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter traits for personality snapshots and memory records.

use async_trait::async_trait;

use crate::error::PlazaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{AdapterType, HealthStatus, MemoryRecord, PersonalitySnapshot};

/// Persists the agent's personality snapshot.
#[async_trait]
pub trait PersonalityStore: PluginAdapter {
    /// Returns the most recently saved snapshot, or `None` if nothing was saved yet.
    async fn load_latest(&self) -> Result<Option<PersonalitySnapshot>, PlazaError>;

    /// Saves a new snapshot. The latest save wins.
    async fn save_snapshot(&self, snapshot: &PersonalitySnapshot) -> Result<(), PlazaError>;
}

/// Append-only sink for memory records.
#[async_trait]
pub trait MemoryRecorder: PluginAdapter {
    async fn record(&self, memory: &MemoryRecord) -> Result<(), PlazaError>;
}

/// Stand-in used when no store is configured. Reads are empty, writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

#[async_trait]
impl PluginAdapter for NullStore {
    fn name(&self) -> &str {
        "null"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, PlazaError> {
        Ok(HealthStatus::Degraded("persistence disabled".into()))
    }

    async fn shutdown(&self) -> Result<(), PlazaError> {
        Ok(())
    }
}

#[async_trait]
impl PersonalityStore for NullStore {
    async fn load_latest(&self) -> Result<Option<PersonalitySnapshot>, PlazaError> {
        Ok(None)
    }

    async fn save_snapshot(&self, _snapshot: &PersonalitySnapshot) -> Result<(), PlazaError> {
        Ok(())
    }
}

#[async_trait]
impl MemoryRecorder for NullStore {
    async fn record(&self, _memory: &MemoryRecord) -> Result<(), PlazaError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MemoryKind;

    #[tokio::test]
    async fn null_store_reads_nothing_and_accepts_writes() {
        let store = NullStore;
        assert!(store.load_latest().await.unwrap().is_none());
        store
            .save_snapshot(&PersonalitySnapshot::default())
            .await
            .unwrap();
        store
            .record(&MemoryRecord {
                memory_type: MemoryKind::Episodic,
                content: "User: hi\nHue: hello".into(),
                emotional_weight: 0.4,
                importance_score: 0.4,
                tags: vec![],
            })
            .await
            .unwrap();
        assert!(store.load_latest().await.unwrap().is_none());
    }
}
