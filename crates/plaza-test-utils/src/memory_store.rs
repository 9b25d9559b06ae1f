// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory personality store and memory recorder with failure injection.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use plaza_core::{
    AdapterType, HealthStatus, MemoryRecord, MemoryRecorder, PersonalitySnapshot,
    PersonalityStore, PlazaError, PluginAdapter,
};

/// Keeps every saved snapshot and memory in memory.
///
/// Reads and writes can be made to fail independently to exercise the
/// best-effort persistence paths.
#[derive(Default)]
pub struct MemoryStore {
    snapshots: Mutex<Vec<PersonalitySnapshot>>,
    memories: Mutex<Vec<MemoryRecord>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose latest snapshot is `snapshot`.
    pub fn with_snapshot(snapshot: PersonalitySnapshot) -> Self {
        Self {
            snapshots: Mutex::new(vec![snapshot]),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Appends a snapshot as if another writer had saved it.
    pub async fn push_snapshot(&self, snapshot: PersonalitySnapshot) {
        self.snapshots.lock().await.push(snapshot);
    }

    pub async fn snapshots(&self) -> Vec<PersonalitySnapshot> {
        self.snapshots.lock().await.clone()
    }

    pub async fn latest(&self) -> Option<PersonalitySnapshot> {
        self.snapshots.lock().await.last().copied()
    }

    pub async fn memories(&self) -> Vec<MemoryRecord> {
        self.memories.lock().await.clone()
    }

    fn check(&self, flag: &AtomicBool, op: &str) -> Result<(), PlazaError> {
        if flag.load(Ordering::SeqCst) {
            return Err(PlazaError::StoreUnavailable {
                source: Box::new(std::io::Error::other(format!("injected {op} failure"))),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, PlazaError> {
        if self.fail_reads.load(Ordering::SeqCst) || self.fail_writes.load(Ordering::SeqCst) {
            return Ok(HealthStatus::Degraded("failure injection active".into()));
        }
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PlazaError> {
        Ok(())
    }
}

#[async_trait]
impl PersonalityStore for MemoryStore {
    async fn load_latest(&self) -> Result<Option<PersonalitySnapshot>, PlazaError> {
        self.check(&self.fail_reads, "read")?;
        Ok(self.latest().await)
    }

    async fn save_snapshot(&self, snapshot: &PersonalitySnapshot) -> Result<(), PlazaError> {
        self.check(&self.fail_writes, "write")?;
        self.snapshots.lock().await.push(*snapshot);
        Ok(())
    }
}

#[async_trait]
impl MemoryRecorder for MemoryStore {
    async fn record(&self, memory: &MemoryRecord) -> Result<(), PlazaError> {
        self.check(&self.fail_writes, "write")?;
        self.memories.lock().await.push(memory.clone());
        Ok(())
    }
}
