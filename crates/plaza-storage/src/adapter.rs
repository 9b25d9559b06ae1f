// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the personality and memory store traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use plaza_config::model::StorageConfig;
use plaza_core::{
    AdapterType, HealthStatus, MemoryRecord, MemoryRecorder, PersonalitySnapshot,
    PersonalityStore, PlazaError, PluginAdapter,
};

use crate::database::{Database, map_tr_err};
use crate::models::StoredMemory;
use crate::queries;

/// SQLite-backed store for snapshots and memories.
///
/// The database is opened lazily by [`SqliteStorage::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a store for the configured path. Nothing is opened yet.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Wrap an already opened database.
    pub fn from_database(db: Database) -> Self {
        Self {
            config: StorageConfig {
                database_path: ":memory:".to_string(),
                wal_mode: false,
                ..StorageConfig::default()
            },
            db: OnceCell::new_with(Some(db)),
        }
    }

    /// Open and migrate the database. Fails if called twice.
    pub async fn initialize(&self) -> Result<(), PlazaError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| PlazaError::StoreUnavailable {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    /// Most recent memories, newest first.
    pub async fn recent_memories(&self, limit: usize) -> Result<Vec<StoredMemory>, PlazaError> {
        queries::memories::recent_memories(self.db()?, limit).await
    }

    fn db(&self) -> Result<&Database, PlazaError> {
        self.db.get().ok_or_else(|| PlazaError::StoreUnavailable {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, PlazaError> {
        self.db()?
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PlazaError> {
        if let Some(db) = self.db.get()
            && self.config.wal_mode
        {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl PersonalityStore for SqliteStorage {
    async fn load_latest(&self) -> Result<Option<PersonalitySnapshot>, PlazaError> {
        queries::personality::latest_snapshot(self.db()?).await
    }

    async fn save_snapshot(&self, snapshot: &PersonalitySnapshot) -> Result<(), PlazaError> {
        queries::personality::insert_snapshot(self.db()?, snapshot).await
    }
}

#[async_trait]
impl MemoryRecorder for SqliteStorage {
    async fn record(&self, memory: &MemoryRecord) -> Result<(), PlazaError> {
        let id = queries::memories::insert_memory(self.db()?, memory).await?;
        debug!(id = %id, memory_type = %memory.memory_type, "memory recorded");
        Ok(())
    }
}
