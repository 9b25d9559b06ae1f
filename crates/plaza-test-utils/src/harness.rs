// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end exchanges.
//!
//! `TestHarness` assembles an orchestrator over a [`MockProvider`] and a
//! temp-file SQLite store, and drives exchanges through one [`ChatSession`].

use std::sync::Arc;

use plaza_agent::{ChatSession, ConversationOrchestrator, ExchangeOutcome, build_orchestrator};
use plaza_config::PlazaConfig;
use plaza_config::model::StorageConfig;
use plaza_core::{PersonalitySnapshot, PersonalityStore, PlazaError};
use plaza_storage::{SqliteStorage, StoredMemory};
use tokio::sync::Mutex;

use crate::mock_provider::{MockProvider, MockReply};

/// Builder for [`TestHarness`].
pub struct TestHarnessBuilder {
    script: Vec<MockReply>,
    config: PlazaConfig,
    initial: Option<PersonalitySnapshot>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            script: Vec::new(),
            config: PlazaConfig::default(),
            initial: None,
        }
    }

    /// Scripted provider steps, consumed two per exchange (reply, analysis).
    pub fn with_script(mut self, script: Vec<MockReply>) -> Self {
        self.script = script;
        self
    }

    pub fn with_config(mut self, config: PlazaConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the store with a snapshot before the session starts.
    pub fn with_snapshot(mut self, snapshot: PersonalitySnapshot) -> Self {
        self.initial = Some(snapshot);
        self
    }

    pub async fn build(self) -> Result<TestHarness, PlazaError> {
        let temp_dir = tempfile::TempDir::new()
            .map_err(|e| PlazaError::StoreUnavailable { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let mut config = self.config;
        config.storage = StorageConfig {
            enabled: true,
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: true,
        };

        let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
        storage.initialize().await?;
        if let Some(snapshot) = self.initial {
            storage.save_snapshot(&snapshot).await?;
        }

        let mock_provider = Arc::new(MockProvider::with_script(self.script));
        let orchestrator = Arc::new(build_orchestrator(
            &config,
            mock_provider.clone(),
            storage.clone(),
            storage.clone(),
        ));
        let session = ChatSession::start(orchestrator.clone()).await;

        Ok(TestHarness {
            mock_provider,
            storage,
            orchestrator,
            session: Mutex::new(session),
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete exchange pipeline with a mock provider and temp storage.
pub struct TestHarness {
    pub mock_provider: Arc<MockProvider>,
    /// SQLite store (temp DB, removed on drop).
    pub storage: Arc<SqliteStorage>,
    pub orchestrator: Arc<ConversationOrchestrator>,
    session: Mutex<ChatSession>,
    pub config: PlazaConfig,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Sends a message through the harness session.
    pub async fn send_message(&self, text: &str) -> Result<ExchangeOutcome, PlazaError> {
        self.session.lock().await.send(text).await
    }

    /// The snapshot the session currently holds.
    pub async fn session_snapshot(&self) -> PersonalitySnapshot {
        *self.session.lock().await.snapshot()
    }

    /// Number of turns in the session log.
    pub async fn turn_count(&self) -> usize {
        self.session.lock().await.log().len()
    }

    /// The latest snapshot as persisted.
    pub async fn stored_snapshot(&self) -> Result<Option<PersonalitySnapshot>, PlazaError> {
        self.storage.load_latest().await
    }

    /// Persisted memories, newest first.
    pub async fn stored_memories(&self) -> Result<Vec<StoredMemory>, PlazaError> {
        self.storage.recent_memories(100).await
    }
}
