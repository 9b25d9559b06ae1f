// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds collaborators from configuration.
//!
//! A missing API key or an unusable database never stops the process: the
//! disabled provider or the null store takes its place and every exchange
//! falls back per step.

use std::sync::Arc;

use plaza_config::PlazaConfig;
use plaza_core::{
    DisabledProvider, MemoryRecorder, NullStore, PersonalityStore, PluginAdapter, ProviderAdapter,
};
use plaza_openai::OpenAiProvider;
use plaza_storage::SqliteStorage;
use tracing::{info, warn};

/// The store collaborators, viewed through each trait they are used by.
pub struct Stores {
    pub personality: Arc<dyn PersonalityStore + Send + Sync>,
    pub memories: Arc<dyn MemoryRecorder + Send + Sync>,
    pub adapter: Arc<dyn PluginAdapter + Send + Sync>,
}

impl Stores {
    fn from_adapter<S>(store: Arc<S>) -> Self
    where
        S: PersonalityStore + MemoryRecorder + Send + Sync,
    {
        Self {
            personality: store.clone(),
            memories: store.clone(),
            adapter: store,
        }
    }
}

/// The provider collaborator and its adapter view for health and shutdown.
pub struct Provider {
    pub provider: Arc<dyn ProviderAdapter + Send + Sync>,
    pub adapter: Arc<dyn PluginAdapter + Send + Sync>,
}

impl Provider {
    fn from_adapter<P>(provider: Arc<P>) -> Self
    where
        P: ProviderAdapter + Send + Sync,
    {
        Self {
            provider: provider.clone(),
            adapter: provider,
        }
    }
}

pub fn build_provider(config: &PlazaConfig) -> Provider {
    match OpenAiProvider::new(&config.openai) {
        Ok(provider) => Provider::from_adapter(Arc::new(provider)),
        Err(e) => {
            warn!(error = %e, "text generation disabled, every reply will use the fallback");
            Provider::from_adapter(Arc::new(DisabledProvider))
        }
    }
}

pub async fn build_stores(config: &PlazaConfig) -> Stores {
    if !config.storage.enabled {
        info!("persistence disabled by configuration");
        return Stores::from_adapter(Arc::new(NullStore));
    }

    let storage = SqliteStorage::new(config.storage.clone());
    match storage.initialize().await {
        Ok(()) => {
            info!(path = %config.storage.database_path, "SQLite storage ready");
            Stores::from_adapter(Arc::new(storage))
        }
        Err(e) => {
            warn!(error = %e, path = %config.storage.database_path, "storage unavailable, continuing without persistence");
            Stores::from_adapter(Arc::new(NullStore))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_storage_uses_null_store() {
        let mut config = PlazaConfig::default();
        config.storage.enabled = false;
        let stores = build_stores(&config).await;
        assert_eq!(stores.adapter.name(), "null");
        assert_eq!(stores.personality.load_latest().await.unwrap(), None);
    }

    #[tokio::test]
    async fn unusable_database_path_degrades_to_null_store() {
        // A directory cannot be opened as a database file.
        let mut config = PlazaConfig::default();
        config.storage.database_path = std::env::temp_dir().to_string_lossy().into_owned();
        let stores = build_stores(&config).await;
        assert_eq!(stores.adapter.name(), "null");
    }

    #[test]
    #[serial_test::serial]
    fn missing_key_disables_provider() {
        // SAFETY: test-only env mutation
        unsafe { std::env::remove_var("OPENAI_API_KEY") };
        let provider = build_provider(&PlazaConfig::default());
        assert_eq!(provider.adapter.name(), "disabled");
    }

    #[test]
    #[serial_test::serial]
    fn configured_key_enables_openai() {
        let mut config = PlazaConfig::default();
        config.openai.api_key = Some("sk-test".into());
        assert_eq!(build_provider(&config).adapter.name(), "openai");
    }
}
