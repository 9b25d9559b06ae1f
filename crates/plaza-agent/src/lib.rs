// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation orchestration for the plaza agent.
//!
//! - [`ConversationOrchestrator`] runs one exchange: reply call, analysis
//!   call, personality update and memory recording.
//! - [`TraitRepository`] serializes updates to the single global trait vector.
//! - [`ChatSession`] keeps one user's conversation log.
//! - [`MarketplaceAssistant`] answers stateless shopping questions.

pub mod fallback;
pub mod marketplace;
pub mod orchestrator;
pub mod prompt;
pub mod repository;
pub mod session;
pub mod state;

use std::sync::Arc;

use plaza_config::PlazaConfig;
use plaza_core::{MemoryRecorder, PersonalityStore, ProviderAdapter};
use plaza_personality::PersonalityEngine;

pub use fallback::{FALLBACK_REPLIES, fallback_reply};
pub use marketplace::{MARKETPLACE_FALLBACK, MarketplaceAssistant};
pub use orchestrator::{ConversationOrchestrator, ExchangeOutcome, ExchangeSettings};
pub use repository::TraitRepository;
pub use session::{ChatSession, ConversationLog};
pub use state::{ExchangePath, ExchangeState};

/// Wires an orchestrator from configuration and injected collaborators.
pub fn build_orchestrator(
    config: &PlazaConfig,
    provider: Arc<dyn ProviderAdapter + Send + Sync>,
    personality: Arc<dyn PersonalityStore + Send + Sync>,
    memories: Arc<dyn MemoryRecorder + Send + Sync>,
) -> ConversationOrchestrator {
    ConversationOrchestrator::new(
        provider,
        Arc::new(TraitRepository::new(personality)),
        memories,
        PersonalityEngine::from_config(&config.personality, config.agent.display_name.clone()),
        ExchangeSettings::from_config(config),
    )
}

/// Builds the marketplace assistant on the reply model.
pub fn build_marketplace(
    config: &PlazaConfig,
    provider: Arc<dyn ProviderAdapter + Send + Sync>,
) -> MarketplaceAssistant {
    MarketplaceAssistant::new(
        provider,
        config.openai.reply_model.clone(),
        std::time::Duration::from_secs(config.conversation.provider_timeout_secs),
    )
}
