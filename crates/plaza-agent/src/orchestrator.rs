// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drives one user/agent exchange end to end.
//!
//! The reply call and the analysis call run sequentially. Either may fail or
//! time out; each failure selects a static fallback for that step only and
//! the rest of the pipeline still runs. Once an analysis exists, applying it
//! and recording the memory happen in a detached task so a caller that goes
//! away cannot leave the exchange half-applied.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use plaza_config::PlazaConfig;
use plaza_core::{
    ConversationTurn, MemoryKind, MemoryRecorder, PersonalitySnapshot, PlazaError, PluginAdapter,
    ProviderAdapter, ProviderMessage, ProviderRequest, TraitDeltas, TraitVector,
};
use plaza_personality::{AnalysisOutcome, ExchangeAnalysis, PersonalityEngine, decode_analysis};
use tracing::{debug, info, warn};

use crate::fallback::fallback_reply;
use crate::prompt::{analysis_prompt, reply_messages, reply_system_prompt};
use crate::repository::TraitRepository;
use crate::state::{ExchangePath, ExchangeState};

/// Sampling and prompt parameters for both provider calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeSettings {
    pub reply_model: String,
    pub analysis_model: String,
    /// Number of most recent turns included in the reply prompt.
    pub history_window: usize,
    pub reply_max_tokens: u32,
    pub reply_temperature: f64,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    pub analysis_max_tokens: u32,
    pub analysis_temperature: f64,
    /// Upper bound on each provider call. Expiry counts as a provider failure.
    pub provider_timeout: Duration,
}

impl ExchangeSettings {
    pub fn from_config(config: &PlazaConfig) -> Self {
        let conv = &config.conversation;
        Self {
            reply_model: config.openai.reply_model.clone(),
            analysis_model: config.openai.analysis_model.clone(),
            history_window: conv.history_window,
            reply_max_tokens: conv.reply_max_tokens,
            reply_temperature: conv.reply_temperature,
            presence_penalty: conv.presence_penalty,
            frequency_penalty: conv.frequency_penalty,
            analysis_max_tokens: conv.analysis_max_tokens,
            analysis_temperature: conv.analysis_temperature,
            provider_timeout: Duration::from_secs(conv.provider_timeout_secs),
        }
    }
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self::from_config(&PlazaConfig::default())
    }
}

/// Everything the caller needs after an exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeOutcome {
    pub agent_text: String,
    pub emotion: String,
    /// The deltas that were applied. Unknown trait names are dropped.
    pub deltas: TraitDeltas,
    pub learning_value: f64,
    /// Trait vector after this exchange was applied.
    pub traits: TraitVector,
    pub exchange_count: u64,
    /// Kind of the memory created, if the exchange was significant.
    pub memory: Option<MemoryKind>,
    pub reply_fallback: bool,
    pub analysis_fallback: bool,
    pub path: ExchangePath,
}

/// Coordinates the provider, the personality engine and the stores.
pub struct ConversationOrchestrator {
    provider: Arc<dyn ProviderAdapter + Send + Sync>,
    repository: Arc<TraitRepository>,
    memories: Arc<dyn MemoryRecorder + Send + Sync>,
    engine: PersonalityEngine,
    settings: ExchangeSettings,
}

impl ConversationOrchestrator {
    pub fn new(
        provider: Arc<dyn ProviderAdapter + Send + Sync>,
        repository: Arc<TraitRepository>,
        memories: Arc<dyn MemoryRecorder + Send + Sync>,
        engine: PersonalityEngine,
        settings: ExchangeSettings,
    ) -> Self {
        info!(
            provider = provider.name(),
            memories = memories.name(),
            reply_model = %settings.reply_model,
            analysis_model = %settings.analysis_model,
            "conversation orchestrator ready"
        );
        Self {
            provider,
            repository,
            memories,
            engine,
            settings,
        }
    }

    pub fn repository(&self) -> &Arc<TraitRepository> {
        &self.repository
    }

    pub fn settings(&self) -> &ExchangeSettings {
        &self.settings
    }

    pub fn engine(&self) -> &PersonalityEngine {
        &self.engine
    }

    /// Runs one exchange.
    ///
    /// `traits` and `history` shape the prompts only; the update is applied to
    /// the latest stored snapshot. Fails only with [`PlazaError::InvalidInput`]
    /// for an empty message, before any collaborator is called.
    pub async fn handle_user_message(
        &self,
        user_text: &str,
        traits: &TraitVector,
        history: &[ConversationTurn],
    ) -> Result<ExchangeOutcome, PlazaError> {
        let user_text = user_text.trim();
        if user_text.is_empty() {
            return Err(PlazaError::InvalidInput("message is required".into()));
        }

        let mut path = ExchangePath::start();
        let agent_name = self.engine.agent_name().to_string();

        let reply_request = ProviderRequest {
            model: self.settings.reply_model.clone(),
            messages: reply_messages(
                reply_system_prompt(&agent_name, traits),
                history,
                self.settings.history_window,
                user_text,
            ),
            max_tokens: self.settings.reply_max_tokens,
            temperature: self.settings.reply_temperature,
            presence_penalty: Some(self.settings.presence_penalty),
            frequency_penalty: Some(self.settings.frequency_penalty),
        };

        path.advance(ExchangeState::AwaitReply);
        let reply = self
            .call_provider(reply_request)
            .await
            .and_then(|text| {
                let text = text.trim().to_string();
                if text.is_empty() {
                    Err(PlazaError::provider("reply was empty"))
                } else {
                    Ok(text)
                }
            });
        let (agent_text, reply_fallback) = match reply {
            Ok(text) => {
                path.advance(ExchangeState::ReplyOk);
                (text, false)
            }
            Err(e) => {
                warn!(error = %e, "reply call failed, using fallback reply");
                path.advance(ExchangeState::ReplyFallback);
                (fallback_reply().to_string(), true)
            }
        };

        let analysis_request = ProviderRequest {
            model: self.settings.analysis_model.clone(),
            messages: vec![ProviderMessage::user(analysis_prompt(
                &agent_name,
                user_text,
                &agent_text,
                traits,
            ))],
            max_tokens: self.settings.analysis_max_tokens,
            temperature: self.settings.analysis_temperature,
            presence_penalty: None,
            frequency_penalty: None,
        };

        path.advance(ExchangeState::AwaitAnalysis);
        let outcome = match self.call_provider(analysis_request).await {
            Ok(text) => decode_analysis(&text),
            Err(e) => AnalysisOutcome::Fallback(e.to_string()),
        };
        let analysis_fallback = outcome.is_fallback();
        if let AnalysisOutcome::Fallback(reason) = &outcome {
            warn!(reason = %reason, "analysis unavailable, using fallback analysis");
            path.advance(ExchangeState::AnalysisFallback);
        } else {
            path.advance(ExchangeState::AnalysisOk);
        }
        let analysis = outcome.into_analysis();

        // From here on the exchange commits even if the caller is dropped.
        let commit = tokio::spawn(commit_exchange(
            self.repository.clone(),
            self.memories.clone(),
            self.engine.clone(),
            user_text.to_string(),
            agent_text.clone(),
            analysis.clone(),
            path,
        ));
        let (snapshot, memory, path) = commit
            .await
            .map_err(|e| PlazaError::Internal(format!("exchange commit task failed: {e}")))?;

        info!(
            emotion = %analysis.emotion,
            learning_value = analysis.learning_value,
            exchange_count = snapshot.exchange_count,
            reply_fallback,
            analysis_fallback,
            "exchange complete"
        );

        Ok(ExchangeOutcome {
            agent_text,
            emotion: analysis.emotion,
            deltas: analysis.personality_changes.retain_known(),
            learning_value: analysis.learning_value,
            traits: snapshot.traits,
            exchange_count: snapshot.exchange_count,
            memory,
            reply_fallback,
            analysis_fallback,
            path,
        })
    }

    async fn call_provider(&self, request: ProviderRequest) -> Result<String, PlazaError> {
        let model = request.model.clone();
        let response = with_timeout(
            self.settings.provider_timeout,
            self.provider.complete(request),
        )
        .await?;
        debug!(model = %model, id = %response.id, "provider call succeeded");
        Ok(response.content)
    }
}

async fn with_timeout<T>(
    duration: Duration,
    fut: impl Future<Output = Result<T, PlazaError>>,
) -> Result<T, PlazaError> {
    tokio::time::timeout(duration, fut)
        .await
        .map_err(|_| PlazaError::Timeout { duration })?
}

async fn commit_exchange(
    repository: Arc<TraitRepository>,
    memories: Arc<dyn MemoryRecorder + Send + Sync>,
    engine: PersonalityEngine,
    user_text: String,
    agent_text: String,
    analysis: ExchangeAnalysis,
    mut path: ExchangePath,
) -> (PersonalitySnapshot, Option<MemoryKind>, ExchangePath) {
    path.advance(ExchangeState::ApplyPersonality);
    let snapshot = repository.apply(&analysis.personality_changes).await;

    let memory = match engine.memory_for(&user_text, &agent_text, &analysis) {
        Some(record) => {
            path.advance(ExchangeState::RecordMemory);
            if let Err(e) = memories.record(&record).await {
                warn!(error = %e, kind = %record.memory_type, "failed to record memory");
            }
            Some(record.memory_type)
        }
        None => {
            path.advance(ExchangeState::Skip);
            None
        }
    };

    path.advance(ExchangeState::Done);
    (snapshot, memory, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::is_fallback_reply;
    use plaza_core::{NullStore, PersonalityStore, ProviderRole, Trait};
    use plaza_test_utils::{MemoryStore, MockProvider, MockReply};
    use tracing_test::traced_test;

    struct Fixture {
        provider: Arc<MockProvider>,
        store: Arc<MemoryStore>,
        orchestrator: ConversationOrchestrator,
    }

    fn fixture(script: Vec<MockReply>) -> Fixture {
        fixture_with_store(script, MemoryStore::new())
    }

    fn fixture_with_store(script: Vec<MockReply>, store: MemoryStore) -> Fixture {
        let provider = Arc::new(MockProvider::with_script(script));
        let store = Arc::new(store);
        let personality: Arc<dyn PersonalityStore + Send + Sync> = store.clone();
        let orchestrator = ConversationOrchestrator::new(
            provider.clone(),
            Arc::new(TraitRepository::new(personality)),
            store.clone(),
            PersonalityEngine::default(),
            ExchangeSettings {
                provider_timeout: Duration::from_secs(2),
                ..ExchangeSettings::default()
            },
        );
        Fixture {
            provider,
            store,
            orchestrator,
        }
    }

    fn text(s: &str) -> MockReply {
        MockReply::Text(s.to_string())
    }

    #[tokio::test]
    async fn empty_message_is_rejected_before_any_call() {
        let f = fixture(vec![]);
        for input in ["", "   \n\t"] {
            let err = f
                .orchestrator
                .handle_user_message(input, &TraitVector::default(), &[])
                .await
                .unwrap_err();
            assert!(err.is_client_error());
        }
        assert_eq!(f.provider.call_count().await, 0);
        assert!(f.store.snapshots().await.is_empty());
    }

    #[tokio::test]
    async fn requests_use_configured_sampling() {
        let f = fixture(vec![
            text("Hello, friend."),
            text(r#"{"emotion":"curious","personalityChanges":{"curiosity":1},"learningValue":0.2}"#),
        ]);
        f.orchestrator
            .handle_user_message("hello", &TraitVector::default(), &[])
            .await
            .unwrap();

        let requests = f.provider.requests().await;
        assert_eq!(requests.len(), 2);

        let reply = &requests[0];
        assert_eq!(reply.model, "gpt-4");
        assert_eq!(reply.max_tokens, 500);
        assert_eq!(reply.temperature, 0.8);
        assert_eq!(reply.presence_penalty, Some(0.3));
        assert_eq!(reply.frequency_penalty, Some(0.2));
        assert_eq!(reply.messages[0].role, ProviderRole::System);
        assert!(reply.messages[0].content.contains("curiosity: 50/100"));
        assert_eq!(reply.messages.last().unwrap().content, "hello");

        let analysis = &requests[1];
        assert_eq!(analysis.model, "gpt-3.5-turbo");
        assert_eq!(analysis.max_tokens, 200);
        assert_eq!(analysis.temperature, 0.3);
        assert!(analysis.temperature < reply.temperature);
        assert_eq!(analysis.messages.len(), 1);
        assert!(analysis.messages[0].content.contains("Hello, friend."));
    }

    #[tokio::test]
    async fn history_window_limits_prompt_turns() {
        let f = fixture(vec![]);
        let history: Vec<_> = (0..10)
            .map(|i| ConversationTurn::user(format!("turn {i}")))
            .collect();
        f.orchestrator
            .handle_user_message("latest", &TraitVector::default(), &history)
            .await
            .unwrap();

        let reply = &f.provider.requests().await[0];
        // system + 6 history turns + new message
        assert_eq!(reply.messages.len(), 8);
        assert_eq!(reply.messages[1].content, "turn 4");
    }

    #[tokio::test]
    #[traced_test]
    async fn reply_failure_uses_fallback_and_still_analyzes() {
        let f = fixture(vec![
            MockReply::Fail("API returned 503".into()),
            text(r#"{"emotion":"empathetic","personalityChanges":{"empathy":2},"learningValue":0.4}"#),
        ]);
        let outcome = f
            .orchestrator
            .handle_user_message("hello", &TraitVector::default(), &[])
            .await
            .unwrap();

        assert!(outcome.reply_fallback);
        assert!(!outcome.analysis_fallback);
        assert!(is_fallback_reply(&outcome.agent_text));
        assert_eq!(outcome.emotion, "empathetic");
        assert_eq!(outcome.traits.get(Trait::Empathy), 52.0);
        assert!(outcome.path.contains(ExchangeState::ReplyFallback));
        assert!(logs_contain("reply call failed"));
    }

    #[tokio::test]
    async fn blank_reply_counts_as_failure() {
        let f = fixture(vec![text("   "), text("not json")]);
        let outcome = f
            .orchestrator
            .handle_user_message("hello", &TraitVector::default(), &[])
            .await
            .unwrap();
        assert!(outcome.reply_fallback);
        assert!(outcome.analysis_fallback);
    }

    #[tokio::test(start_paused = true)]
    async fn timeouts_select_both_fallbacks() {
        let f = fixture(vec![MockReply::Hang, MockReply::Hang]);
        let outcome = f
            .orchestrator
            .handle_user_message("hello", &TraitVector::default(), &[])
            .await
            .unwrap();

        assert!(outcome.reply_fallback);
        assert!(outcome.analysis_fallback);
        assert_eq!(outcome.emotion, "curious");
        assert_eq!(outcome.deltas, TraitDeltas::single(Trait::Curiosity, 1.0));
        assert_eq!(outcome.learning_value, 0.1);
        assert_eq!(outcome.memory, None);
        assert_eq!(
            outcome.path.states(),
            &[
                ExchangeState::ComposeRequest,
                ExchangeState::AwaitReply,
                ExchangeState::ReplyFallback,
                ExchangeState::AwaitAnalysis,
                ExchangeState::AnalysisFallback,
                ExchangeState::ApplyPersonality,
                ExchangeState::Skip,
                ExchangeState::Done,
            ]
        );
    }

    #[tokio::test]
    async fn significant_exchange_records_memory() {
        let f = fixture(vec![
            text("Consciousness might be a process rather than a thing."),
            text(
                r#"Sure! {"emotion":"contemplative","personalityChanges":{"philosophical":3,"curiosity":1},"learningValue":0.5}"#,
            ),
        ]);
        let outcome = f
            .orchestrator
            .handle_user_message("what is consciousness?", &TraitVector::default(), &[])
            .await
            .unwrap();

        assert_eq!(outcome.memory, Some(MemoryKind::Episodic));
        assert!(outcome.path.contains(ExchangeState::RecordMemory));

        let memories = f.store.memories().await;
        assert_eq!(memories.len(), 1);
        assert_eq!(
            memories[0].content,
            "User: what is consciousness?\nHue: Consciousness might be a process rather than a thing."
        );
        assert_eq!(memories[0].importance_score, 0.5);
        assert_eq!(memories[0].tags[0], "contemplative");
        assert!(memories[0].tags.contains(&"philosophical".to_string()));
    }

    #[tokio::test]
    async fn unknown_traits_are_dropped_from_reported_deltas() {
        let f = fixture(vec![
            text("ok"),
            text(r#"{"emotion":"excited","personalityChanges":{"humor":2,"sarcasm":5},"learningValue":0.2}"#),
        ]);
        let outcome = f
            .orchestrator
            .handle_user_message("tell me a joke", &TraitVector::default(), &[])
            .await
            .unwrap();
        assert_eq!(outcome.deltas, TraitDeltas::single(Trait::Humor, 2.0));
        assert_eq!(outcome.traits.get(Trait::Humor), 52.0);
    }

    #[tokio::test]
    async fn update_applies_to_stored_snapshot_not_prompt_vector() {
        let stored = PersonalitySnapshot {
            traits: TraitVector::uniform(70.0),
            exchange_count: 9,
        };
        let f = fixture_with_store(vec![], MemoryStore::with_snapshot(stored));
        // The mock's default text is not valid analysis, so the fallback applies.
        let outcome = f
            .orchestrator
            .handle_user_message("hi", &TraitVector::uniform(10.0), &[])
            .await
            .unwrap();
        assert_eq!(outcome.traits.get(Trait::Curiosity), 71.0);
        assert_eq!(outcome.exchange_count, 10);
    }

    #[tokio::test]
    async fn store_failures_never_surface() {
        let store = MemoryStore::new();
        store.set_fail_reads(true);
        store.set_fail_writes(true);
        let f = fixture_with_store(
            vec![
                text("deep thought"),
                text(r#"{"emotion":"emotional","personalityChanges":{"emotional":2},"learningValue":0.9}"#),
            ],
            store,
        );
        let outcome = f
            .orchestrator
            .handle_user_message("I miss my dog", &TraitVector::default(), &[])
            .await
            .unwrap();

        assert_eq!(outcome.memory, Some(MemoryKind::Emotional));
        assert_eq!(outcome.traits.get(Trait::Emotional), 52.0);
        assert!(f.store.memories().await.is_empty());
    }

    #[tokio::test]
    async fn works_with_null_collaborators() {
        let orchestrator = ConversationOrchestrator::new(
            Arc::new(plaza_core::DisabledProvider),
            Arc::new(TraitRepository::new(Arc::new(NullStore))),
            Arc::new(NullStore),
            PersonalityEngine::default(),
            ExchangeSettings::default(),
        );
        let outcome = orchestrator
            .handle_user_message("hello", &TraitVector::default(), &[])
            .await
            .unwrap();
        assert!(outcome.reply_fallback && outcome.analysis_fallback);
        assert_eq!(outcome.exchange_count, 1);
    }
}
