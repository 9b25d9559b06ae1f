// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted text-generation provider for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` by popping pre-configured
//! steps from a FIFO queue and records every request it receives.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use plaza_core::{
    AdapterType, HealthStatus, PlazaError, PluginAdapter, ProviderAdapter, ProviderRequest,
    ProviderResponse, TokenUsage,
};

/// Text returned when the script is exhausted.
pub const DEFAULT_MOCK_REPLY: &str = "mock response";

/// One scripted provider step.
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Succeed with this text.
    Text(String),
    /// Fail with `ProviderUnavailable` carrying this message.
    Fail(String),
    /// Never answer. Only useful under a timeout.
    Hang,
}

/// A mock provider that replays a script of [`MockReply`] steps.
#[derive(Default)]
pub struct MockProvider {
    script: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider pre-loaded with the given steps.
    pub fn with_script(steps: Vec<MockReply>) -> Self {
        Self {
            script: Mutex::new(VecDeque::from(steps)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider answering each call with the next text.
    pub fn with_responses(texts: Vec<String>) -> Self {
        Self::with_script(texts.into_iter().map(MockReply::Text).collect())
    }

    pub async fn push(&self, step: MockReply) {
        self.script.lock().await.push_back(step);
    }

    pub async fn push_text(&self, text: impl Into<String>) {
        self.push(MockReply::Text(text.into())).await;
    }

    pub async fn push_failure(&self, message: impl Into<String>) {
        self.push(MockReply::Fail(message.into())).await;
    }

    /// Every request received so far, in call order.
    pub async fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn next_step(&self) -> MockReply {
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::Text(DEFAULT_MOCK_REPLY.to_string()))
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, PlazaError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PlazaError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, PlazaError> {
        let model = request.model.clone();
        self.requests.lock().await.push(request);

        match self.next_step().await {
            MockReply::Text(content) => Ok(ProviderResponse {
                id: format!("mock-resp-{}", uuid::Uuid::new_v4()),
                content,
                model,
                usage: Some(TokenUsage {
                    input_tokens: 10,
                    output_tokens: 20,
                }),
            }),
            MockReply::Fail(message) => Err(PlazaError::provider(message)),
            MockReply::Hang => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_core::ProviderMessage;

    fn request(model: &str) -> ProviderRequest {
        ProviderRequest {
            model: model.to_string(),
            messages: vec![ProviderMessage::user("hi")],
            max_tokens: 100,
            temperature: 0.5,
            presence_penalty: None,
            frequency_penalty: None,
        }
    }

    #[tokio::test]
    async fn default_response_when_script_empty() {
        let provider = MockProvider::new();
        let resp = provider.complete(request("m")).await.unwrap();
        assert_eq!(resp.content, DEFAULT_MOCK_REPLY);
    }

    #[tokio::test]
    async fn steps_replay_in_order_and_requests_are_captured() {
        let provider = MockProvider::with_script(vec![
            MockReply::Text("first".into()),
            MockReply::Fail("boom".into()),
        ]);

        assert_eq!(provider.complete(request("a")).await.unwrap().content, "first");
        let err = provider.complete(request("b")).await.unwrap_err();
        assert!(matches!(err, PlazaError::ProviderUnavailable { .. }));

        let models: Vec<_> = provider
            .requests()
            .await
            .into_iter()
            .map(|r| r.model)
            .collect();
        assert_eq!(models, vec!["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn hang_never_resolves() {
        let provider = MockProvider::with_script(vec![MockReply::Hang]);
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            provider.complete(request("m")),
        )
        .await;
        assert!(result.is_err());
    }
}
