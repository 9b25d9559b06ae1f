// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat-completions provider adapter for plaza.
//!
//! Implements [`ProviderAdapter`] over `POST {base_url}/chat/completions`.
//! Any transport failure, non-success status, or empty completion surfaces
//! as [`PlazaError::ProviderUnavailable`].

pub mod client;
pub mod types;

use async_trait::async_trait;
use plaza_config::model::OpenAiConfig;
use plaza_core::{
    AdapterType, HealthStatus, PlazaError, PluginAdapter, ProviderAdapter, ProviderRequest,
    ProviderResponse, TokenUsage,
};
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::{ChatCompletionRequest, ChatMessage};

/// OpenAI provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    /// Creates a provider from the `[openai]` config section.
    pub fn new(config: &OpenAiConfig) -> Result<Self, PlazaError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            PlazaError::provider(
                "no OpenAI API key: set openai.api_key in plaza.toml or the OPENAI_API_KEY environment variable",
            )
        })?;
        let client = OpenAiClient::new(&api_key, &config.base_url)?;

        info!(
            base_url = %client.base_url(),
            reply_model = %config.reply_model,
            analysis_model = %config.analysis_model,
            "OpenAI provider initialized"
        );
        Ok(Self { client })
    }

    /// Creates a provider around an existing client.
    pub fn with_client(client: OpenAiClient) -> Self {
        Self { client }
    }

    fn to_chat_request(request: &ProviderRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: request.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.to_string(),
                    content: Some(m.content.clone()),
                })
                .collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            presence_penalty: request.presence_penalty,
            frequency_penalty: request.frequency_penalty,
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, PlazaError> {
        // No API call: health checks must not spend tokens.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PlazaError> {
        debug!("OpenAI provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, PlazaError> {
        let api_request = Self::to_chat_request(&request);
        let response = self.client.create_completion(&api_request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| PlazaError::provider("completion contained no text"))?;

        Ok(ProviderResponse {
            id: response.id,
            content,
            model: response.model,
            usage: response.usage.map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_core::ProviderMessage;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> OpenAiProvider {
        let client = OpenAiClient::new("sk-test", &server.uri())
            .unwrap()
            .with_retry_delay(Duration::from_millis(10));
        OpenAiProvider::with_client(client)
    }

    fn request() -> ProviderRequest {
        ProviderRequest {
            model: "gpt-4".into(),
            messages: vec![
                ProviderMessage::system("You are Hue."),
                ProviderMessage::user("hello"),
            ],
            max_tokens: 500,
            temperature: 0.8,
            presence_penalty: Some(0.3),
            frequency_penalty: None,
        }
    }

    #[test]
    fn roles_are_lowercase_on_the_wire() {
        let api = OpenAiProvider::to_chat_request(&request());
        assert_eq!(api.messages[0].role, "system");
        assert_eq!(api.messages[1].role, "user");
        assert_eq!(api.presence_penalty, Some(0.3));
        assert_eq!(api.frequency_penalty, None);
    }

    #[test]
    fn missing_api_key_is_provider_unavailable() {
        let config = OpenAiConfig {
            api_key: Some("   ".into()),
            ..OpenAiConfig::default()
        };
        // Only meaningful when the environment does not supply a key.
        if std::env::var(plaza_config::model::OPENAI_API_KEY_ENV).is_err() {
            let err = OpenAiProvider::new(&config).unwrap_err();
            assert!(matches!(err, PlazaError::ProviderUnavailable { .. }));
        }
    }

    #[test]
    fn configured_key_builds_provider() {
        let config = OpenAiConfig {
            api_key: Some("sk-configured".into()),
            base_url: "http://localhost:9/v1".into(),
            ..OpenAiConfig::default()
        };
        let provider = OpenAiProvider::new(&config).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.client.base_url(), "http://localhost:9/v1");
    }

    #[tokio::test]
    async fn complete_maps_first_choice_and_usage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "messages": [
                    {"role": "system", "content": "You are Hue."},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-1",
                "model": "gpt-4-0613",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "Hello there."}, "finish_reason": "stop"},
                    {"index": 1, "message": {"role": "assistant", "content": "ignored"}, "finish_reason": "stop"}
                ],
                "usage": {"prompt_tokens": 20, "completion_tokens": 3, "total_tokens": 23}
            })))
            .mount(&server)
            .await;

        let response = provider_for(&server).complete(request()).await.unwrap();
        assert_eq!(response.id, "chatcmpl-1");
        assert_eq!(response.content, "Hello there.");
        assert_eq!(response.model, "gpt-4-0613");
        assert_eq!(
            response.usage,
            Some(TokenUsage {
                input_tokens: 20,
                output_tokens: 3
            })
        );
    }

    #[tokio::test]
    async fn empty_choices_is_provider_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-2",
                "model": "gpt-4",
                "choices": []
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server).complete(request()).await.unwrap_err();
        assert!(matches!(err, PlazaError::ProviderUnavailable { .. }));
    }

    #[tokio::test]
    async fn blank_content_is_provider_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-3",
                "model": "gpt-4",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "  "}}]
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server).complete(request()).await.unwrap_err();
        assert!(err.to_string().contains("no text"));
    }

    #[tokio::test]
    async fn health_check_does_not_call_the_api() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert_eq!(provider.health_check().await.unwrap(), HealthStatus::Healthy);
    }
}
