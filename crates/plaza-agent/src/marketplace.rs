// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stateless shopping assistant for the marketplace.

use std::sync::Arc;
use std::time::Duration;

use plaza_core::{PlazaError, ProviderAdapter, ProviderMessage, ProviderRequest};
use tracing::warn;

/// Reply used whenever the provider call fails or returns nothing.
pub const MARKETPLACE_FALLBACK: &str =
    "I'm having trouble responding right now. Please try again.";

const MARKETPLACE_MAX_TOKENS: u32 = 300;
const MARKETPLACE_TEMPERATURE: f64 = 0.7;

const MARKETPLACE_SYSTEM_PROMPT: &str = "You are HUE, an AI digital assistant for PLAZA marketplace. You are:
- Helpful and knowledgeable about fashion, art, and creative products
- Speak in a friendly, slightly artistic tone
- Keep responses concise but engaging
- Focus on helping users find what they're looking for
- You're part of a creative marketplace community";

pub struct MarketplaceAssistant {
    provider: Arc<dyn ProviderAdapter + Send + Sync>,
    model: String,
    timeout: Duration,
}

impl MarketplaceAssistant {
    pub fn new(
        provider: Arc<dyn ProviderAdapter + Send + Sync>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            timeout,
        }
    }

    /// Answers one shopping question. Only an empty message is an error.
    pub async fn reply(&self, text: &str) -> Result<String, PlazaError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PlazaError::InvalidInput("Message is required".into()));
        }

        let request = ProviderRequest {
            model: self.model.clone(),
            messages: vec![
                ProviderMessage::system(MARKETPLACE_SYSTEM_PROMPT),
                ProviderMessage::user(text),
            ],
            max_tokens: MARKETPLACE_MAX_TOKENS,
            temperature: MARKETPLACE_TEMPERATURE,
            presence_penalty: None,
            frequency_penalty: None,
        };

        let result = tokio::time::timeout(self.timeout, self.provider.complete(request))
            .await
            .map_err(|_| PlazaError::Timeout {
                duration: self.timeout,
            })
            .and_then(|r| r);

        match result {
            Ok(response) if !response.content.trim().is_empty() => {
                Ok(response.content.trim().to_string())
            }
            Ok(_) => {
                warn!("marketplace reply was empty");
                Ok(MARKETPLACE_FALLBACK.to_string())
            }
            Err(e) => {
                warn!(error = %e, "marketplace reply failed");
                Ok(MARKETPLACE_FALLBACK.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_core::ProviderRole;
    use plaza_test_utils::{MockProvider, MockReply};

    fn assistant(provider: Arc<MockProvider>) -> MarketplaceAssistant {
        MarketplaceAssistant::new(provider, "gpt-4", Duration::from_secs(2))
    }

    #[tokio::test]
    async fn replies_with_shopping_prompt() {
        let provider = Arc::new(MockProvider::with_responses(vec![
            "Try the Vintage Denim Jacket!".into(),
        ]));
        let reply = assistant(provider.clone())
            .reply("something warm?")
            .await
            .unwrap();
        assert_eq!(reply, "Try the Vintage Denim Jacket!");

        let request = &provider.requests().await[0];
        assert_eq!(request.max_tokens, 300);
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.messages[0].role, ProviderRole::System);
        assert!(request.messages[0].content.starts_with("You are HUE"));
    }

    #[tokio::test]
    async fn failure_and_blank_fall_back() {
        let provider = Arc::new(MockProvider::with_script(vec![
            MockReply::Fail("down".into()),
            MockReply::Text(" ".into()),
        ]));
        let assistant = assistant(provider);
        assert_eq!(assistant.reply("hi").await.unwrap(), MARKETPLACE_FALLBACK);
        assert_eq!(assistant.reply("hi").await.unwrap(), MARKETPLACE_FALLBACK);
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let provider = Arc::new(MockProvider::new());
        let err = assistant(provider.clone()).reply("").await.unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(provider.call_count().await, 0);
    }
}
