// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for text-generation services.

use async_trait::async_trait;

use crate::error::PlazaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{AdapterType, HealthStatus, ProviderRequest, ProviderResponse};

/// Adapter for a text-generation service.
///
/// Given an ordered list of role-tagged messages and sampling parameters,
/// returns generated text or fails with [`PlazaError::ProviderUnavailable`].
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a completion request and returns the full response.
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, PlazaError>;
}

/// Stand-in used when no provider is configured. Every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledProvider;

#[async_trait]
impl PluginAdapter for DisabledProvider {
    fn name(&self) -> &str {
        "disabled"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, PlazaError> {
        Ok(HealthStatus::Unhealthy("no provider configured".into()))
    }

    async fn shutdown(&self) -> Result<(), PlazaError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for DisabledProvider {
    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, PlazaError> {
        Err(PlazaError::provider("no provider configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_provider_always_fails() {
        let provider = DisabledProvider;
        let request = ProviderRequest {
            model: "gpt-4".into(),
            messages: vec![],
            max_tokens: 10,
            temperature: 0.5,
            presence_penalty: None,
            frequency_penalty: None,
        };
        let err = provider.complete(request).await.unwrap_err();
        assert!(matches!(err, PlazaError::ProviderUnavailable { .. }));
        assert!(matches!(
            provider.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
    }
}
