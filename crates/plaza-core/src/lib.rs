// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the plaza personality service.
//!
//! This crate provides the error type, the shared domain types, and the
//! adapter traits implemented by the provider and storage crates.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PlazaError;
pub use types::{
    AdapterType, Author, ConversationTurn, HealthStatus, MemoryKind, MemoryRecord,
    NEUTRAL_TRAIT_VALUE, PersonalitySnapshot, ProviderMessage, ProviderRequest, ProviderResponse,
    ProviderRole, TokenUsage, Trait, TraitDeltas, TraitVector,
};

pub use traits::{
    DisabledProvider, MemoryRecorder, NullStore, PersonalityStore, PluginAdapter,
    ProviderAdapter,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_type_round_trips() {
        use std::str::FromStr;

        for variant in [AdapterType::Provider, AdapterType::Storage] {
            let s = variant.to_string();
            assert_eq!(AdapterType::from_str(&s).unwrap(), variant);
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(serde_json::from_str::<AdapterType>(&json).unwrap(), variant);
        }
    }

    #[test]
    fn null_adapters_implement_collaborator_traits() {
        fn _assert_provider<T: ProviderAdapter>() {}
        fn _assert_store<T: PersonalityStore + MemoryRecorder>() {}
        _assert_provider::<DisabledProvider>();
        _assert_store::<NullStore>();
    }
}
