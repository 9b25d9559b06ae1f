// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the plaza personality service.

use thiserror::Error;

/// The primary error type used across all plaza adapter traits and core operations.
#[derive(Debug, Error)]
pub enum PlazaError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// The text-generation provider could not be reached or returned a non-success status.
    #[error("provider unavailable: {message}")]
    ProviderUnavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider answered, but the text does not decode into the expected shape.
    #[error("malformed provider output: {message}")]
    MalformedOutput { message: String },

    /// Persistence backend errors (database connection, query failure, serialization).
    #[error("store unavailable: {source}")]
    StoreUnavailable {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Empty or missing user input. Rejected before any collaborator is called.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PlazaError {
    /// Shorthand for a provider failure without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        PlazaError::ProviderUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true when the error is the caller's fault rather than a collaborator's.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PlazaError::InvalidInput(_))
    }
}
