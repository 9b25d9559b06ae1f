// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the plaza personality service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Environment variable consulted when `openai.api_key` is unset.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Top-level plaza configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlazaConfig {
    /// Agent identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// OpenAI API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Prompt shape and sampling parameters for each exchange.
    #[serde(default)]
    pub conversation: ConversationConfig,

    /// Thresholds used by the personality engine.
    #[serde(default)]
    pub personality: PersonalityConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Agent identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Internal name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Name the agent signs with in prompts and memory records.
    #[serde(default = "default_display_name")]
    pub display_name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            display_name: default_display_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "hue".to_string()
}

fn default_display_name() -> String {
    "Hue".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// OpenAI API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` falls back to `OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the chat-completions API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used to generate replies.
    #[serde(default = "default_reply_model")]
    pub reply_model: String,

    /// Model used to analyze finished exchanges.
    #[serde(default = "default_analysis_model")]
    pub analysis_model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            reply_model: default_reply_model(),
            analysis_model: default_analysis_model(),
        }
    }
}

impl OpenAiConfig {
    /// Returns the configured key, or the `OPENAI_API_KEY` environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(OPENAI_API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_reply_model() -> String {
    "gpt-4".to_string()
}

fn default_analysis_model() -> String {
    "gpt-3.5-turbo".to_string()
}

/// Prompt and sampling configuration for reply and analysis calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConversationConfig {
    /// Number of most recent turns included in the reply prompt.
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    #[serde(default = "default_reply_max_tokens")]
    pub reply_max_tokens: u32,

    #[serde(default = "default_reply_temperature")]
    pub reply_temperature: f64,

    #[serde(default = "default_presence_penalty")]
    pub presence_penalty: f64,

    #[serde(default = "default_frequency_penalty")]
    pub frequency_penalty: f64,

    #[serde(default = "default_analysis_max_tokens")]
    pub analysis_max_tokens: u32,

    #[serde(default = "default_analysis_temperature")]
    pub analysis_temperature: f64,

    /// Upper bound on a single provider call, in seconds.
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            reply_max_tokens: default_reply_max_tokens(),
            reply_temperature: default_reply_temperature(),
            presence_penalty: default_presence_penalty(),
            frequency_penalty: default_frequency_penalty(),
            analysis_max_tokens: default_analysis_max_tokens(),
            analysis_temperature: default_analysis_temperature(),
            provider_timeout_secs: default_provider_timeout_secs(),
        }
    }
}

fn default_history_window() -> usize {
    6
}

fn default_reply_max_tokens() -> u32 {
    500
}

fn default_reply_temperature() -> f64 {
    0.8
}

fn default_presence_penalty() -> f64 {
    0.3
}

fn default_frequency_penalty() -> f64 {
    0.2
}

fn default_analysis_max_tokens() -> u32 {
    200
}

fn default_analysis_temperature() -> f64 {
    0.3
}

fn default_provider_timeout_secs() -> u64 {
    8
}

/// Personality engine thresholds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PersonalityConfig {
    /// Learning value above which an exchange is stored as a memory.
    #[serde(default = "default_significance_threshold")]
    pub significance_threshold: f64,

    /// Learning value above which a memory is semantic.
    #[serde(default = "default_semantic_threshold")]
    pub semantic_threshold: f64,
}

impl Default for PersonalityConfig {
    fn default() -> Self {
        Self {
            significance_threshold: default_significance_threshold(),
            semantic_threshold: default_semantic_threshold(),
        }
    }
}

fn default_significance_threshold() -> f64 {
    0.3
}

fn default_semantic_threshold() -> f64 {
    0.7
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// When false, snapshots and memories are not persisted.
    #[serde(default = "default_storage_enabled")]
    pub enabled: bool,

    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: default_storage_enabled(),
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_storage_enabled() -> bool {
    true
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("plaza").join("plaza.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("plaza.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Address to bind the HTTP server to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_exchange_parameters() {
        let config = PlazaConfig::default();
        assert_eq!(config.conversation.history_window, 6);
        assert_eq!(config.conversation.reply_max_tokens, 500);
        assert_eq!(config.conversation.analysis_max_tokens, 200);
        assert_eq!(config.openai.reply_model, "gpt-4");
        assert_eq!(config.openai.analysis_model, "gpt-3.5-turbo");
        assert_eq!(config.personality.significance_threshold, 0.3);
        assert_eq!(config.personality.semantic_threshold, 0.7);
    }

    #[test]
    fn explicit_api_key_wins_over_env() {
        let config = OpenAiConfig {
            api_key: Some("sk-from-file".into()),
            ..OpenAiConfig::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-from-file"));
    }

    #[test]
    fn partial_section_fills_defaults() {
        let config: PlazaConfig = toml::from_str(
            r#"
[conversation]
history_window = 10
"#,
        )
        .unwrap();
        assert_eq!(config.conversation.history_window, 10);
        assert_eq!(config.conversation.reply_temperature, 0.8);
        assert_eq!(config.gateway.port, 3000);
    }
}
