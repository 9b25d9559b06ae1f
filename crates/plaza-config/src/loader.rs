// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./plaza.toml` > `~/.config/plaza/plaza.toml` > `/etc/plaza/plaza.toml`
//! with environment variable overrides via `PLAZA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PlazaConfig;

pub(crate) const SYSTEM_CONFIG_PATH: &str = "/etc/plaza/plaza.toml";
pub(crate) const LOCAL_CONFIG_PATH: &str = "plaza.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/plaza/plaza.toml` (system-wide)
/// 3. `~/.config/plaza/plaza.toml` (user XDG config)
/// 4. `./plaza.toml` (local directory)
/// 5. `PLAZA_*` environment variables
pub fn load_config() -> Result<PlazaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string on top of the compiled defaults.
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PlazaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlazaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PlazaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlazaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PlazaConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("plaza/plaza.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `PLAZA_CONVERSATION_HISTORY_WINDOW` must map to
/// `conversation.history_window`, not `conversation.history.window`.
fn env_provider() -> Env {
    Env::prefixed("PLAZA_").map(|key| map_env_key(&key.as_str().to_ascii_lowercase()).into())
}

/// Maps a prefix-stripped env var name onto a dotted config path.
///
/// figment hands the name over in its original case, so callers lowercase it first.
pub(crate) fn map_env_key(key: &str) -> String {
    const SECTIONS: [&str; 6] = [
        "agent",
        "openai",
        "conversation",
        "personality",
        "storage",
        "gateway",
    ];
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
