// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks the constraints serde cannot express: numeric ranges, the ordering
//! between related values, and non-empty strings.

use crate::diagnostic::ConfigError;
use crate::model::PlazaConfig;

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &PlazaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let p = &config.personality;
    check_unit_interval(
        &mut errors,
        "personality.significance_threshold",
        p.significance_threshold,
    );
    check_unit_interval(
        &mut errors,
        "personality.semantic_threshold",
        p.semantic_threshold,
    );
    if p.semantic_threshold < p.significance_threshold {
        errors.push(ConfigError::Validation {
            message: format!(
                "personality.semantic_threshold ({}) must not be below personality.significance_threshold ({})",
                p.semantic_threshold, p.significance_threshold
            ),
        });
    }

    let c = &config.conversation;
    check_temperature(&mut errors, "conversation.reply_temperature", c.reply_temperature);
    check_temperature(
        &mut errors,
        "conversation.analysis_temperature",
        c.analysis_temperature,
    );
    if c.reply_temperature <= c.analysis_temperature {
        errors.push(ConfigError::Validation {
            message: format!(
                "conversation.reply_temperature ({}) must be greater than conversation.analysis_temperature ({})",
                c.reply_temperature, c.analysis_temperature
            ),
        });
    }
    for (key, value) in [
        ("conversation.presence_penalty", c.presence_penalty),
        ("conversation.frequency_penalty", c.frequency_penalty),
    ] {
        if !(-2.0..=2.0).contains(&value) {
            errors.push(ConfigError::OutOfRange {
                key: key.to_string(),
                value: value.to_string(),
                constraint: "must be within [-2, 2]".to_string(),
            });
        }
    }
    if c.history_window < 1 {
        errors.push(ConfigError::OutOfRange {
            key: "conversation.history_window".to_string(),
            value: c.history_window.to_string(),
            constraint: "must be at least 1".to_string(),
        });
    }
    if c.reply_max_tokens == 0 || c.analysis_max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "conversation.reply_max_tokens and conversation.analysis_max_tokens must be positive"
                .to_string(),
        });
    }
    if c.provider_timeout_secs == 0 {
        errors.push(ConfigError::OutOfRange {
            key: "conversation.provider_timeout_secs".to_string(),
            value: "0".to_string(),
            constraint: "must be greater than 0".to_string(),
        });
    }

    for (key, value) in [
        ("agent.name", &config.agent.name),
        ("agent.display_name", &config.agent.display_name),
        ("openai.base_url", &config.openai.base_url),
        ("openai.reply_model", &config.openai.reply_model),
        ("openai.analysis_model", &config.openai.analysis_model),
        ("gateway.host", &config.gateway.host),
    ] {
        if value.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    }

    if config.storage.enabled && config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unit_interval(errors: &mut Vec<ConfigError>, key: &str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(ConfigError::OutOfRange {
            key: key.to_string(),
            value: value.to_string(),
            constraint: "must be within [0, 1]".to_string(),
        });
    }
}

fn check_temperature(errors: &mut Vec<ConfigError>, key: &str, value: f64) {
    if !(0.0..=2.0).contains(&value) {
        errors.push(ConfigError::OutOfRange {
            key: key.to_string(),
            value: value.to_string(),
            constraint: "must be within [0, 2]".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error_about(errors: &[ConfigError], needle: &str) -> bool {
        errors.iter().any(|e| match e {
            ConfigError::Validation { message } => message.contains(needle),
            ConfigError::OutOfRange { key, .. } => key.contains(needle),
            _ => false,
        })
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&PlazaConfig::default()).is_ok());
    }

    #[test]
    fn threshold_outside_unit_interval_fails() {
        let mut config = PlazaConfig::default();
        config.personality.significance_threshold = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error_about(&errors, "significance_threshold"));
    }

    #[test]
    fn semantic_below_significance_fails() {
        let mut config = PlazaConfig::default();
        config.personality.significance_threshold = 0.6;
        config.personality.semantic_threshold = 0.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error_about(&errors, "must not be below"));
    }

    #[test]
    fn reply_must_be_warmer_than_analysis() {
        let mut config = PlazaConfig::default();
        config.conversation.reply_temperature = 0.3;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error_about(&errors, "must be greater than"));
    }

    #[test]
    fn zero_history_window_and_timeout_fail_together() {
        let mut config = PlazaConfig::default();
        config.conversation.history_window = 0;
        config.conversation.provider_timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error_about(&errors, "history_window"));
        assert!(has_error_about(&errors, "provider_timeout_secs"));
    }

    #[test]
    fn empty_database_path_only_matters_when_storage_enabled() {
        let mut config = PlazaConfig::default();
        config.storage.database_path = " ".to_string();
        assert!(has_error_about(
            &validate_config(&config).unwrap_err(),
            "database_path"
        ));

        config.storage.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_host_fails() {
        let mut config = PlazaConfig::default();
        config.gateway.host = String::new();
        assert!(has_error_about(
            &validate_config(&config).unwrap_err(),
            "gateway.host"
        ));
    }
}
