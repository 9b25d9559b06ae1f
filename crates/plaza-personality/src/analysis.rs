// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoding of the structured exchange analysis returned by a provider.
//!
//! The provider is asked for a JSON object of the shape
//! `{"emotion": "...", "personalityChanges": {"trait": n}, "learningValue": n}`.
//! Models sometimes wrap it in a markdown fence or a sentence of prose, so the
//! decoder looks for the outermost object before parsing. All three fields are
//! required; anything that does not fit the schema yields
//! [`AnalysisOutcome::Fallback`] as a whole.

use plaza_core::{Trait, TraitDeltas};
use serde::Deserialize;
use tracing::debug;

/// Emotion label used when no analysis is available.
pub const FALLBACK_EMOTION: &str = "curious";

/// Learning value used when no analysis is available.
pub const FALLBACK_LEARNING_VALUE: f64 = 0.1;

/// The derived judgment for one user/agent exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeAnalysis {
    pub emotion: String,
    pub personality_changes: TraitDeltas,
    /// Significance of the exchange, within `[0, 1]`.
    pub learning_value: f64,
}

impl ExchangeAnalysis {
    /// Safe default: a small curiosity nudge that is never memorable.
    pub fn fallback() -> Self {
        Self {
            emotion: FALLBACK_EMOTION.to_string(),
            personality_changes: TraitDeltas::single(Trait::Curiosity, 1.0),
            learning_value: FALLBACK_LEARNING_VALUE,
        }
    }
}

/// Result of decoding provider output.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Parsed(ExchangeAnalysis),
    /// Decoding failed; carries the reason for logging.
    Fallback(String),
}

impl AnalysisOutcome {
    /// The parsed analysis, or [`ExchangeAnalysis::fallback`].
    pub fn into_analysis(self) -> ExchangeAnalysis {
        match self {
            AnalysisOutcome::Parsed(analysis) => analysis,
            AnalysisOutcome::Fallback(_) => ExchangeAnalysis::fallback(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisOutcome::Fallback(_))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    emotion: String,
    personality_changes: TraitDeltas,
    learning_value: f64,
}

/// Decodes provider text into an [`AnalysisOutcome`].
pub fn decode_analysis(text: &str) -> AnalysisOutcome {
    let Some(json) = extract_object(text) else {
        return AnalysisOutcome::Fallback("no JSON object in analysis output".into());
    };

    let raw: RawAnalysis = match serde_json::from_str(json) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(raw = text, "analysis output did not decode");
            return AnalysisOutcome::Fallback(format!("analysis output did not decode: {e}"));
        }
    };

    let emotion = raw.emotion.trim();
    if emotion.is_empty() {
        return AnalysisOutcome::Fallback("analysis emotion is empty".into());
    }
    if !raw.learning_value.is_finite() {
        return AnalysisOutcome::Fallback("analysis learning value is not finite".into());
    }
    if raw.personality_changes.iter().any(|(_, d)| !d.is_finite()) {
        return AnalysisOutcome::Fallback("analysis delta is not finite".into());
    }

    AnalysisOutcome::Parsed(ExchangeAnalysis {
        emotion: emotion.to_string(),
        personality_changes: raw.personality_changes,
        learning_value: raw.learning_value.clamp(0.0, 1.0),
    })
}

/// Slice from the first `{` to the last `}`, if both exist in that order.
fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
