// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Personality engine for the plaza agent.
//!
//! Pure, synchronous logic: applying trait deltas, deciding whether an
//! exchange is worth remembering and what kind of memory it becomes, and
//! decoding the structured analysis a provider returns for an exchange.

pub mod analysis;
pub mod engine;

pub use analysis::{AnalysisOutcome, ExchangeAnalysis, decode_analysis};
pub use engine::{
    PersonalityEngine, SEMANTIC_THRESHOLD, SIGNIFICANCE_THRESHOLD, Thresholds, apply_deltas,
    average_trait, classify_memory, hue_degrees, is_significant,
};
