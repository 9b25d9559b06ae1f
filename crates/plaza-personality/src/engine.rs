// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait updates and memory significance rules.

use plaza_config::model::PersonalityConfig;
use plaza_core::{MemoryKind, MemoryRecord, TraitDeltas, TraitVector};

use crate::analysis::ExchangeAnalysis;

/// Learning value above which an exchange becomes a memory.
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.3;

/// Learning value above which a memory is classified as semantic.
pub const SEMANTIC_THRESHOLD: f64 = 0.7;

/// Emotion label that forces the emotional memory kind.
const EMOTIONAL_LABEL: &str = "emotional";

/// Degrees on the color wheel per trait point.
const HUE_SCALE: f64 = 3.6;

/// Applies deltas to a vector, clamping every touched trait into `[0, 100]`.
///
/// Traits absent from `deltas` are unchanged. Unknown trait names and
/// non-finite values are skipped.
pub fn apply_deltas(current: &TraitVector, deltas: &TraitDeltas) -> TraitVector {
    let mut next = *current;
    for (t, delta) in deltas.known() {
        next.set(t, current.get(t) + delta);
    }
    next
}

/// True when an exchange should be stored as a memory.
pub fn is_significant(learning_value: f64) -> bool {
    Thresholds::default().is_significant(learning_value)
}

/// Memory kind for a significant exchange.
pub fn classify_memory(learning_value: f64, emotion: &str) -> MemoryKind {
    Thresholds::default().classify(learning_value, emotion)
}

/// Arithmetic mean of the eight trait values.
pub fn average_trait(vector: &TraitVector) -> f64 {
    let (sum, count) = vector
        .entries()
        .fold((0.0, 0usize), |(sum, n), (_, v)| (sum + v, n + 1));
    sum / count as f64
}

/// Color-wheel degree derived from the average trait, in `[0, 360]`.
pub fn hue_degrees(vector: &TraitVector) -> u16 {
    (average_trait(vector) * HUE_SCALE).round() as u16
}

/// The two learning-value cut-offs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub significance: f64,
    pub semantic: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            significance: SIGNIFICANCE_THRESHOLD,
            semantic: SEMANTIC_THRESHOLD,
        }
    }
}

impl From<&PersonalityConfig> for Thresholds {
    fn from(config: &PersonalityConfig) -> Self {
        Self {
            significance: config.significance_threshold,
            semantic: config.semantic_threshold,
        }
    }
}

impl Thresholds {
    pub fn is_significant(&self, learning_value: f64) -> bool {
        learning_value > self.significance
    }

    pub fn classify(&self, learning_value: f64, emotion: &str) -> MemoryKind {
        if emotion == EMOTIONAL_LABEL {
            MemoryKind::Emotional
        } else if learning_value > self.semantic {
            MemoryKind::Semantic
        } else {
            MemoryKind::Episodic
        }
    }
}

/// Owns the update and memory rules for one agent identity.
#[derive(Debug, Clone)]
pub struct PersonalityEngine {
    thresholds: Thresholds,
    agent_name: String,
}

impl Default for PersonalityEngine {
    fn default() -> Self {
        Self::new(Thresholds::default(), "Hue")
    }
}

impl PersonalityEngine {
    pub fn new(thresholds: Thresholds, agent_name: impl Into<String>) -> Self {
        Self {
            thresholds,
            agent_name: agent_name.into(),
        }
    }

    /// Builds an engine from the `[personality]` section and the agent's display name.
    pub fn from_config(config: &PersonalityConfig, agent_name: impl Into<String>) -> Self {
        Self::new(Thresholds::from(config), agent_name)
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    pub fn apply(&self, current: &TraitVector, deltas: &TraitDeltas) -> TraitVector {
        apply_deltas(current, deltas)
    }

    pub fn is_significant(&self, learning_value: f64) -> bool {
        self.thresholds.is_significant(learning_value)
    }

    pub fn classify(&self, learning_value: f64, emotion: &str) -> MemoryKind {
        self.thresholds.classify(learning_value, emotion)
    }

    /// Builds the memory record for an exchange, or `None` when it is not significant.
    ///
    /// Tags are the emotion label followed by every known trait with a
    /// non-zero delta, without duplicates.
    pub fn memory_for(
        &self,
        user_text: &str,
        agent_text: &str,
        analysis: &ExchangeAnalysis,
    ) -> Option<MemoryRecord> {
        if !self.is_significant(analysis.learning_value) {
            return None;
        }

        let mut tags = vec![analysis.emotion.clone()];
        for (t, _) in analysis
            .personality_changes
            .known()
            .filter(|(_, delta)| *delta != 0.0)
        {
            let name = t.as_str();
            if !tags.iter().any(|tag| tag == name) {
                tags.push(name.to_string());
            }
        }

        Some(MemoryRecord {
            memory_type: self.classify(analysis.learning_value, &analysis.emotion),
            content: format!("User: {user_text}\n{}: {agent_text}", self.agent_name),
            emotional_weight: analysis.learning_value,
            importance_score: analysis.learning_value,
            tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_core::Trait;

    fn analysis(emotion: &str, deltas: TraitDeltas, learning_value: f64) -> ExchangeAnalysis {
        ExchangeAnalysis {
            emotion: emotion.to_string(),
            personality_changes: deltas,
            learning_value,
        }
    }

    #[test]
    fn apply_adds_and_clamps() {
        let v = TraitVector::default().with(Trait::Humor, 99.0);
        let next = apply_deltas(
            &v,
            &TraitDeltas::from([(Trait::Humor, 3.0), (Trait::Technical, -60.0)]),
        );
        assert_eq!(next.get(Trait::Humor), 100.0);
        assert_eq!(next.get(Trait::Technical), 0.0);
        assert_eq!(next.get(Trait::Empathy), 50.0);
    }

    #[test]
    fn apply_ignores_unknown_names() {
        let v = TraitVector::default();
        let next = apply_deltas(&v, &TraitDeltas::new().with("wisdom", 5.0));
        assert_eq!(next, v);
    }

    #[test]
    fn significance_boundary_is_exclusive() {
        assert!(!is_significant(0.3));
        assert!(is_significant(0.31));
        assert!(!is_significant(0.0));
    }

    #[test]
    fn classification_examples() {
        assert_eq!(classify_memory(0.8, "curious"), MemoryKind::Semantic);
        assert_eq!(classify_memory(0.5, "curious"), MemoryKind::Episodic);
        assert_eq!(classify_memory(0.5, "emotional"), MemoryKind::Emotional);
        assert_eq!(classify_memory(0.9, "emotional"), MemoryKind::Emotional);
        assert_eq!(classify_memory(0.7, "curious"), MemoryKind::Episodic);
        assert_eq!(classify_memory(0.5, "Emotional"), MemoryKind::Episodic);
    }

    #[test]
    fn neutral_vector_average_and_hue() {
        let v = TraitVector::default();
        assert_eq!(average_trait(&v), 50.0);
        assert_eq!(hue_degrees(&v), 180);
        assert_eq!(hue_degrees(&TraitVector::uniform(100.0)), 360);
        assert_eq!(hue_degrees(&TraitVector::uniform(0.0)), 0);
    }

    #[test]
    fn memory_for_significant_philosophical_exchange() {
        let engine = PersonalityEngine::default();
        let record = engine
            .memory_for(
                "what is a self?",
                "a pattern that persists",
                &analysis(
                    "philosophical",
                    TraitDeltas::single(Trait::Philosophical, 3.0),
                    0.75,
                ),
            )
            .unwrap();
        assert_eq!(record.memory_type, MemoryKind::Semantic);
        assert_eq!(record.importance_score, 0.75);
        assert_eq!(record.emotional_weight, 0.75);
        assert_eq!(record.tags, vec!["philosophical".to_string()]);
        assert_eq!(
            record.content,
            "User: what is a self?\nHue: a pattern that persists"
        );
    }

    #[test]
    fn memory_tags_list_emotion_then_changed_traits() {
        let engine = PersonalityEngine::new(Thresholds::default(), "Aster");
        let deltas = TraitDeltas::from([(Trait::Empathy, 2.0), (Trait::Curiosity, 1.0)])
            .with("wisdom", 1.0);
        let record = engine
            .memory_for("hi", "hello", &analysis("empathetic", deltas, 0.5))
            .unwrap();
        assert_eq!(record.tags, vec!["empathetic", "curiosity", "empathy"]);
        assert!(record.content.contains("\nAster: hello"));
        assert_eq!(record.memory_type, MemoryKind::Episodic);
    }

    #[test]
    fn zero_deltas_are_not_tagged() {
        let engine = PersonalityEngine::default();
        let deltas = TraitDeltas::from([(Trait::Humor, 0.0), (Trait::Creativity, 2.0)]);
        let record = engine
            .memory_for("draw me a cat", "here it is", &analysis("excited", deltas, 0.6))
            .unwrap();
        assert_eq!(record.tags, vec!["excited", "creativity"]);
    }

    #[test]
    fn insignificant_exchange_has_no_memory() {
        let engine = PersonalityEngine::default();
        assert!(
            engine
                .memory_for("hi", "hello", &ExchangeAnalysis::fallback())
                .is_none()
        );
    }

    #[test]
    fn thresholds_follow_config() {
        let config = PersonalityConfig {
            significance_threshold: 0.1,
            semantic_threshold: 0.4,
        };
        let engine = PersonalityEngine::from_config(&config, "Hue");
        assert!(engine.is_significant(0.2));
        assert_eq!(engine.classify(0.5, "calm"), MemoryKind::Semantic);
    }
}
