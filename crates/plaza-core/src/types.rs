// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the plaza service.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Value every trait starts from.
pub const NEUTRAL_TRAIT_VALUE: f64 = 50.0;

/// Lower bound of every trait value.
pub const TRAIT_MIN: f64 = 0.0;

/// Upper bound of every trait value.
pub const TRAIT_MAX: f64 = 100.0;

/// Number of tracked personality traits.
pub const TRAIT_COUNT: usize = 8;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Storage,
}

// --- Personality types ---

/// One of the eight personality dimensions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Trait {
    Curiosity,
    Empathy,
    Creativity,
    Assertiveness,
    Humor,
    Philosophical,
    Technical,
    Emotional,
}

impl Trait {
    /// All traits in declaration order.
    pub const ALL: [Trait; TRAIT_COUNT] = [
        Trait::Curiosity,
        Trait::Empathy,
        Trait::Creativity,
        Trait::Assertiveness,
        Trait::Humor,
        Trait::Philosophical,
        Trait::Technical,
        Trait::Emotional,
    ];

    /// Lowercase name used in prompts, JSON and tags.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Bounded personality trait vector. Every value stays within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "TraitVectorRepr", into = "TraitVectorRepr")]
pub struct TraitVector {
    values: [f64; TRAIT_COUNT],
}

impl TraitVector {
    /// A vector with every trait set to `value` (clamped).
    pub fn uniform(value: f64) -> Self {
        Self {
            values: [clamp_trait(value); TRAIT_COUNT],
        }
    }

    /// Returns the value of a single trait.
    pub fn get(&self, t: Trait) -> f64 {
        self.values[t.index()]
    }

    /// Sets a trait, clamping into `[0, 100]`.
    pub fn set(&mut self, t: Trait, value: f64) {
        self.values[t.index()] = clamp_trait(value);
    }

    /// Builder-style variant of [`TraitVector::set`].
    pub fn with(mut self, t: Trait, value: f64) -> Self {
        self.set(t, value);
        self
    }

    /// Iterates `(trait, value)` pairs in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (Trait, f64)> + '_ {
        Trait::ALL.iter().map(move |t| (*t, self.get(*t)))
    }
}

impl Default for TraitVector {
    fn default() -> Self {
        Self::uniform(NEUTRAL_TRAIT_VALUE)
    }
}

fn clamp_trait(value: f64) -> f64 {
    if value.is_nan() {
        return NEUTRAL_TRAIT_VALUE;
    }
    value.clamp(TRAIT_MIN, TRAIT_MAX)
}

/// Named-field wire form of [`TraitVector`]. Missing traits default to neutral.
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct TraitVectorRepr {
    curiosity: f64,
    empathy: f64,
    creativity: f64,
    assertiveness: f64,
    humor: f64,
    philosophical: f64,
    technical: f64,
    emotional: f64,
}

impl Default for TraitVectorRepr {
    fn default() -> Self {
        TraitVector::default().into()
    }
}

impl From<TraitVectorRepr> for TraitVector {
    fn from(r: TraitVectorRepr) -> Self {
        TraitVector::default()
            .with(Trait::Curiosity, r.curiosity)
            .with(Trait::Empathy, r.empathy)
            .with(Trait::Creativity, r.creativity)
            .with(Trait::Assertiveness, r.assertiveness)
            .with(Trait::Humor, r.humor)
            .with(Trait::Philosophical, r.philosophical)
            .with(Trait::Technical, r.technical)
            .with(Trait::Emotional, r.emotional)
    }
}

impl From<TraitVector> for TraitVectorRepr {
    fn from(v: TraitVector) -> Self {
        Self {
            curiosity: v.get(Trait::Curiosity),
            empathy: v.get(Trait::Empathy),
            creativity: v.get(Trait::Creativity),
            assertiveness: v.get(Trait::Assertiveness),
            humor: v.get(Trait::Humor),
            philosophical: v.get(Trait::Philosophical),
            technical: v.get(Trait::Technical),
            emotional: v.get(Trait::Emotional),
        }
    }
}

/// A partial trait vector of signed adjustments, keyed by trait name.
///
/// Names are kept as free-form strings because they come from model output;
/// unrecognized names survive decoding and are skipped when applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitDeltas(BTreeMap<String, f64>);

impl TraitDeltas {
    pub fn new() -> Self {
        Self::default()
    }

    /// A delta map touching exactly one trait.
    pub fn single(t: Trait, delta: f64) -> Self {
        Self::new().with(t.as_str(), delta)
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, delta: f64) -> Self {
        self.insert(name, delta);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, delta: f64) {
        self.0.insert(name.into(), delta);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates raw `(name, delta)` pairs, including unrecognized names.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Iterates the entries whose name is a known trait and whose value is finite.
    pub fn known(&self) -> impl Iterator<Item = (Trait, f64)> + '_ {
        self.0.iter().filter_map(|(name, delta)| {
            let t = name.parse::<Trait>().ok()?;
            delta.is_finite().then_some((t, *delta))
        })
    }

    /// Copy of this map with unknown names and non-finite values dropped.
    pub fn retain_known(&self) -> TraitDeltas {
        TraitDeltas(
            self.known()
                .map(|(t, d)| (t.as_str().to_string(), d))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(Trait, f64); N]> for TraitDeltas {
    fn from(entries: [(Trait, f64); N]) -> Self {
        TraitDeltas(
            entries
                .into_iter()
                .map(|(t, d)| (t.as_str().to_string(), d))
                .collect(),
        )
    }
}

/// Latest persisted personality state of the agent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonalitySnapshot {
    pub traits: TraitVector,
    /// Number of exchanges applied so far. Never decreases.
    pub exchange_count: u64,
}

// --- Conversation types ---

/// Who wrote a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    #[serde(alias = "hue", alias = "assistant")]
    Agent,
}

/// One immutable message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    #[serde(default = "new_turn_id")]
    pub id: String,
    pub content: String,
    #[serde(rename = "sender", alias = "author")]
    pub author: Author,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality_impact: Option<f64>,
}

fn new_turn_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl ConversationTurn {
    /// A new inbound user turn stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: new_turn_id(),
            content: content.into(),
            author: Author::User,
            timestamp: Utc::now(),
            emotion: None,
            personality_impact: None,
        }
    }

    /// A new outbound agent turn carrying the exchange's emotion and impact weight.
    pub fn agent(
        content: impl Into<String>,
        emotion: Option<String>,
        personality_impact: Option<f64>,
    ) -> Self {
        Self {
            id: new_turn_id(),
            content: content.into(),
            author: Author::Agent,
            timestamp: Utc::now(),
            emotion,
            personality_impact,
        }
    }
}

// --- Memory types ---

/// Kind of a persisted memory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    #[default]
    Episodic,
    Semantic,
    Emotional,
}

/// Summary of one significant exchange, written once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub memory_type: MemoryKind,
    pub content: String,
    pub emotional_weight: f64,
    pub importance_score: f64,
    pub tags: Vec<String>,
}

// --- Provider types ---

/// Role of a message sent to a text-generation provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProviderRole {
    System,
    User,
    Assistant,
}

/// A single message in a provider request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderMessage {
    pub role: ProviderRole,
    pub content: String,
}

impl ProviderMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ProviderRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ProviderRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ProviderRole::Assistant,
            content: content.into(),
        }
    }
}

/// A request to a text-generation provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// Model identifier.
    pub model: String,
    /// Ordered conversation, system message first when present.
    pub messages: Vec<ProviderMessage>,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Penalty favouring new topics.
    pub presence_penalty: Option<f64>,
    /// Penalty against verbatim repetition.
    pub frequency_penalty: Option<f64>,
}

/// Token usage reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A complete response from a text-generation provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
}
