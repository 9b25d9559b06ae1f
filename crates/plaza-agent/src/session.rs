// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One user's conversation with the agent.

use std::sync::Arc;

use plaza_core::{ConversationTurn, PersonalitySnapshot, PlazaError};
use tracing::debug;

use crate::orchestrator::{ConversationOrchestrator, ExchangeOutcome};

/// Append-only, insertion-ordered list of conversation turns.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// The last `n` turns, oldest first.
    pub fn recent(&self, n: usize) -> &[ConversationTurn] {
        &self.turns[self.turns.len().saturating_sub(n)..]
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// A session holding its own log and the personality snapshot it last saw.
pub struct ChatSession {
    orchestrator: Arc<ConversationOrchestrator>,
    log: ConversationLog,
    snapshot: PersonalitySnapshot,
}

impl ChatSession {
    /// Starts a session from the latest stored snapshot.
    pub async fn start(orchestrator: Arc<ConversationOrchestrator>) -> Self {
        let snapshot = orchestrator.repository().load().await;
        debug!(
            exchange_count = snapshot.exchange_count,
            "chat session started"
        );
        Self {
            orchestrator,
            log: ConversationLog::new(),
            snapshot,
        }
    }

    /// Sends one user message and records both turns.
    ///
    /// Nothing is appended when the message is rejected.
    pub async fn send(&mut self, text: &str) -> Result<ExchangeOutcome, PlazaError> {
        let window = self.orchestrator.settings().history_window;
        let outcome = self
            .orchestrator
            .handle_user_message(text, &self.snapshot.traits, self.log.recent(window))
            .await?;

        self.log.push(ConversationTurn::user(text.trim()));
        self.log.push(ConversationTurn::agent(
            outcome.agent_text.clone(),
            Some(outcome.emotion.clone()),
            Some(outcome.learning_value),
        ));
        self.snapshot = PersonalitySnapshot {
            traits: outcome.traits,
            exchange_count: outcome.exchange_count,
        };
        Ok(outcome)
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn snapshot(&self) -> &PersonalitySnapshot {
        &self.snapshot
    }
}
