// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-exchange FSM.
//!
//! Every exchange walks `ComposeRequest -> AwaitReply -> (ReplyOk | ReplyFallback)
//! -> AwaitAnalysis -> (AnalysisOk | AnalysisFallback) -> ApplyPersonality
//! -> (RecordMemory | Skip) -> Done`. A provider failure only selects the
//! fallback branch of its own step.

use tracing::debug;

/// States in the exchange FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    ComposeRequest,
    AwaitReply,
    ReplyOk,
    ReplyFallback,
    AwaitAnalysis,
    AnalysisOk,
    AnalysisFallback,
    ApplyPersonality,
    RecordMemory,
    Skip,
    Done,
}

impl std::fmt::Display for ExchangeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExchangeState::ComposeRequest => "compose_request",
            ExchangeState::AwaitReply => "await_reply",
            ExchangeState::ReplyOk => "reply_ok",
            ExchangeState::ReplyFallback => "reply_fallback",
            ExchangeState::AwaitAnalysis => "await_analysis",
            ExchangeState::AnalysisOk => "analysis_ok",
            ExchangeState::AnalysisFallback => "analysis_fallback",
            ExchangeState::ApplyPersonality => "apply_personality",
            ExchangeState::RecordMemory => "record_memory",
            ExchangeState::Skip => "skip",
            ExchangeState::Done => "done",
        };
        f.write_str(name)
    }
}

impl ExchangeState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: ExchangeState) -> bool {
        use ExchangeState::*;
        matches!(
            (self, next),
            (ComposeRequest, AwaitReply)
                | (AwaitReply, ReplyOk | ReplyFallback)
                | (ReplyOk | ReplyFallback, AwaitAnalysis)
                | (AwaitAnalysis, AnalysisOk | AnalysisFallback)
                | (AnalysisOk | AnalysisFallback, ApplyPersonality)
                | (ApplyPersonality, RecordMemory | Skip)
                | (RecordMemory | Skip, Done)
        )
    }
}

/// Ordered record of the states an exchange visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangePath(Vec<ExchangeState>);

impl ExchangePath {
    pub(crate) fn start() -> Self {
        debug!(state = %ExchangeState::ComposeRequest, "exchange started");
        Self(vec![ExchangeState::ComposeRequest])
    }

    /// Moves to `next`, logging the transition.
    pub(crate) fn advance(&mut self, next: ExchangeState) {
        let current = self.current();
        debug_assert!(
            current.can_transition_to(next),
            "illegal exchange transition {current} -> {next}"
        );
        debug!(from = %current, to = %next, "exchange transition");
        self.0.push(next);
    }

    pub fn current(&self) -> ExchangeState {
        self.0
            .last()
            .copied()
            .unwrap_or(ExchangeState::ComposeRequest)
    }

    pub fn states(&self) -> &[ExchangeState] {
        &self.0
    }

    pub fn contains(&self, state: ExchangeState) -> bool {
        self.0.contains(&state)
    }

    pub fn is_done(&self) -> bool {
        self.current() == ExchangeState::Done
    }
}

impl std::fmt::Display for ExchangePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, state) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{state}")?;
        }
        Ok(())
    }
}
