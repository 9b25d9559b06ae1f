// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for plaza integration tests.
//!
//! - [`MockProvider`] - scripted provider with request capture
//! - [`MemoryStore`] - in-memory store with failure injection
//! - [`TestHarness`] - orchestrator + chat session over temp SQLite

pub mod harness;
pub mod memory_store;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use memory_store::MemoryStore;
pub use mock_provider::{DEFAULT_MOCK_REPLY, MockProvider, MockReply};
