// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for the plaza personality service.
//!
//! Stores personality snapshots and memory records behind embedded
//! migrations. All access goes through one `tokio-rusqlite` connection,
//! whose background thread serializes every write.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
pub use models::StoredMemory;
