// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types read back from storage.

use plaza_core::MemoryRecord;

/// A memory record as persisted, with its row identity.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMemory {
    pub id: String,
    pub record: MemoryRecord,
    /// ISO 8601 timestamp.
    pub created_at: String,
}
