// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for the persisted entities.

pub mod memories;
pub mod personality;

/// Wraps a JSON decode failure of column `idx` as a rusqlite conversion error.
pub(crate) fn json_column_err(idx: usize, e: serde_json::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
}

pub(crate) fn encode_json<T: serde::Serialize>(value: &T) -> Result<String, plaza_core::PlazaError> {
    serde_json::to_string(value).map_err(|e| plaza_core::PlazaError::StoreUnavailable {
        source: Box::new(e),
    })
}

pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
