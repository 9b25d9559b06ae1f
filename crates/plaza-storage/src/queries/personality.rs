// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Personality snapshot persistence.

use plaza_core::{PersonalitySnapshot, PlazaError, TraitVector};
use rusqlite::params;

use crate::database::{Database, map_tr_err};
use crate::queries::{encode_json, json_column_err, now_rfc3339};

/// Append a snapshot. The newest row becomes the current state.
pub async fn insert_snapshot(db: &Database, snapshot: &PersonalitySnapshot) -> Result<(), PlazaError> {
    let traits = encode_json(&snapshot.traits)?;
    let exchange_count = i64::try_from(snapshot.exchange_count).unwrap_or(i64::MAX);
    let created_at = now_rfc3339();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO personality_state (traits, exchange_count, created_at)
                 VALUES (?1, ?2, ?3)",
                params![traits, exchange_count, created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// The most recently written snapshot, if any.
pub async fn latest_snapshot(db: &Database) -> Result<Option<PersonalitySnapshot>, PlazaError> {
    db.connection()
        .call(|conn| {
            let result = conn.query_row(
                "SELECT traits, exchange_count FROM personality_state ORDER BY id DESC LIMIT 1",
                [],
                |row| {
                    let traits: String = row.get(0)?;
                    let exchange_count: i64 = row.get(1)?;
                    let traits: TraitVector =
                        serde_json::from_str(&traits).map_err(|e| json_column_err(0, e))?;
                    Ok(PersonalitySnapshot {
                        traits,
                        exchange_count: u64::try_from(exchange_count).unwrap_or(0),
                    })
                },
            );
            match result {
                Ok(snapshot) => Ok(Some(snapshot)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Number of snapshots written so far.
#[cfg(test)]
pub(crate) async fn snapshot_count(db: &Database) -> Result<u64, PlazaError> {
    db.connection()
        .call(|conn| -> Result<u64, rusqlite::Error> {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM personality_state", [], |row| {
                row.get(0)
            })?;
            Ok(u64::try_from(n).unwrap_or(0))
        })
        .await
        .map_err(map_tr_err)
}
