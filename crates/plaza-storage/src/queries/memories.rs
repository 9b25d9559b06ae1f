// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory record persistence.

use plaza_core::{MemoryKind, MemoryRecord, PlazaError};
use rusqlite::params;

use crate::database::{Database, map_tr_err};
use crate::models::StoredMemory;
use crate::queries::{encode_json, json_column_err, now_rfc3339};

/// Insert a memory record and return its generated id.
pub async fn insert_memory(db: &Database, memory: &MemoryRecord) -> Result<String, PlazaError> {
    let id = uuid::Uuid::new_v4().to_string();
    let row_id = id.clone();
    let memory_type = memory.memory_type.to_string();
    let content = memory.content.clone();
    let emotional_weight = memory.emotional_weight;
    let importance_score = memory.importance_score;
    let tags = encode_json(&memory.tags)?;
    let created_at = now_rfc3339();

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO hue_memories
                 (id, memory_type, content, emotional_weight, importance_score, tags, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    row_id,
                    memory_type,
                    content,
                    emotional_weight,
                    importance_score,
                    tags,
                    created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
    Ok(id)
}

/// Most recent memories, newest first.
pub async fn recent_memories(db: &Database, limit: usize) -> Result<Vec<StoredMemory>, PlazaError> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, memory_type, content, emotional_weight, importance_score, tags, created_at
                 FROM hue_memories ORDER BY created_at DESC, rowid DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit], |row| {
                let memory_type: String = row.get(1)?;
                let tags: String = row.get(5)?;
                Ok(StoredMemory {
                    id: row.get(0)?,
                    record: MemoryRecord {
                        memory_type: memory_type.parse::<MemoryKind>().map_err(|e| {
                            rusqlite::Error::FromSqlConversionFailure(
                                1,
                                rusqlite::types::Type::Text,
                                Box::new(e),
                            )
                        })?,
                        content: row.get(2)?,
                        emotional_weight: row.get(3)?,
                        importance_score: row.get(4)?,
                        tags: serde_json::from_str(&tags).map_err(|e| json_column_err(5, e))?,
                    },
                    created_at: row.get(6)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}
