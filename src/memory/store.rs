//! Write path: memory insertion, FTS sync, session recording, audit logging.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, Transaction};

use crate::memory::types::{MemoryRecord, NewMemory};
use crate::reasoning::ReasoningSession;

/// Insert a memory → sync FTS5 → audit log, inside one transaction.
pub fn store_memory(conn: &mut Connection, memory: &NewMemory) -> Result<MemoryRecord> {
    if memory.content.trim().is_empty() {
        bail!("content must not be empty");
    }
    if !(0.0..=1.0).contains(&memory.confidence) {
        bail!("confidence must be between 0.0 and 1.0");
    }
    if !(0.0..=1.0).contains(&memory.emotional_weight) {
        bail!("emotional_weight must be between 0.0 and 1.0");
    }

    let id = uuid::Uuid::now_v7().to_string();
    let timestamp = memory.timestamp.unwrap_or_else(Utc::now);

    let tx = conn.transaction()?;
    let rowid = insert_memory(&tx, &id, memory, &timestamp.to_rfc3339())?;
    insert_fts(&tx, rowid, &memory.content, &id, &memory.context)?;
    write_audit_log(&tx, "create", &id, None)?;
    tx.commit()?;

    Ok(MemoryRecord {
        id,
        memory_type: memory.memory_type,
        content: memory.content.clone(),
        context: memory.context.clone(),
        confidence: memory.confidence,
        emotional_weight: memory.emotional_weight,
        tags: memory.tags.clone(),
        timestamp,
        metadata: memory.metadata.clone(),
    })
}

/// Insert a new memory row. Returns the SQLite rowid for FTS5 sync.
fn insert_memory(
    conn: &Transaction,
    id: &str,
    memory: &NewMemory,
    created_at: &str,
) -> Result<i64> {
    let tags_json = serde_json::to_string(&memory.tags)?;
    let metadata_json = memory.metadata.as_ref().map(serde_json::to_string).transpose()?;

    conn.execute(
        "INSERT INTO memories (id, type, content, context, confidence, emotional_weight, tags, access_count, created_at, updated_at, metadata) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?8, ?9)",
        params![
            id,
            memory.memory_type.as_str(),
            memory.content,
            memory.context,
            memory.confidence,
            memory.emotional_weight,
            tags_json,
            created_at,
            metadata_json,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Sync the FTS5 index after inserting into the memories table.
///
/// Must use the same rowid as the corresponding `memories` row.
fn insert_fts(conn: &Transaction, rowid: i64, content: &str, id: &str, context: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO memories_fts (rowid, content, id, context) VALUES (?1, ?2, ?3, ?4)",
        params![rowid, content, id, context],
    )?;
    Ok(())
}

/// Persist a reasoning session. Returns the generated session id.
pub fn record_session(conn: &Connection, session: &ReasoningSession) -> Result<String> {
    let id = uuid::Uuid::now_v7().to_string();
    let premises = serde_json::to_string(&session.premises)?;
    let result = serde_json::to_string(&session.result)?;

    conn.execute(
        "INSERT INTO reasoning_sessions (id, premises, goal, method, found, confidence, result, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id,
            premises,
            session.goal,
            session.method.as_str(),
            session.result.found,
            session.result.confidence,
            result,
            session.timestamp.to_rfc3339(),
        ],
    )
    .context("failed to record reasoning session")?;

    Ok(id)
}

/// Write an entry to the memory_log audit table.
pub(crate) fn write_audit_log(
    conn: &Connection,
    operation: &str,
    memory_id: &str,
    details: Option<&serde_json::Value>,
) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    let details_json = details.map(|d| d.to_string());
    conn.execute(
        "INSERT INTO memory_log (operation, memory_id, details, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![operation, memory_id, details_json, now],
    )?;
    Ok(())
}
