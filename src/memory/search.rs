use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use crate::memory::types::{MemoryRecord, MemoryType};
use crate::reasoning::{ReasoningMethod, ReasoningResult, ReasoningSession};

// ── Public API ────────────────────────────────────────────────────────────────

/// Relevance search: FTS5 BM25 over content → optional context filter → access tracking.
///
/// Query words are OR-ed, so any shared term makes a memory a candidate and
/// BM25 decides the order. An empty query returns the most recent memories.
pub fn search_memories(
    conn: &Connection,
    query: &str,
    context: Option<&str>,
    limit: usize,
) -> Result<Vec<MemoryRecord>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let escaped = escape_fts_query(query);
    let records = if escaped.is_empty() {
        recent_memories(conn, context, limit)?
    } else {
        fts_search(conn, &escaped, context, limit)?
    };

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    update_access(conn, &ids)?;

    tracing::debug!(query = %query, results = records.len(), "memory search");
    Ok(records)
}

/// Most recent reasoning sessions, newest first.
pub fn recent_sessions(conn: &Connection, limit: usize) -> Result<Vec<ReasoningSession>> {
    let mut stmt = conn.prepare(
        "SELECT premises, goal, method, result, created_at FROM reasoning_sessions \
         ORDER BY created_at DESC, rowid DESC LIMIT ?1",
    )?;

    let rows: Vec<(String, String, String, String, String)> = stmt
        .query_map(params![limit as i64], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(premises, goal, method, result, created_at)| {
            let premises: Vec<String> =
                serde_json::from_str(&premises).context("malformed session premises")?;
            let method: ReasoningMethod = method.parse()?;
            let result: ReasoningResult =
                serde_json::from_str(&result).context("malformed session result")?;
            let timestamp = DateTime::parse_from_rfc3339(&created_at)
                .context("malformed session timestamp")?
                .with_timezone(&Utc);
            Ok(ReasoningSession {
                premises,
                goal,
                method,
                result,
                timestamp,
            })
        })
        .collect()
}

// ── Internal helpers ──────────────────────────────────────────────────────────

const MEMORY_COLUMNS: &str = "m.id, m.type, m.content, m.context, m.confidence, \
     m.emotional_weight, m.tags, m.created_at, m.metadata";

/// FTS5 BM25 keyword search. FTS5 rank is negative (more negative = better).
fn fts_search(
    conn: &Connection,
    escaped: &str,
    context: Option<&str>,
    limit: usize,
) -> Result<Vec<MemoryRecord>> {
    let sql = format!(
        "SELECT {MEMORY_COLUMNS} FROM memories_fts \
         JOIN memories m ON m.rowid = memories_fts.rowid \
         WHERE memories_fts MATCH ?1 AND (?2 IS NULL OR m.context = ?2) \
         ORDER BY memories_fts.rank LIMIT ?3"
    );
    let mut stmt = conn.prepare(&sql)?;
    let records = stmt
        .query_map(params![escaped, context, limit as i64], memory_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Newest memories first, for queries with no usable terms.
fn recent_memories(
    conn: &Connection,
    context: Option<&str>,
    limit: usize,
) -> Result<Vec<MemoryRecord>> {
    let sql = format!(
        "SELECT {MEMORY_COLUMNS} FROM memories m \
         WHERE (?1 IS NULL OR m.context = ?1) \
         ORDER BY m.created_at DESC LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let records = stmt
        .query_map(params![context, limit as i64], memory_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

fn memory_from_row(row: &Row<'_>) -> rusqlite::Result<MemoryRecord> {
    let memory_type: String = row.get(1)?;
    let memory_type: MemoryType = memory_type.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, e.into())
    })?;
    let tags: String = row.get(6)?;
    let created_at: String = row.get(7)?;
    let timestamp = DateTime::parse_from_rfc3339(&created_at)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
        })?;
    let metadata: Option<String> = row.get(8)?;

    Ok(MemoryRecord {
        id: row.get(0)?,
        memory_type,
        content: row.get(2)?,
        context: row.get(3)?,
        confidence: row.get(4)?,
        emotional_weight: row.get(5)?,
        tags: serde_json::from_str(&tags).unwrap_or_default(),
        timestamp,
        metadata: metadata.and_then(|s| serde_json::from_str(&s).ok()),
    })
}

/// Escape a user query for FTS5 MATCH syntax.
///
/// Wraps each whitespace-delimited word in double quotes and joins them with
/// `OR`. Drops tokens with no alphanumeric characters.
fn escape_fts_query(query: &str) -> String {
    query
        .split_whitespace()
        .map(|word| word.replace('"', ""))
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .map(|w| format!("\"{w}\""))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Batch update access_count and last_accessed for returned results.
fn update_access(conn: &Connection, ids: &[&str]) -> Result<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let now = Utc::now().to_rfc3339();
    let mut stmt = conn.prepare(
        "UPDATE memories SET access_count = access_count + 1, last_accessed = ?1 WHERE id = ?2",
    )?;
    for id in ids {
        stmt.execute(params![now, id])?;
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
