use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Snapshot of what the memory store holds.
#[derive(Debug, Serialize)]
pub struct StoreStats {
    pub total_memories: u64,
    pub by_type: BTreeMap<String, u64>,
    pub by_context: BTreeMap<String, u64>,
    pub reasoning_sessions: u64,
    pub sessions_found: u64,
    pub db_size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest_memory: Option<String>,
}

/// Compute memory store statistics.
///
/// `db_path` is used for file size calculation; pass None for in-memory databases.
pub fn store_stats(conn: &Connection, db_path: Option<&Path>) -> Result<StoreStats> {
    let total: i64 = conn.query_row("SELECT COUNT(*) FROM memories", [], |row| row.get(0))?;

    let mut by_type: BTreeMap<String, u64> = ["episodic", "semantic", "procedural", "entity"]
        .iter()
        .map(|t| (t.to_string(), 0))
        .collect();
    by_type.extend(grouped_counts(conn, "type")?);

    let by_context = grouped_counts(conn, "context")?.into_iter().collect();

    let (sessions, found): (i64, Option<i64>) = conn.query_row(
        "SELECT COUNT(*), SUM(found) FROM reasoning_sessions",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let (oldest, newest): (Option<String>, Option<String>) = conn.query_row(
        "SELECT MIN(created_at), MAX(created_at) FROM memories",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let db_size_bytes = db_path
        .and_then(|p| std::fs::metadata(p).ok())
        .map(|m| m.len())
        .unwrap_or(0);

    Ok(StoreStats {
        total_memories: total as u64,
        by_type,
        by_context,
        reasoning_sessions: sessions as u64,
        sessions_found: found.unwrap_or(0) as u64,
        db_size_bytes,
        oldest_memory: oldest,
        newest_memory: newest,
    })
}

/// `column` is always a literal from this module.
fn grouped_counts(conn: &Connection, column: &str) -> Result<Vec<(String, u64)>> {
    let sql = format!("SELECT {column}, COUNT(*) FROM memories GROUP BY {column}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
