//! Memory collaborator: the store the introspection layer reads from and
//! writes back to.
//!
//! The reasoning side only depends on [`MemoryStore`]. [`SqliteMemoryStore`]
//! is the bundled implementation.

pub mod search;
pub mod stats;
pub mod store;
pub mod types;

use anyhow::{anyhow, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::reasoning::ReasoningSession;
use types::{MemoryRecord, NewMemory};

/// What the reasoning core needs from a memory backend.
///
/// All methods are synchronous; callers in async contexts should use
/// `tokio::task::spawn_blocking`.
pub trait MemoryStore: Send + Sync {
    /// Memories relevant to `query`, most relevant first.
    fn search(&self, query: &str, context: Option<&str>, limit: usize) -> Result<Vec<MemoryRecord>>;

    /// Past reasoning sessions, most recent first.
    fn reasoning_history(&self, limit: usize) -> Result<Vec<ReasoningSession>>;

    /// Persist a new memory and return it with its generated id.
    fn store(&self, memory: NewMemory) -> Result<MemoryRecord>;

    /// Persist a reasoning session so later reflections can see it.
    fn record_session(&self, session: &ReasoningSession) -> Result<()>;
}

/// SQLite-backed [`MemoryStore`] over a shared connection.
#[derive(Clone)]
pub struct SqliteMemoryStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteMemoryStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn from_shared(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Open (or create) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(crate::db::open_database(path)?))
    }

    /// A fresh in-memory store.
    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(crate::db::open_memory_database()?))
    }

    /// Lock the underlying connection.
    pub fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| anyhow!("db lock poisoned: {e}"))
    }
}

impl MemoryStore for SqliteMemoryStore {
    fn search(&self, query: &str, context: Option<&str>, limit: usize) -> Result<Vec<MemoryRecord>> {
        let conn = self.lock()?;
        search::search_memories(&conn, query, context, limit)
    }

    fn reasoning_history(&self, limit: usize) -> Result<Vec<ReasoningSession>> {
        let conn = self.lock()?;
        search::recent_sessions(&conn, limit)
    }

    fn store(&self, memory: NewMemory) -> Result<MemoryRecord> {
        let mut conn = self.lock()?;
        let record = store::store_memory(&mut conn, &memory)?;
        tracing::info!(id = %record.id, context = %record.context, "memory stored");
        Ok(record)
    }

    fn record_session(&self, session: &ReasoningSession) -> Result<()> {
        let conn = self.lock()?;
        let id = store::record_session(&conn, session)?;
        tracing::debug!(id = %id, goal = %session.goal, "reasoning session recorded");
        Ok(())
    }
}
