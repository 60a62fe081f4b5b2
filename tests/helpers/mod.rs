#![allow(dead_code)]

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use noesis::memory::types::{MemoryRecord, NewMemory};
use noesis::memory::{MemoryStore, SqliteMemoryStore};
use noesis::reasoning::ReasoningSession;

/// A fresh in-memory store with schema and migrations applied.
pub fn test_store() -> SqliteMemoryStore {
    SqliteMemoryStore::in_memory().unwrap()
}

/// Store a semantic memory in `context`. Returns the memory ID.
pub fn remember(store: &SqliteMemoryStore, content: &str, context: &str, confidence: f64) -> String {
    store
        .store(
            NewMemory::semantic(content)
                .with_context(context)
                .with_confidence(confidence),
        )
        .unwrap()
        .id
}

/// Store a memory with an explicit creation time.
pub fn remember_at(
    store: &SqliteMemoryStore,
    content: &str,
    context: &str,
    timestamp: DateTime<Utc>,
) -> String {
    store
        .store(
            NewMemory::semantic(content)
                .with_context(context)
                .with_timestamp(timestamp),
        )
        .unwrap()
        .id
}

/// A store whose every operation fails, as if the database were gone.
pub struct FailingStore;

impl MemoryStore for FailingStore {
    fn search(&self, _query: &str, _context: Option<&str>, _limit: usize) -> Result<Vec<MemoryRecord>> {
        Err(anyhow!("memory store offline"))
    }

    fn reasoning_history(&self, _limit: usize) -> Result<Vec<ReasoningSession>> {
        Err(anyhow!("memory store offline"))
    }

    fn store(&self, _memory: NewMemory) -> Result<MemoryRecord> {
        Err(anyhow!("memory store offline"))
    }

    fn record_session(&self, _session: &ReasoningSession) -> Result<()> {
        Err(anyhow!("memory store offline"))
    }
}
