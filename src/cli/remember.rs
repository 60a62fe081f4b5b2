use anyhow::{anyhow, Result};

use crate::config::NoesisConfig;
use crate::memory::types::{MemoryType, NewMemory};
use crate::memory::{MemoryStore, SqliteMemoryStore};

/// What `noesis remember` was asked to store.
pub struct RememberArgs {
    pub content: String,
    pub memory_type: String,
    pub context: Option<String>,
    pub confidence: f64,
    pub emotional_weight: f64,
    pub tags: Vec<String>,
}

/// Store a memory from the terminal.
pub fn remember(config: &NoesisConfig, args: RememberArgs) -> Result<()> {
    let memory_type: MemoryType = args.memory_type.parse().map_err(|e: String| anyhow!(e))?;
    let store = SqliteMemoryStore::open(config.resolved_db_path())?;

    let mut memory = NewMemory::new(args.content, memory_type)
        .with_confidence(args.confidence)
        .with_emotional_weight(args.emotional_weight)
        .with_tags(args.tags);
    if let Some(context) = args.context {
        memory = memory.with_context(context);
    }

    let record = store.store(memory)?;
    println!(
        "Stored {} memory {} in context '{}'",
        record.memory_type, record.id, record.context
    );
    Ok(())
}
