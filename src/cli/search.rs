use anyhow::Result;

use crate::config::NoesisConfig;
use crate::memory::{MemoryStore, SqliteMemoryStore};

/// Run a keyword search from the terminal.
pub fn search(config: &NoesisConfig, query: &str, context: Option<&str>, limit: usize) -> Result<()> {
    let store = SqliteMemoryStore::open(config.resolved_db_path())?;
    let results = store.search(query, context, limit)?;

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!("Found {} result(s)\n", results.len());

    for (i, memory) in results.iter().enumerate() {
        println!(
            "  {}. [{}/{}] {} (confidence: {:.2}, {})",
            i + 1,
            memory.memory_type,
            memory.context,
            memory.id,
            memory.confidence,
            memory.timestamp.format("%Y-%m-%d %H:%M"),
        );
        println!("     {}", super::preview(&memory.content, 120));
        println!();
    }

    Ok(())
}
