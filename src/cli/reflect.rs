use anyhow::Result;

use crate::config::NoesisConfig;
use crate::introspection::{reflection, ReflectionDepth};
use crate::memory::SqliteMemoryStore;

/// Reflect on a topic and print the report.
pub fn reflect(config: &NoesisConfig, topic: &str, depth: &str) -> Result<()> {
    let depth: ReflectionDepth = depth.parse()?;
    let store = SqliteMemoryStore::open(config.resolved_db_path())?;

    let outcome = reflection::reflect(&store, &config.introspection, topic, depth)?;

    print!("{}", outcome.report);
    println!();
    println!("Stored as memory {}", outcome.memory_id);
    Ok(())
}
