use anyhow::Result;

use crate::config::NoesisConfig;

/// Display memory store and reasoning-session statistics in the terminal.
pub fn stats(config: &NoesisConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = crate::db::open_database(&db_path)?;

    let response = crate::memory::stats::store_stats(&conn, Some(&db_path))?;
    let rules = crate::reasoning::RuleBase::builtin();

    println!("Noesis Statistics");
    println!("{}", "=".repeat(40));
    println!("  Total memories:      {}", response.total_memories);
    println!("  Reasoning sessions:  {}", response.reasoning_sessions);
    println!("  Sessions w/ result:  {}", response.sessions_found);
    println!("  Built-in rules:      {}", rules.len());
    println!();

    println!("By Type:");
    for (t, count) in &response.by_type {
        println!("  {:<12} {}", t, count);
    }
    println!();

    if !response.by_context.is_empty() {
        println!("By Context:");
        for (c, count) in &response.by_context {
            println!("  {:<24} {}", c, count);
        }
        println!();
    }

    println!("Database size:         {} bytes", response.db_size_bytes);

    if let Some(ref oldest) = response.oldest_memory {
        println!("Oldest memory:         {oldest}");
    }
    if let Some(ref newest) = response.newest_memory {
        println!("Newest memory:         {newest}");
    }

    Ok(())
}
