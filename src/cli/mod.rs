//! Terminal subcommands. Each opens the configured database, runs one
//! operation, and prints the result.

pub mod assess;
pub mod reason;
pub mod reflect;
pub mod remember;
pub mod search;
pub mod stats;

use anyhow::Result;

use crate::config::NoesisConfig;
use crate::memory::SqliteMemoryStore;
use crate::reasoning::Reasoner;

/// Open the configured store and a fresh engine.
fn open(config: &NoesisConfig) -> Result<(SqliteMemoryStore, Reasoner)> {
    let store = SqliteMemoryStore::open(config.resolved_db_path())?;
    Ok((store, Reasoner::from_config(&config.reasoning)))
}

/// Truncate to at most `max` characters, appending `...` when cut.
fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("ααααα", 2), "αα...");
    }
}
