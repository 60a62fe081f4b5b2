//! MCP `reasoning_stats` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `reasoning_stats` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReasoningStatsParams {
    /// Include persisted store statistics alongside the engine's.
    #[schemars(description = "Also report memory store counts (default: false)")]
    pub include_store: Option<bool>,
}
