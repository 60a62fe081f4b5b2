//! MCP `search_memory` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `search_memory` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchMemoryParams {
    /// Keyword query. An empty query returns the most recent memories.
    #[schemars(description = "Keywords to search for. Empty returns the most recent memories.")]
    pub query: String,

    #[schemars(description = "Only return memories with exactly this context")]
    pub context: Option<String>,

    /// Maximum number of results (1–50). Defaults to 10.
    #[schemars(description = "Maximum number of results to return (1-50). Defaults to 10.")]
    pub limit: Option<usize>,
}
