//! MCP `reason` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `reason` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReasonParams {
    /// Propositions asserted as facts (confidence 1.0) before reasoning.
    #[schemars(description = "Premises to assert as facts before reasoning, e.g. ['P', 'P → Q']")]
    #[serde(default)]
    pub premises: Vec<String>,

    #[schemars(description = "Goal to derive (forward/backward) or observation to explain (abductive)")]
    pub goal: String,

    /// `"forward"`, `"backward"`, or `"abductive"`.
    #[schemars(description = "Reasoning method: 'forward', 'backward', or 'abductive'")]
    pub method: String,
}
