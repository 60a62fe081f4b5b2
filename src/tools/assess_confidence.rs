//! MCP `assess_confidence` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `assess_confidence` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AssessConfidenceParams {
    #[schemars(description = "The statement whose credibility should be assessed")]
    pub statement: String,

    /// Evidence propositions; forward chaining starts from these.
    #[schemars(description = "Optional evidence statements supporting the claim")]
    pub evidence: Option<Vec<String>>,
}
