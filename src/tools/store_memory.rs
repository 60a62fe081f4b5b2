use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StoreMemoryParams {
    #[schemars(description = "The natural language content of the memory")]
    pub content: String,

    #[schemars(
        description = "Memory type: 'episodic' (events/experiences), 'semantic' (facts/knowledge), 'procedural' (how-to/processes), 'entity' (people/places/things). Defaults to 'semantic'."
    )]
    pub r#type: Option<String>,

    #[schemars(description = "Topic bucket for the memory. Defaults to 'general'.")]
    pub context: Option<String>,

    #[schemars(description = "Confidence score 0.0-1.0. Defaults to 1.0.")]
    pub confidence: Option<f64>,

    #[schemars(description = "Emotional salience 0.0-1.0. Defaults to 0.0.")]
    pub emotional_weight: Option<f64>,

    #[schemars(description = "Optional list of tags")]
    pub tags: Option<Vec<String>>,

    #[schemars(description = "Optional JSON metadata blob")]
    pub metadata: Option<serde_json::Value>,
}
