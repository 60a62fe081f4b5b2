use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReflectParams {
    #[schemars(description = "Topic to reflect on; used to search related memories")]
    pub topic: String,

    #[schemars(
        description = "Reflection depth: 'surface' (1 level), 'deep' (3 levels), 'philosophical' (5 levels). Defaults to 'surface'."
    )]
    pub depth: Option<String>,
}
