use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ClearFactsParams {
    #[schemars(description = "Must be true. Clears every asserted fact; rules and history are kept.")]
    pub confirm: bool,
}
