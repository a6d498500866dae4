use serde::{Deserialize, Serialize};

use crate::VariableSet;

/// Job description the scheduling layer hands to the runner, serialized
/// as JSON in the PAYLOAD environment variable.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JobPayload {
    pub command: String,
    pub deployment_id: String,
    pub environment: String,
    #[serde(default)]
    pub variables: VariableSet,
    #[serde(default)]
    pub args: Vec<String>,
}
