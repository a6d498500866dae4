mod payload;
mod variable;

pub use payload::JobPayload;
pub use variable::{TerraformVariable, VariableSet};
