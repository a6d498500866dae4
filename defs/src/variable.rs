use serde::{Deserialize, Serialize};

/// A single input variable destined for a terraform invocation.
///
/// When `hcl` is true the consumer treats `value` as an expression in
/// terraform's input dialect (lists, maps, objects) and inserts it
/// verbatim; when false it is a plain string literal. The record itself
/// performs no parsing or validation of either form.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TerraformVariable {
    pub key: String,
    pub value: String,
    pub hcl: bool,
}

impl TerraformVariable {
    pub fn new(key: &str, value: &str, hcl: bool) -> Self {
        TerraformVariable {
            key: key.to_string(),
            value: value.to_string(),
            hcl,
        }
    }
}

/// Ordered set of variables assembled while a job is being prepared.
///
/// Keys are unique within a set: inserting an existing key replaces the
/// earlier record in place, keeping first-insertion order so rendered
/// files and argument lists stay deterministic.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct VariableSet {
    variables: Vec<TerraformVariable>,
}

impl VariableSet {
    pub fn new() -> Self {
        VariableSet { variables: vec![] }
    }

    pub fn insert(&mut self, variable: TerraformVariable) {
        match self
            .variables
            .iter_mut()
            .find(|existing| existing.key == variable.key)
        {
            Some(existing) => *existing = variable,
            None => self.variables.push(variable),
        }
    }

    pub fn get(&self, key: &str) -> Option<&TerraformVariable> {
        self.variables.iter().find(|variable| variable.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TerraformVariable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl From<Vec<TerraformVariable>> for VariableSet {
    fn from(variables: Vec<TerraformVariable>) -> Self {
        let mut set = VariableSet::new();
        for variable in variables {
            set.insert(variable);
        }
        set
    }
}

// Deserializes through From<Vec<_>> so the key-uniqueness rule also holds
// for sets arriving in a job payload.
impl<'de> Deserialize<'de> for VariableSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let variables = Vec::<TerraformVariable>::deserialize(deserializer)?;
        Ok(VariableSet::from(variables))
    }
}
