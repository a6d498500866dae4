use anyhow::{Context, Result};
use job_defs::{TerraformVariable, VariableSet};
use std::fs::write;
use std::path::Path;

// An hcl-flagged value is an expression in terraform's input dialect and
// goes in byte-for-byte; a plain value becomes a quoted HCL string
// literal. No validation happens here, terraform reports syntax errors.
fn tf_vars_assignment(variable: &TerraformVariable) -> String {
    if variable.hcl {
        format!("{} = {}", variable.key, variable.value)
    } else {
        format!(
            "{} = {}",
            variable.key,
            hcl::Expression::String(variable.value.clone())
        )
    }
}

/// Body of a `terraform.tfvars` file, one assignment per record.
pub fn tf_vars_file_contents(variables: &VariableSet) -> String {
    let mut contents = String::new();
    for variable in variables.iter() {
        contents.push_str(&tf_vars_assignment(variable));
        contents.push('\n');
    }
    contents
}

/// `-var key=value` argument pairs for the terraform CLI. The CLI treats
/// `-var` input as raw, so both flavors pass the value verbatim.
pub fn tf_var_flags(variables: &VariableSet) -> Vec<String> {
    let mut flags = Vec::with_capacity(variables.len() * 2);
    for variable in variables.iter() {
        flags.push("-var".to_string());
        flags.push(format!("{}={}", variable.key, variable.value));
    }
    flags
}

/// `TF_VAR_<key>` environment pairs, values verbatim.
pub fn tf_var_environment(variables: &VariableSet) -> Vec<(String, String)> {
    variables
        .iter()
        .map(|variable| (format!("TF_VAR_{}", variable.key), variable.value.clone()))
        .collect()
}

pub fn store_tf_vars(variables: &VariableSet, directory: &Path) -> Result<(), anyhow::Error> {
    let path = directory.join("terraform.tfvars");
    write(&path, tf_vars_file_contents(variables))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!(
        "Stored {} terraform variables in {}",
        variables.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use job_defs::TerraformVariable;
    use pretty_assertions::assert_eq;

    fn example_set() -> VariableSet {
        VariableSet::from(vec![
            TerraformVariable::new("region", "us-east-1", false),
            TerraformVariable::new("tags", "{ env = \"prod\" }", true),
        ])
    }

    #[test]
    fn tfvars_quotes_plain_values_and_passes_hcl_verbatim() {
        assert_eq!(
            tf_vars_file_contents(&example_set()),
            "region = \"us-east-1\"\ntags = { env = \"prod\" }\n"
        );
    }

    #[test]
    fn tfvars_escapes_plain_string_literals() {
        let set = VariableSet::from(vec![TerraformVariable::new(
            "motd",
            "say \"hello\"",
            false,
        )]);
        assert_eq!(
            tf_vars_file_contents(&set),
            "motd = \"say \\\"hello\\\"\"\n"
        );
    }

    #[test]
    fn tfvars_of_empty_set_is_empty() {
        assert_eq!(tf_vars_file_contents(&VariableSet::new()), "");
    }

    #[test]
    fn var_flags_interleave_flag_and_assignment() {
        assert_eq!(
            tf_var_flags(&example_set()),
            vec!["-var", "region=us-east-1", "-var", "tags={ env = \"prod\" }"]
        );
    }

    #[test]
    fn environment_pairs_are_prefixed() {
        assert_eq!(
            tf_var_environment(&example_set()),
            vec![
                ("TF_VAR_region".to_string(), "us-east-1".to_string()),
                ("TF_VAR_tags".to_string(), "{ env = \"prod\" }".to_string()),
            ]
        );
    }

    #[test]
    fn store_tf_vars_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        store_tf_vars(&example_set(), dir.path()).unwrap();
        let contents = std::fs::read_to_string(dir.path().join("terraform.tfvars")).unwrap();
        assert_eq!(contents, tf_vars_file_contents(&example_set()));
    }
}
