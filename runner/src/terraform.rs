use anyhow::Result;
use job_defs::VariableSet;
use log::info;
use std::path::Path;

use crate::render::tf_var_environment;
use crate::{run_generic_command, CommandResult};

fn build_terraform_command(
    command: &str,
    extra_variables: Option<&VariableSet>,
    no_lock_flag: bool,
    destroy_flag: bool,
    auto_approve_flag: bool,
    no_input_flag: bool,
    json_flag: bool,
    plan_out: bool,
    plan_in: bool,
    extra_args: &[String],
) -> tokio::process::Command {
    let mut exec = tokio::process::Command::new("terraform");
    exec.arg(command)
        .arg("-no-color")
        .current_dir(Path::new("./"))
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped());

    if let Some(variables) = extra_variables {
        for (key, value) in tf_var_environment(variables) {
            exec.env(key, value);
        }
    }

    if no_input_flag {
        exec.arg("-input=false");
    }

    if auto_approve_flag {
        exec.arg("-auto-approve");
    }

    if destroy_flag {
        exec.arg("-destroy");
    }

    if json_flag {
        exec.arg("-json");
    }

    if plan_in {
        exec.arg("planfile");
    }

    if plan_out {
        exec.arg("-out=planfile");
    }

    if no_lock_flag {
        // Allow multiple plans to be run in parallel, without locking the state
        exec.arg("-lock=false");
    }

    for arg in extra_args {
        exec.arg(arg);
    }

    exec
}

/// Builds and runs a `terraform <command>` invocation. Variables passed
/// through `extra_variables` are applied as `TF_VAR_` environment
/// variables; variables already stored in `terraform.tfvars` by the
/// caller need no further wiring.
pub async fn run_terraform_command(
    command: &str,
    extra_variables: Option<&VariableSet>,
    no_lock_flag: bool,
    destroy_flag: bool,
    auto_approve_flag: bool,
    no_input_flag: bool,
    json_flag: bool,
    plan_out: bool,
    plan_in: bool,
    extra_args: &[String],
    max_output_lines: usize,
) -> Result<CommandResult, anyhow::Error> {
    let mut exec = build_terraform_command(
        command,
        extra_variables,
        no_lock_flag,
        destroy_flag,
        auto_approve_flag,
        no_input_flag,
        json_flag,
        plan_out,
        plan_in,
        extra_args,
    );

    info!("Running terraform command:\n{:?}", exec.as_std());

    run_generic_command(&mut exec, max_output_lines).await
}
