use job_defs::JobPayload;
use job_runner::{run_terraform_command, setup_logging, store_tf_vars};
use log::{error, info};
use std::env;
use std::path::Path;
use std::process::exit;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = setup_logging() {
        eprintln!("Failed to initialize logging: {:?}", e);
    }

    let payload = get_payload();

    let command = &payload.command;
    let deployment_id = &payload.deployment_id;
    let environment = &payload.environment;
    let refresh_only = payload.args.iter().any(|e| e == "-refresh-only");

    info!(
        "Preparing \"terraform {}\" for deployment {} in {}",
        command, deployment_id, environment
    );

    store_tf_vars(&payload.variables, Path::new("./"))?;

    let cmd = "init";
    if let Err(e) = run_terraform_command(
        cmd,
        None,
        false,
        false,
        false,
        true,
        false,
        false,
        false,
        &[],
        50,
    )
    .await
    {
        error!("Error running \"terraform {}\" command: {:?}", cmd, e);
        exit(1);
    }
    info!("Terraform init successful");

    let destroy_flag = command == "destroy";
    let auto_approve_flag = command == "apply" || command == "destroy";
    let plan_out = command == "plan" && !refresh_only;
    let plan_in = command == "apply" && Path::new("planfile").exists();

    match run_terraform_command(
        command,
        None,
        refresh_only,
        destroy_flag,
        auto_approve_flag,
        true,
        false,
        plan_out,
        plan_in,
        &payload.args,
        50,
    )
    .await
    {
        Ok(_) => {
            info!(
                "\"terraform {}\" finished for deployment {}",
                command, deployment_id
            );
            Ok(())
        }
        Err(e) => {
            error!("Error running \"terraform {}\" command: {:?}", command, e);
            exit(1);
        }
    }
}

fn get_payload() -> JobPayload {
    let payload_env = match env::var("PAYLOAD") {
        Ok(payload) => payload,
        Err(_) => {
            eprintln!("Expected a JSON job payload in the PAYLOAD environment variable");
            exit(1);
        }
    };
    match serde_json::from_str(&payload_env) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Failed to parse env-var PAYLOAD as JobPayload: {:?}", e);
            exit(1);
        }
    }
}
