use anyhow::{anyhow, Result};
use std::collections::VecDeque;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
}

fn push_bounded(buffer: &mut VecDeque<String>, line: String, max_lines: usize) {
    buffer.push_back(line);
    if buffer.len() > max_lines {
        buffer.pop_front();
    }
}

fn join_lines(buffer: &VecDeque<String>) -> String {
    buffer
        .iter()
        .fold(String::new(), |acc, line| acc + line.as_str() + "\n")
}

/// Runs a command, mirroring its stdout to the console while keeping the
/// last `max_output_lines` of each stream for the result.
pub async fn run_generic_command(
    exec: &mut tokio::process::Command,
    max_output_lines: usize,
) -> Result<CommandResult, anyhow::Error> {
    let mut child = exec.spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not captured, pipe it before spawning"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("stderr was not captured, pipe it before spawning"))?;

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    let mut stdout_tail = VecDeque::new();
    let mut stderr_tail = VecDeque::new();

    let mut stdout_done = false;
    let mut stderr_done = false;

    while !stdout_done || !stderr_done {
        tokio::select! {
            stdout_line = stdout_reader.next_line(), if !stdout_done => {
                match stdout_line {
                    Ok(Some(line)) => {
                        println!("{}", line);
                        push_bounded(&mut stdout_tail, line, max_output_lines);
                    },
                    Ok(None) => {
                        stdout_done = true;
                    },
                    Err(e) => {
                        eprintln!("Error reading stdout: {}", e);
                        stdout_done = true;
                    },
                }
            },
            stderr_line = stderr_reader.next_line(), if !stderr_done => {
                match stderr_line {
                    Ok(Some(line)) => {
                        push_bounded(&mut stderr_tail, line, max_output_lines);
                    },
                    Ok(None) => {
                        stderr_done = true;
                    },
                    Err(e) => {
                        eprintln!("Error reading stderr: {}", e);
                        stderr_done = true;
                    },
                }
            },
        }
    }

    let exit_status = child.wait().await?;

    let stdout_text = join_lines(&stdout_tail);
    let stderr_text = join_lines(&stderr_tail);

    if !exit_status.success() {
        println!("Command failed with stderr:\n{}", stderr_text);
        if !stdout_text.is_empty() {
            println!("stdout:\n{}", stdout_text);
        }
        return Err(anyhow!("{}", stderr_text));
    }

    Ok(CommandResult {
        stdout: stdout_text,
        stderr: stderr_text,
    })
}
