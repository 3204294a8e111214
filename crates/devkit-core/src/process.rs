//! Child-process execution helpers
//!
//! Two modes cover every command in this crate:
//!
//! - [`run_pass_thru`]: the child owns the terminal (interactive Python,
//!   eslint). Stdio is inherited and the exit code comes back as a value.
//! - [`run_streaming`]: output is piped line-by-line, echoed to the terminal
//!   and handed to a caller-supplied handler (the test runner watches for
//!   harness markers this way).
//!
//! A non-zero child exit is never a Rust error; callers decide what an exit
//! code means.

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::process::{Command, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// Run a command with inherited stdio and extra environment variables.
pub fn run_pass_thru<I, S>(program: &OsStr, args: I, extra_env: &[(&str, &str)]) -> Result<i32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let status = Command::new(program)
        .args(args)
        .envs(extra_env.iter().copied())
        .status()
        .with_context(|| format!("Failed to run {}", program.to_string_lossy()))?;
    Ok(status.code().unwrap_or(1))
}

/// Run a command, echoing each output line and feeding it to `line_handler`.
///
/// Stdout and stderr are both piped; lines from either stream reach the
/// handler. Arguments are passed as `OsStr` so non-UTF-8 paths survive
/// unconverted. Returns the child's exit code.
pub async fn run_streaming<I, S, F>(
    program: &OsStr,
    args: I,
    extra_env: &[(&str, &str)],
    mut line_handler: F,
) -> Result<i32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
    F: FnMut(&str),
{
    let mut child = TokioCommand::new(program)
        .args(args)
        .envs(extra_env.iter().copied())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to run {}", program.to_string_lossy()))?;

    let stdout = child
        .stdout
        .take()
        .context("Failed to capture child stdout")?;
    let stderr = child
        .stderr
        .take()
        .context("Failed to capture child stderr")?;

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();
    let mut stdout_done = false;
    let mut stderr_done = false;

    while !(stdout_done && stderr_done) {
        tokio::select! {
            line = stdout_reader.next_line(), if !stdout_done => {
                match line {
                    Ok(Some(line)) => {
                        println!("{}", line);
                        line_handler(&line);
                    }
                    Ok(None) => stdout_done = true,
                    Err(e) => {
                        eprintln!("Error reading stdout: {}", e);
                        stdout_done = true;
                    }
                }
            }
            line = stderr_reader.next_line(), if !stderr_done => {
                match line {
                    Ok(Some(line)) => {
                        eprintln!("{}", line);
                        line_handler(&line);
                    }
                    Ok(None) => stderr_done = true,
                    Err(e) => {
                        eprintln!("Error reading stderr: {}", e);
                        stderr_done = true;
                    }
                }
            }
        }
    }

    let status = child.wait().await.context("Failed to wait for child")?;
    Ok(status.code().unwrap_or(1))
}
